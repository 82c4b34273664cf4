use std::fs::File;
use std::io::{BufReader, Read};
use std::thread;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use waylib::cache::Cache;
use waylib::config::CacheConfig;
use waylib::io::get_reader;
use waylib::refs::parse_refs;
use waylib::replacement::Policy;

mod table;

#[derive(Parser, Debug)]
#[command(about = String::from("Set-associative cache simulator"))]
struct Args {
    /// JSON cache configuration file
    config: String,

    /// Reference stream file: decimal word addresses separated by commas,
    /// semicolons, or whitespace
    refs_file: Option<String>,

    /// Inline reference stream, e.g. --refs "1, 65, 129, 1"
    #[arg(short, long)]
    refs: Option<String>,

    /// Draw the slot table after every access
    #[arg(short, long)]
    draw: bool,

    /// Disable hit/miss highlighting in the drawn table
    #[arg(long)]
    no_color: bool,

    /// Seconds to pause after every access
    #[arg(long, default_value_t = 0.0)]
    delay: f64,

    /// Seconds to pause after a hit (overrides --delay)
    #[arg(long)]
    delay_hit: Option<f64>,

    /// Seconds to pause after a miss (overrides --delay)
    #[arg(long)]
    delay_miss: Option<f64>,

    /// Replay the stream once per way count dividing the partition count,
    /// printing one summary per configuration
    #[arg(long)]
    sweep_ways: bool,

    /// Emit the run summary as JSON instead of the one-line form
    #[arg(short, long)]
    json: bool,
}

/// The result of a run, serialised for the --json output
#[derive(Debug, Serialize)]
struct RunSummary {
    partitions: usize,
    partition_size: u64,
    sets: usize,
    ways: usize,
    hits: u64,
    misses: u64,
    policy: String,
}

impl RunSummary {
    fn of(cache: &Cache) -> Self {
        Self {
            partitions: cache.partitions(),
            partition_size: cache.partition_size(),
            sets: cache.sets(),
            ways: cache.ways(),
            hits: cache.hits(),
            misses: cache.misses(),
            policy: cache.policy().to_string(),
        }
    }
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();
    let config_file = File::open(&args.config)
        .map_err(|e| format!("Couldn't open the config file at path {}: {e}", args.config))?;
    let config: CacheConfig = serde_json::from_reader(BufReader::new(config_file))
        .map_err(|e| format!("Couldn't parse the config file: {e}"))?;

    let text = match (&args.refs, &args.refs_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => {
            let file = File::open(path)
                .map_err(|e| format!("Couldn't open the reference file at path {path}: {e}"))?;
            let mut reader =
                get_reader(file).map_err(|e| format!("Couldn't read the reference file: {e}"))?;
            let mut text = String::new();
            reader
                .read_to_string(&mut text)
                .map_err(|e| format!("Couldn't read the reference file: {e}"))?;
            text
        }
        (None, None) => {
            return Err("No reference stream given; pass a file or use --refs".to_string())
        }
    };
    let references =
        parse_refs(&text).map_err(|e| format!("Couldn't parse the reference stream: {e}"))?;

    if args.sweep_ways {
        return sweep_ways(&config, &references);
    }

    let mut cache =
        Cache::from_config(&config).map_err(|e| format!("Invalid cache configuration: {e}"))?;
    let paced = args.draw || args.delay > 0.0 || args.delay_hit.is_some() || args.delay_miss.is_some();
    if paced {
        for &reference in &references {
            let access = cache
                .access(reference)
                .map_err(|e| format!("Access to {reference} failed: {e}"))?;
            if args.draw {
                let rendered = table::render(&cache, !args.no_color)
                    .map_err(|e| format!("Couldn't render the cache table: {e}"))?;
                println!("{rendered}");
                println!(
                    " -> Accessed word {reference} - {} hits and {} misses",
                    cache.hits(),
                    cache.misses()
                );
            }
            pause(&args, access.hit);
        }
    } else {
        cache
            .access_many(references.iter().copied())
            .map_err(|e| format!("Simulation failed: {e}"))?;
    }

    if args.json {
        let summary = serde_json::to_string_pretty(&RunSummary::of(&cache))
            .map_err(|e| format!("Couldn't serialise the summary: {e}"))?;
        println!("{summary}");
    } else {
        println!("{cache}");
    }
    Ok(())
}

/// Replays the stream for way counts 1, 2, 4, ... up to the partition
/// count, printing the summary line for each. The textual equivalent of
/// sweeping associativity on a hit/miss curve
fn sweep_ways(config: &CacheConfig, references: &[u64]) -> Result<(), String> {
    if config.policy == Policy::None {
        return Err("Sweeping ways requires a replacement policy in the config".to_string());
    }
    let mut ways = 1;
    while ways <= config.partitions {
        if config.partitions % ways == 0 {
            let mut cache = Cache::new(config.partition_size, config.partitions, ways, config.policy)
                .map_err(|e| format!("Invalid cache configuration with {ways} ways: {e}"))?;
            cache
                .access_many(references.iter().copied())
                .map_err(|e| format!("Simulation with {ways} ways failed: {e}"))?;
            println!("{cache}");
        }
        ways *= 2;
    }
    Ok(())
}

fn pause(args: &Args, hit: bool) {
    let seconds = if hit {
        args.delay_hit.unwrap_or(args.delay)
    } else {
        args.delay_miss.unwrap_or(args.delay)
    };
    if seconds > 0.0 {
        thread::sleep(Duration::from_secs_f64(seconds));
    }
}
