use waylib::cache::Cache;
use waylib::error::ViewError;

const GREEN_BACKGROUND: &str = "\x1b[42m";
const RED_BACKGROUND: &str = "\x1b[41m";
const RESET: &str = "\x1b[0m";

/// Renders the boxed table of current slot contents
///
/// One row per partition (highest index on top), showing the slot index,
/// the inclusive word span it caches, and its way within the set. With
/// `color` the slot of the most recent access gets a green (hit) or red
/// (miss) background. Reads the cache state only, never mutates it
pub fn render(cache: &Cache, color: bool) -> Result<String, ViewError> {
    let partitions = cache.partitions();
    let partition_width = digits(partitions - 1);
    let way_width = digits(cache.ways() - 1);
    let largest_word = partitions as u64 * cache.partition_size();
    let content_width = (1 + 2 * digits(largest_word as usize)).max("Content".len());

    let top = border('┌', '┬', '┐', partition_width, content_width, way_width);
    let bottom = border('└', '┴', '┘', partition_width, content_width, way_width);

    let mut lines = vec![top];
    lines.push(format!(
        "│{:>partition_width$}│{:^content_width$}│{:<way_width$}│",
        "P", "Content", "W"
    ));
    for slot in (0..partitions).rev() {
        let span = match cache.content_of(slot)? {
            Some((first, last)) => format!("{first}-{last}"),
            None => String::new(),
        };
        let mut cell = format!("{span:^content_width$}");
        if color {
            if let Some(access) = cache.last_access() {
                if access.slot == slot {
                    let background = if access.hit {
                        GREEN_BACKGROUND
                    } else {
                        RED_BACKGROUND
                    };
                    cell = format!("{background}{cell}{RESET}");
                }
            }
        }
        lines.push(format!(
            "│{slot:>partition_width$}│{cell}│{:<way_width$}│",
            slot % cache.ways()
        ));
    }
    lines.push(bottom);
    Ok(lines.join("\n"))
}

fn border(
    left: char,
    middle: char,
    right: char,
    partition_width: usize,
    content_width: usize,
    way_width: usize,
) -> String {
    format!(
        "{left}{}{middle}{}{middle}{}{right}",
        "─".repeat(partition_width),
        "─".repeat(content_width),
        "─".repeat(way_width)
    )
}

fn digits(value: usize) -> usize {
    value.to_string().len()
}
