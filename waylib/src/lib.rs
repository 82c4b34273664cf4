//! # waylib
//!
//! waylib is a library for simulating set-associative caches
//!
//! It models how a stream of word references maps onto a configurable
//! cache - direct-mapped, set-associative, or fully associative - and
//! decides, on every miss, which resident entry to evict under a selectable
//! replacement policy (lfu, lru, or fifo)
//!
//! The simulation tracks only what eviction needs: validity, the stored
//! tag, and three per-way usage counters. It does not model memory timing,
//! write policies, or multi-level hierarchies

/// Contains the cache implementation and the record of each access
pub mod cache;

/// Contains definitions for the JSON configuration format
pub mod config;

/// Contains the error types for configuration, windowing, and stream parsing
pub mod error;

/// Contains the reader used to ingest reference-stream files
pub mod io;

/// Contains the parser for free-form textual reference streams
pub mod refs;

/// Contains the replacement policies and their victim selection
pub mod replacement;

/// Contains the windowed view used to address the ways of one set in place
pub mod window;

#[cfg(test)]
mod test;
