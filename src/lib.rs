//! Per-language category tree datasets: fetch, trim, compress, checksum.
//!
//! The pipeline fetches a language's raw category hierarchy, trims it to a
//! bounded high-signal subset (percentile-based page-count pruning, removal
//! of nameless nodes, depth-bounded truncation), and emits a gzip artifact
//! plus integrity/freshness metadata.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;
