//! fsload - synthetic filesystem load generator
//!
//! fsload samples a large in-memory buffer of Gaussian values, writes it
//! over and over into randomly sized text files, and reads random files back
//! after every write. It exercises a filesystem's create, write, read and
//! (optionally) unlink paths with a single sequential stream of blocking I/O.
//!
//! # Architecture
//!
//! - **config**: defaults, CLI flags, TOML files, validation
//! - **distribution**: injectable random sources
//! - **target**: managed text files and the registry of written files
//! - **worker**: the `LoadGenerator` write/read-back loop
//! - **stats / output**: per-file latency histograms and run summaries
//!
//! # Example
//!
//! ```no_run
//! use fsload::config::Config;
//! use fsload::distribution::xoshiro::XoshiroSource;
//! use fsload::worker::LoadGenerator;
//!
//! let config = Config { iterations: 10, ..Config::default() };
//! let mut generator = LoadGenerator::new(&config, Box::new(XoshiroSource::new())).unwrap();
//! generator.run(&config).unwrap();
//! ```

pub mod config;
pub mod distribution;
pub mod error;
pub mod output;
pub mod stats;
pub mod target;
pub mod telemetry;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use error::LoadError;
pub use worker::LoadGenerator;

/// Result type used for application plumbing
pub type Result<T> = anyhow::Result<T>;
