//! Result reporting
//!
//! - `text`: results table printed to stdout
//! - `json`: machine-readable run summary

pub mod json;
pub mod text;
