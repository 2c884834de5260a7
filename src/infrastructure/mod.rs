//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`; these helpers translate between
//! host paths and sandbox paths.

pub mod paths;

pub use paths::{data_dir, expand_tilde};
