//! `probekit-web` -- the `check_web` HTTP probe.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod check;
pub mod cli;
pub mod config;
pub mod observation;
pub mod transport;
