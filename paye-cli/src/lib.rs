pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod routes;
pub mod svg;
pub mod utils;
pub mod views;

/// Executable name, used in hints that point at another view.
pub const BIN_NAME: &str = "taxclarity";
