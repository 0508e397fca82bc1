pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod models;
pub mod server;
pub mod service;
pub mod upstream;
pub mod utils;

pub use config::Config;
pub use error::{FetchError, LookupKind};
