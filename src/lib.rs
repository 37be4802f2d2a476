pub mod capk;
pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod write;

pub use config::Config;
pub use error::ScrapeError;
pub use pipeline::{run, RunSummary};
