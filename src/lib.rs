pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::storage::LocalStorage;
pub use config::{LambdaConfig, TomlConfig};
pub use domain::model::{PostStats, ProjectionOutcome, ProjectionResult, RunReport};
pub use utils::error::{EtlError, Result};

pub use crate::core::{
    etl::EtlEngine, fetcher::PostsFetcher, pipeline::ReactionPipeline, transform::project,
};

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use adapters::storage::S3Storage;
