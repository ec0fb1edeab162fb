pub mod etl;
pub mod fetcher;
pub mod pipeline;
pub mod transform;

pub use crate::domain::model::{
    FetchResult, PostStats, Projection, ProjectionOutcome, ProjectionResult, RawDocument,
};
pub use crate::domain::ports::{ConfigProvider, OutputFormat, Pipeline, Sink, Storage};
pub use crate::utils::error::Result;
