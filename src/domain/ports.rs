use crate::domain::model::{FetchResult, ProjectionResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
}

pub trait ConfigProvider: Send + Sync {
    /// URL template containing an `{id}` placeholder.
    fn endpoint_template(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[OutputFormat];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, user_id: &str) -> FetchResult;
    async fn transform(&self, raw: FetchResult) -> ProjectionResult;
    async fn load(&self, user_id: &str, result: &ProjectionResult) -> Result<Vec<String>>;
}

/// A downstream consumer of a projection result.
#[async_trait]
pub trait Sink: Send + Sync {
    fn name(&self) -> &'static str;

    /// Renders `result`. Returns the location written to, if anything was written.
    async fn emit(&self, user_id: &str, result: &ProjectionResult) -> Result<Option<String>>;
}
