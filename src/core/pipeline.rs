use crate::adapters::sinks::{ConsoleSink, CsvSink, JsonSink};
use crate::adapters::storage::LocalStorage;
use crate::core::fetcher::PostsFetcher;
use crate::core::transform::project;
use crate::domain::model::{FetchResult, ProjectionResult};
use crate::domain::ports::{ConfigProvider, OutputFormat, Pipeline, Sink};
use crate::utils::error::Result;

/// Fetches one user's posts, projects them and hands the result to every sink.
pub struct ReactionPipeline<C: ConfigProvider> {
    config: C,
    fetcher: PostsFetcher,
    sinks: Vec<Box<dyn Sink>>,
}

impl<C: ConfigProvider> ReactionPipeline<C> {
    /// A pipeline with no sinks; add them with [`ReactionPipeline::with_sink`].
    pub fn new(config: C) -> Self {
        let fetcher = PostsFetcher::new(config.endpoint_template());
        Self {
            config,
            fetcher,
            sinks: Vec::new(),
        }
    }

    /// Builds sinks for the configured output formats, files going under the
    /// configured output path.
    pub fn from_config(config: C) -> Self {
        let storage = LocalStorage::new(config.output_path().to_string());
        let mut formats: Vec<OutputFormat> = Vec::new();
        for format in config.output_formats() {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }

        let mut pipeline = Self::new(config);
        for format in formats {
            pipeline = match format {
                OutputFormat::Console => pipeline.with_sink(ConsoleSink),
                OutputFormat::Json => pipeline.with_sink(JsonSink::new(storage.clone())),
                OutputFormat::Csv => pipeline.with_sink(CsvSink::new(storage.clone())),
            };
        }
        pipeline
    }

    pub fn with_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn sink_names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> Pipeline for ReactionPipeline<C> {
    async fn extract(&self, user_id: &str) -> FetchResult {
        self.fetcher.fetch(user_id).await
    }

    async fn transform(&self, raw: FetchResult) -> ProjectionResult {
        project(raw)
    }

    async fn load(&self, user_id: &str, result: &ProjectionResult) -> Result<Vec<String>> {
        tracing::debug!(
            "Emitting to {} sinks (output path: {})",
            self.sinks.len(),
            self.config.output_path()
        );
        let mut outputs = Vec::new();
        for sink in &self.sinks {
            if let Some(location) = sink.emit(user_id, result).await? {
                tracing::debug!("{} sink wrote {}", sink.name(), location);
                outputs.push(location);
            }
        }
        Ok(outputs)
    }
}
