use crate::domain::model::{ProjectionOutcome, RunReport};
use crate::domain::ports::Pipeline;
use crate::utils::error::{EtlError, Result};

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs one fetch → project → emit cycle for `user_id`.
    ///
    /// Sinks see every outcome, errors included; the projection error is
    /// returned after they have rendered it. The id is trimmed before any
    /// phase sees it; a blank id is [`EtlError::MissingUserId`].
    pub async fn run(&self, user_id: &str) -> Result<RunReport> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(EtlError::MissingUserId);
        }

        tracing::info!("Starting ETL process for user {}", user_id);

        // Extract
        tracing::info!("Extracting data...");
        let raw = self.pipeline.extract(user_id).await;
        if let Err(e) = &raw {
            tracing::warn!("Extraction failed: {}", e);
        }

        // Transform
        tracing::info!("Transforming data...");
        let projection = self.pipeline.transform(raw).await;
        match &projection {
            Ok(ProjectionOutcome::Posts(posts)) => {
                tracing::info!("Transformed {} posts", posts.len())
            }
            Ok(ProjectionOutcome::Empty) => tracing::info!("No posts found for user {}", user_id),
            Err(e) => tracing::warn!("Transform failed: {}", e),
        }

        // Load
        tracing::info!("Loading data...");
        let outputs = self.pipeline.load(user_id, &projection).await?;
        for output in &outputs {
            tracing::info!("Output saved to: {}", output);
        }

        let outcome = projection?;
        Ok(RunReport {
            user_id: user_id.to_string(),
            posts: outcome.len(),
            outputs,
            completed_at: chrono::Utc::now(),
        })
    }
}
