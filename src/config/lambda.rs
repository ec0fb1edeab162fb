use crate::core::fetcher::DEFAULT_ENDPOINT_TEMPLATE;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_aws_region, validate_endpoint_template, validate_s3_bucket_name, Validate,
};

pub const DEFAULT_BUCKET: &str = "userdata";
pub const DEFAULT_REGION: &str = "ap-southeast-2";

/// Settings of the Lambda handler, read from the function's environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    pub endpoint_template: String,
    pub s3_bucket: String,
    pub s3_region: String,
}

impl LambdaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint_template: lookup("ENDPOINT_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_ENDPOINT_TEMPLATE.to_string()),
            s3_bucket: lookup("S3_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            s3_region: lookup("S3_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
        }
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_endpoint_template("ENDPOINT_TEMPLATE", &self.endpoint_template)?;
        validate_s3_bucket_name("S3_BUCKET", &self.s3_bucket)?;
        validate_aws_region("S3_REGION", &self.s3_region)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
