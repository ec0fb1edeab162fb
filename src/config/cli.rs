use crate::core::fetcher::DEFAULT_ENDPOINT_TEMPLATE;
use crate::domain::ports::{ConfigProvider, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_endpoint_template, validate_path, Validate};
use clap::parser::ValueSource;
use clap::{ArgMatches, Parser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "reaction-etl")]
#[command(about = "Fetch a user's posts and extract likes, dislikes and views")]
pub struct CliConfig {
    /// Id of the user whose posts are fetched
    pub user_id: String,

    #[arg(long, default_value = DEFAULT_ENDPOINT_TEMPLATE)]
    pub endpoint_template: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_enum, value_delimiter = ',', default_value = "console")]
    pub formats: Vec<OutputFormat>,

    /// TOML file for endpoint and output settings; its values take
    /// precedence over --endpoint-template, --output-path and --formats
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Flags set explicitly on the command line that a `--config` file replaces.
pub fn overridden_flags(matches: &ArgMatches) -> Vec<&'static str> {
    [
        ("endpoint_template", "--endpoint-template"),
        ("output_path", "--output-path"),
        ("formats", "--formats"),
    ]
    .into_iter()
    .filter(|(id, _)| matches.value_source(id) == Some(ValueSource::CommandLine))
    .map(|(_, flag)| flag)
    .collect()
}

impl ConfigProvider for CliConfig {
    fn endpoint_template(&self) -> &str {
        &self.endpoint_template
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_endpoint_template("endpoint_template", &self.endpoint_template)?;
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
