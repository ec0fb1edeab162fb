use anyhow::Context;
use clap::{CommandFactory, FromArgMatches};
use reaction_etl::config::cli::overridden_flags;
use reaction_etl::core::ConfigProvider;
use reaction_etl::utils::{logger, validation::Validate};
use reaction_etl::{CliConfig, EtlEngine, ReactionPipeline, RunReport, TomlConfig};

async fn run_with<C: ConfigProvider + Validate>(
    config: C,
    user_id: &str,
) -> reaction_etl::Result<RunReport> {
    config.validate()?;

    let pipeline = ReactionPipeline::from_config(config);
    tracing::debug!("Sinks: {:?}", pipeline.sink_names());

    EtlEngine::new(pipeline).run(user_id).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = CliConfig::command().get_matches();
    let config = CliConfig::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting reaction-etl CLI");
    tracing::debug!("CLI config: {:?}", config);

    let user_id = config.user_id.clone();
    let result = match config.config.clone() {
        Some(path) => {
            let ignored = overridden_flags(&matches);
            if !ignored.is_empty() {
                tracing::warn!(
                    "Settings from {} take precedence; ignoring {}",
                    path,
                    ignored.join(", ")
                );
            }
            let toml_config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load config file {}", path))?;
            run_with(toml_config, &user_id).await
        }
        None => run_with(config, &user_id).await,
    };

    match result {
        Ok(report) => {
            if report.has_data() {
                tracing::info!(
                    "✅ Processed {} posts for user {}",
                    report.posts,
                    report.user_id
                );
            } else {
                tracing::info!("No posts for user {}", report.user_id);
            }
            for output in &report.outputs {
                println!("📁 Output saved to: {}", output);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
