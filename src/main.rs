use clap::Parser;
use nobel_etl::core::{ConfigProvider, Storage};
use nobel_etl::core::etl::run_configured;
use nobel_etl::utils::logger::{self, LogFormat};
use nobel_etl::utils::validation::Validate;
use nobel_etl::{CliConfig, LocalStorage, NobelError, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(LogFormat::from_json_flag(cli.json_logs), cli.verbose);

    tracing::info!("Starting nobel-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match cli.config.clone() {
        Some(path) => {
            let ignored = cli.flags_ignored_by_config();
            if !ignored.is_empty() {
                tracing::warn!(
                    "{} has its own settings; ignoring --{}",
                    path,
                    ignored.join(", --")
                );
            }
            run_from_file(&path, cli.fetch_only).await
        }
        None => {
            let storage = LocalStorage::new(cli.output_path.clone());
            let fetch_only = cli.fetch_only;
            run(cli, storage, fetch_only).await
        }
    };

    if let Err(e) = outcome {
        tracing::error!("❌ nobel-etl failed: {}", e);
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run_from_file(path: &str, fetch_only: bool) -> Result<(), NobelError> {
    tracing::info!("Loading configuration from {}", path);
    let file_config = TomlConfig::from_file(path)?;
    let storage = LocalStorage::new(file_config.output_path().to_string());
    run(file_config, storage, fetch_only).await
}

async fn run<C, S>(config: C, storage: S, fetch_only: bool) -> Result<(), NobelError>
where
    C: ConfigProvider + Validate,
    S: Storage,
{
    if let Some(output_path) = run_configured(config, storage, fetch_only).await? {
        println!("✅ Nobel Prize data saved to: {}", output_path);
    }
    Ok(())
}
