use crate::core::pipeline::NobelPipeline;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting ETL process...");

        // Extract
        tracing::info!("Extracting data...");
        let raw_data = self.pipeline.extract().await?;

        // Transform
        tracing::info!("Transforming data...");
        let transformed_result = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Transformed {} rows x {} columns",
            transformed_result.table.num_rows(),
            transformed_result.table.num_columns()
        );

        // Load
        tracing::info!("Loading data...");
        let output_path = self.pipeline.load(transformed_result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }

    /// Extract only; the caller decides what to do with the raw body.
    pub async fn extract(&self) -> Result<serde_json::Value> {
        self.pipeline.extract().await
    }
}

/// Validate `config` and run it against `storage`.
///
/// With `fetch_only` the body is fetched and dropped, nothing is written and
/// the output location is not checked; the result is then `None`.
pub async fn run_configured<C, S>(
    config: C,
    storage: S,
    fetch_only: bool,
) -> Result<Option<String>>
where
    C: ConfigProvider + Validate,
    S: Storage,
{
    config.validate()?;
    if !fetch_only {
        validate_path("output_path", storage.location())?;
    }

    let endpoint = config.query().endpoint;
    let engine = EtlEngine::new(NobelPipeline::new(storage, config));

    if fetch_only {
        let data = engine.extract().await?;
        let count = data
            .get(endpoint.records_key())
            .and_then(|records| records.as_array())
            .map_or(0, |records| records.len());
        tracing::info!("Fetched {} {} records, discarding", count, endpoint);
        return Ok(None);
    }

    engine.run().await.map(Some)
}
