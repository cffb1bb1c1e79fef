use crate::core::client::NobelClient;
use crate::core::columns::{prune_columns_in_place, strip_english_suffix_in_place};
use crate::core::{ConfigProvider, Pipeline, Storage, Table, TransformResult};
use crate::domain::model::Endpoint;
use crate::utils::error::Result;
use std::io::Write;
use std::time::Duration;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const ARCHIVE_NAME: &str = "nobel_output.zip";

/// Fetch one endpoint, flatten it into a table and write it out.
pub struct NobelPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: NobelClient,
}

impl<S: Storage, C: ConfigProvider> NobelPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client = NobelClient::new(config.base_url())
            .with_timeout(config.timeout_seconds().map(Duration::from_secs));
        Self {
            storage,
            config,
            client,
        }
    }

    fn endpoint(&self) -> Endpoint {
        self.config.query().endpoint
    }

    fn output_files(&self, result: &TransformResult) -> Result<Vec<(String, Vec<u8>)>> {
        let stem = self.endpoint().path();
        Ok(vec![
            (format!("{}.csv", stem), result.csv_output.clone().into_bytes()),
            (format!("{}.tsv", stem), result.tsv_output.clone().into_bytes()),
            (
                format!("{}.json", stem),
                serde_json::to_vec_pretty(&result.raw)?,
            ),
        ])
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for NobelPipeline<S, C> {
    async fn extract(&self) -> Result<serde_json::Value> {
        let params = self.config.query();
        tracing::debug!("Query parameters: {:?}", params);
        self.client.fetch(&params).await
    }

    async fn transform(&self, data: serde_json::Value) -> Result<TransformResult> {
        let mut table = Table::from_response(&data, self.endpoint())?;
        tracing::info!(
            "Flattened {} records into {} columns",
            table.num_rows(),
            table.num_columns()
        );

        if self.config.normalize_columns() {
            prune_columns_in_place(&mut table);
            strip_english_suffix_in_place(&mut table)?;
        }

        let csv_output = table.to_csv()?;
        let tsv_output = table.to_tsv()?;

        Ok(TransformResult {
            table,
            raw: data,
            csv_output,
            tsv_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let files = self.output_files(&result)?;

        if !self.config.compress() {
            for (name, data) in &files {
                tracing::debug!("Writing {} ({} bytes)", name, data.len());
                self.storage.write_file(name, data).await?;
            }
            return Ok(self.storage.location().to_string());
        }

        tracing::debug!("Creating ZIP file with {} files", files.len());
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, data) in &files {
                zip.start_file(name.as_str(), SimpleFileOptions::default())?;
                zip.write_all(data)?;
            }
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(ARCHIVE_NAME, &zip_data).await?;

        Ok(format!("{}/{}", self.storage.location(), ARCHIVE_NAME))
    }
}
