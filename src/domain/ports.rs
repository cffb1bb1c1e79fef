use crate::domain::model::{QueryParams, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Destination for the files the load phase produces.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Location written files end up under, for reporting.
    fn location(&self) -> &str;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    /// Request parameters, with any unset end year resolved to the current year.
    fn query(&self) -> QueryParams;
    fn timeout_seconds(&self) -> Option<u64>;
    /// Drop translation/link columns and strip `.en` from names.
    fn normalize_columns(&self) -> bool;
    fn compress(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<serde_json::Value>;
    async fn transform(&self, data: serde_json::Value) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
