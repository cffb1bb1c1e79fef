use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Output directory on the local filesystem, created on first write.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: String,
}

impl LocalStorage {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        let root = Path::new(&self.root);
        tokio::fs::create_dir_all(root).await?;

        let target = root.join(name);
        tokio::fs::write(&target, data).await?;
        tracing::debug!("Wrote {} ({} bytes)", target.display(), data.len());
        Ok(())
    }

    fn location(&self) -> &str {
        &self.root
    }
}
