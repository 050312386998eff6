use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, its subdirectories and an initial `config.json` file with default
/// settings.
///
/// # Arguments
/// - `fintrack_home` - The directory that will be the root of data directory, e.g.
///   `$HOME/fintrack`
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(fintrack_home: &Path) -> Result<Out<()>> {
    let config = Config::create(fintrack_home)
        .await
        .context("Unable to create the data directory and configs")?;
    Ok(format!(
        "Successfully created the fintrack directory and config at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_loadable_home() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("fintrack");
        let out = init(&home).await.unwrap();
        assert!(out.message().contains("Successfully created"));
        let config = Config::load(&home).await.unwrap();
        assert!(config.store().is_dir());
    }

    #[tokio::test]
    async fn test_init_twice_keeps_data() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("fintrack");
        init(&home).await.unwrap();
        let config = Config::load(&home).await.unwrap();
        let storage_file = config.store().join("fintrack_data_v1.json");
        std::fs::write(&storage_file, "[]").unwrap();

        init(&home).await.unwrap();
        assert!(storage_file.is_file());
    }
}
