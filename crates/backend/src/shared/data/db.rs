use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::{Path, PathBuf};

/// SQLite URL for a database file, creating its parent directory if needed
pub fn database_url(db_file: &Path) -> anyhow::Result<String> {
    let absolute_path = absolute_path(db_file)?;
    if let Some(parent) = absolute_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

pub fn absolute_path(db_file: &Path) -> anyhow::Result<PathBuf> {
    if db_file.is_absolute() {
        Ok(db_file.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(db_file))
    }
}

/// Open a fresh connection; callers drop it when their statement is done
pub async fn connect(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(db_url).await
}
