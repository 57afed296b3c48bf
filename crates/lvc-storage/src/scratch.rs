//! Per-request scratch copies of remote documents.
//!
//! A remote PDF is streamed into a uniquely named file, read back, and the
//! file is removed when its [`TempPath`] guard drops, whichever way the
//! request ends.

use std::path::Path;

use aws_sdk_s3::Client;
use tempfile::TempPath;
use tracing::debug;
use uuid::Uuid;

use crate::error::StorageError;
use crate::objects;

/// Create an empty, uniquely named scratch file in `dir`.
pub fn create_scratch(dir: &Path) -> Result<(tokio::fs::File, TempPath), StorageError> {
    let named = tempfile::Builder::new()
        .prefix(&format!("lvc-{}-", Uuid::new_v4()))
        .suffix(".pdf")
        .tempfile_in(dir)?;
    let (file, path) = named.into_parts();
    Ok((tokio::fs::File::from_std(file), path))
}

/// Download `key` into a scratch file and return its bytes with the guard
/// that owns the file.
pub async fn materialize(
    client: &Client,
    bucket: &str,
    key: &str,
    dir: &Path,
) -> Result<(Vec<u8>, TempPath), StorageError> {
    let (mut file, path) = create_scratch(dir)?;

    let written = objects::download_object(client, bucket, key, &mut file).await?;
    drop(file);

    let bytes = tokio::fs::read(&path).await?;
    debug!(key, scratch = %path.display(), written, "materialized remote document");

    Ok((bytes, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scratch_names_are_unique_and_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();

        let (_, a) = create_scratch(dir.path()).unwrap();
        let (_, b) = create_scratch(dir.path()).unwrap();
        assert_ne!(a.to_path_buf(), b.to_path_buf());

        let name = a.file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with("lvc-"));
        assert!(name.ends_with(".pdf"));

        let a_path = a.to_path_buf();
        assert!(a_path.exists());
        drop(a);
        assert!(!a_path.exists());
        assert!(b.exists());
    }

    #[tokio::test]
    async fn missing_scratch_dir_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(create_scratch(&missing), Err(StorageError::Io(_))));
    }
}
