use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use super::BlobStore;
use crate::errors::{LedgerError, Result};

const BLOB_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed blob store: one `<key>.json` file per blob.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), BLOB_EXTENSION))
    }
}

impl BlobStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.blob_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.blob_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "blob".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)
        .map_err(|err| LedgerError::Persistence(format!("{}: {}", path.display(), err)))?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_and_reads_named_blobs() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data")).unwrap();

        store.write("students", "[1,2]").unwrap();
        assert_eq!(store.read("students").unwrap().as_deref(), Some("[1,2]"));
        assert!(store.blob_path("students").exists());
        assert!(!tmp_path(&store.blob_path("students")).exists());
    }

    #[test]
    fn missing_blob_reads_as_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.read("payments").unwrap(), None);
        store.remove("payments").unwrap();
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        let path = store.blob_path("../Students Backup");
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("___students_backup.json")
        );
        assert_eq!(path.parent(), Some(dir.path()));
    }
}
