use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at `base_path`; absolute paths bypass the root.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    async fn remove_file(&self, path: &str) -> Result<bool> {
        match fs::remove_file(self.resolve(path)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        tokio_test::block_on(async {
            storage.write_file("nested/admin_token", b"abc").await.unwrap();
            assert_eq!(storage.read_file("nested/admin_token").await.unwrap(), b"abc");

            assert!(storage.remove_file("nested/admin_token").await.unwrap());
            assert!(!storage.remove_file("nested/admin_token").await.unwrap());
            assert!(storage.read_file("nested/admin_token").await.is_err());
        });
    }

    #[test]
    fn test_absolute_paths_bypass_base() {
        let temp_dir = TempDir::new().unwrap();
        let absolute = temp_dir.path().join("faculty.csv");
        std::fs::write(&absolute, "name\nDr. A").unwrap();

        let storage = LocalStorage::new("does-not-matter".to_string());
        let data = tokio_test::block_on(storage.read_file(absolute.to_str().unwrap())).unwrap();

        assert_eq!(data, b"name\nDr. A");
    }
}
