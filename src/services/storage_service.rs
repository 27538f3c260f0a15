use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use rand::{distributions::Alphanumeric, Rng};
use tokio::{fs, io::AsyncWriteExt};

use crate::error::{Error, Result};

const RANDOM_SUFFIX_LEN: usize = 7;

/// Where uploaded files end up. Handlers only see this trait, the concrete
/// backend is chosen when the application state is built.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores `content` under `name` (`dir/file.ext`) and returns the name it
    /// was actually stored under, which differs when `name` is taken.
    async fn save(&self, name: &str, content: Bytes) -> Result<String>;

    /// Public path of a stored name.
    fn url(&self, name: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, name: &str, content: Bytes) -> Result<String> {
        let (dir, file_name) = match name.rsplit_once('/') {
            Some((dir, file)) => (dir, file),
            None => ("", name),
        };
        let file_name = valid_file_name(file_name)?;

        let dir_path = self.root.join(dir);
        fs::create_dir_all(&dir_path).await?;

        let mut candidate = file_name.clone();
        loop {
            let path = dir_path.join(&candidate);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(&content).await?;
                    file.flush().await?;
                    tracing::info!(path = %path.display(), bytes = content.len(), "Stored file");
                    return Ok(if dir.is_empty() {
                        candidate
                    } else {
                        format!("{}/{}", dir, candidate)
                    });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    candidate = alternative_name(&file_name);
                }
                Err(e) => {
                    tracing::error!("Failed to store {}: {}", path.display(), e);
                    return Err(Error::Io(e));
                }
            }
        }
    }

    fn url(&self, name: &str) -> String {
        format!("{}{}", self.base_url, name)
    }
}

/// Last path component of a client supplied file name, for either
/// separator style.
pub fn base_name(client_name: &str) -> &str {
    client_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(client_name)
}

/// Trims, turns spaces into underscores and keeps only letters, digits,
/// `_`, `-` and `.`.
pub fn valid_file_name(name: &str) -> Result<String> {
    let cleaned: String = name
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();

    if matches!(cleaned.as_str(), "" | "." | "..") {
        return Err(Error::BadRequest(format!(
            "Could not derive file name from '{}'",
            name
        )));
    }
    Ok(cleaned)
}

fn alternative_name(file_name: &str) -> String {
    let (root, ext) = match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name, ""),
    };
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{}_{}{}", root, suffix, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_client_directories() {
        assert_eq!(base_name("tapping.webm"), "tapping.webm");
        assert_eq!(base_name("/tmp/rec/tapping.webm"), "tapping.webm");
        assert_eq!(base_name(r"C:\Users\me\tapping.webm"), "tapping.webm");
    }

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(valid_file_name(" my recording.webm ").unwrap(), "my_recording.webm");
        assert_eq!(valid_file_name("запись(1).webm").unwrap(), "запись1.webm");
        assert!(valid_file_name("..").is_err());
        assert!(valid_file_name("???").is_err());
    }

    #[test]
    fn alternative_name_keeps_the_extension() {
        let name = alternative_name("tapping.webm");
        assert!(name.starts_with("tapping_"));
        assert!(name.ends_with(".webm"));
        assert_eq!(name.len(), "tapping_.webm".len() + RANDOM_SUFFIX_LEN);

        let dotfile = alternative_name(".webm");
        assert!(dotfile.starts_with(".webm_"));
    }

    #[tokio::test]
    async fn saves_under_the_requested_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path(), "/media/");

        let stored = storage
            .save("audio/tapping.webm", Bytes::from_static(b"webm"))
            .await
            .unwrap();

        assert_eq!(stored, "audio/tapping.webm");
        assert_eq!(storage.url(&stored), "/media/audio/tapping.webm");
        let on_disk = std::fs::read(dir.path().join("audio/tapping.webm")).unwrap();
        assert_eq!(on_disk, b"webm");
    }

    #[tokio::test]
    async fn taken_names_get_a_random_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path(), "/media/");

        let first = storage
            .save("audio/tapping.webm", Bytes::from_static(b"one"))
            .await
            .unwrap();
        let second = storage
            .save("audio/tapping.webm", Bytes::from_static(b"two"))
            .await
            .unwrap();

        assert_eq!(first, "audio/tapping.webm");
        assert_ne!(first, second);
        assert!(second.starts_with("audio/tapping_"));
        assert!(second.ends_with(".webm"));
        assert_eq!(std::fs::read(dir.path().join(&first)).unwrap(), b"one");
        assert_eq!(std::fs::read(dir.path().join(&second)).unwrap(), b"two");
    }
}
