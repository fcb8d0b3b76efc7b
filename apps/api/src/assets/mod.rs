//! Resume file storage.
//!
//! Uploaded resumes are kept side by side in one directory as
//! `resume-<unix millis>-<random>.pdf`. Uploading never removes older files; the
//! "current" resume is whichever file sorts newest at read time.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use tokio::fs;
use tracing::info;

use crate::errors::AppError;

pub const RESUME_PREFIX: &str = "resume-";
pub const RESUME_EXTENSION: &str = ".pdf";
pub const PDF_MIME: &str = "application/pdf";
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;
/// URL prefix under which the storage directory is served.
pub const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredResume {
    pub url: String,
    pub filename: String,
}

/// Answer to "is there a resume, and where?".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeInfo {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl From<Option<StoredResume>> for ResumeInfo {
    fn from(latest: Option<StoredResume>) -> Self {
        match latest {
            Some(r) => ResumeInfo {
                exists: true,
                url: Some(r.url),
                filename: Some(r.filename),
            },
            None => ResumeInfo {
                exists: false,
                url: None,
                filename: None,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResumeStore {
    dir: PathBuf,
}

impl ResumeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Validates and writes an uploaded resume. Earlier uploads are kept.
    pub async fn save(
        &self,
        bytes: &[u8],
        content_type: Option<&str>,
        original_name: Option<&str>,
    ) -> Result<StoredResume, AppError> {
        ensure_pdf(content_type)?;
        if bytes.len() > MAX_RESUME_BYTES {
            return Err(too_large());
        }

        self.ensure_dir().await?;
        let filename = resume_filename(original_name);
        fs::write(self.dir.join(&filename), bytes).await?;

        info!("Stored resume {filename} ({} bytes)", bytes.len());
        Ok(stored(filename))
    }

    /// The newest resume on disk, if any.
    pub async fn latest(&self) -> Result<Option<StoredResume>, AppError> {
        let mut candidates = Vec::new();
        for (name, path) in self.resume_files().await? {
            let meta = fs::metadata(&path).await?;
            let fs_time = meta
                .created()
                .or_else(|_| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            candidates.push((embedded_millis(&name), fs_time, name));
        }

        candidates.sort_by_key(|(millis, fs_time, name)| Reverse((*millis, *fs_time, name.clone())));
        Ok(candidates.into_iter().next().map(|(_, _, name)| stored(name)))
    }

    /// Removes every stored resume, not only the latest.
    pub async fn delete_all(&self) -> Result<usize, AppError> {
        let files = self.resume_files().await?;
        for (_, path) in &files {
            fs::remove_file(path).await?;
        }
        info!("Deleted {} resume file(s)", files.len());
        Ok(files.len())
    }

    async fn resume_files(&self) -> Result<Vec<(String, PathBuf)>, AppError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_resume_file(&name) {
                files.push((name, entry.path()));
            }
        }
        Ok(files)
    }
}

/// Rejects uploads whose declared MIME type is not exactly `application/pdf`.
pub fn ensure_pdf(content_type: Option<&str>) -> Result<(), AppError> {
    if content_type == Some(PDF_MIME) {
        Ok(())
    } else {
        Err(AppError::Validation("Only PDF files are allowed".to_string()))
    }
}

pub fn too_large() -> AppError {
    AppError::Validation("File too large".to_string())
}

fn stored(filename: String) -> StoredResume {
    StoredResume {
        url: format!("{PUBLIC_PREFIX}/{filename}"),
        filename,
    }
}

pub fn is_resume_file(name: &str) -> bool {
    name.starts_with(RESUME_PREFIX) && name.ends_with(RESUME_EXTENSION)
}

/// `resume-<unix millis>-<0..1e9><ext>`, keeping the upload's extension.
fn resume_filename(original_name: Option<&str>) -> String {
    let ext = original_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_else(|| RESUME_EXTENSION.to_string());
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    format!(
        "{RESUME_PREFIX}{}-{suffix}{ext}",
        Utc::now().timestamp_millis()
    )
}

/// Upload time encoded in the file name; 0 for names not produced by this store.
fn embedded_millis(name: &str) -> i64 {
    name.strip_prefix(RESUME_PREFIX)
        .and_then(|rest| rest.split('-').next())
        .and_then(|millis| millis.parse().ok())
        .unwrap_or(0)
}
