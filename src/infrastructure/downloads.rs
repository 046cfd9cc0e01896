use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::application::{Blob, DownloadSink, ObjectUrl};
use crate::domain::ExportError;

/// Download sink that writes into a directory.
///
/// A staged blob lives in a hidden temporary file next to the destination
/// until its reference is revoked; revoking deletes it.
pub struct FileDownloads {
    dir: PathBuf,
    staged: HashMap<ObjectUrl, NamedTempFile>,
    issued: u64,
}

impl FileDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            staged: HashMap::new(),
            issued: 0,
        }
    }

    #[cfg(test)]
    fn staged_count(&self) -> usize {
        self.staged.len()
    }
}

impl DownloadSink for FileDownloads {
    fn create_object_url(&mut self, blob: Blob) -> Result<ObjectUrl, ExportError> {
        fs::create_dir_all(&self.dir).map_err(ExportError::Stage)?;
        let mut file = tempfile::Builder::new()
            .prefix(".math2visual-")
            .suffix(".part")
            .tempfile_in(&self.dir)
            .map_err(ExportError::Stage)?;
        file.write_all(&blob.bytes).map_err(ExportError::Stage)?;
        file.flush().map_err(ExportError::Stage)?;

        self.issued += 1;
        let url = ObjectUrl(format!("blob:math2visual/{}", self.issued));
        self.staged.insert(url.clone(), file);
        Ok(url)
    }

    fn trigger(&mut self, url: &ObjectUrl, filename: &str) -> Result<PathBuf, ExportError> {
        let staged = self
            .staged
            .get(url)
            .ok_or_else(|| ExportError::UnknownReference(url.to_string()))?;
        let dest = self.dir.join(filename);
        fs::copy(staged.path(), &dest).map_err(|source| ExportError::Write {
            filename: filename.to_string(),
            source,
        })?;
        Ok(dest)
    }

    fn revoke(&mut self, url: ObjectUrl) {
        self.staged.remove(&url);
    }
}
