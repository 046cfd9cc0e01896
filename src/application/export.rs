//! Saving a rendered artifact as an SVG download.
//!
//! The markup is wrapped in a [`Blob`], registered with a [`DownloadSink`]
//! to obtain a temporary [`ObjectUrl`], downloaded under the requested
//! filename, and the reference is then revoked. Revocation happens on every
//! exit path, including a failed download.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::ExportError;

pub const SVG_MIME: &str = "image/svg+xml";

/// In-memory binary object with a MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Blob {
    pub fn svg(markup: &str) -> Self {
        Self {
            mime: SVG_MIME,
            bytes: markup.as_bytes().to_vec(),
        }
    }
}

/// Temporary reference to a staged [`Blob`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(pub String);

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where downloads land.
pub trait DownloadSink {
    /// Stages `blob` and returns a reference valid until [`DownloadSink::revoke`].
    fn create_object_url(&mut self, blob: Blob) -> Result<ObjectUrl, ExportError>;

    /// Materializes the staged object under `filename`, returning where it went.
    fn trigger(&mut self, url: &ObjectUrl, filename: &str) -> Result<PathBuf, ExportError>;

    fn revoke(&mut self, url: ObjectUrl);
}

/// Revokes its reference when dropped.
struct ObjectUrlGuard<'a, S: DownloadSink + ?Sized> {
    sink: &'a mut S,
    url: Option<ObjectUrl>,
}

impl<S: DownloadSink + ?Sized> Drop for ObjectUrlGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(url) = self.url.take() {
            debug!(%url, "revoking download reference");
            self.sink.revoke(url);
        }
    }
}

/// Downloads `svg_markup` as `filename` through `sink`.
pub fn export_svg<S: DownloadSink + ?Sized>(
    sink: &mut S,
    svg_markup: &str,
    filename: &str,
) -> Result<PathBuf, ExportError> {
    let url = sink.create_object_url(Blob::svg(svg_markup))?;
    let mut guard = ObjectUrlGuard {
        sink,
        url: Some(url.clone()),
    };
    let path = guard.sink.trigger(&url, filename)?;
    info!(filename, path = %path.display(), "exported artifact");
    Ok(path)
}
