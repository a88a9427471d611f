//! # Document Loading
//!
//! The seam between the core and whatever fetches document bytes.
//!
//! The core only needs a [`SourceLoader`]; [`FsLoader`] covers paths relative
//! to the invoking document and `file://` URLs. Hosts that can reach the network
//! wrap it with their own HTTP client.

use crate::error::{AppError, AppResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Fetches the raw bytes behind a source locator.
pub trait SourceLoader {
    /// Returns the bytes of the document at `locator`.
    ///
    /// # Errors
    ///
    /// * `AppError::SourceFetch` when the source cannot be read.
    fn fetch(&self, locator: &str) -> AppResult<Vec<u8>>;
}

impl<F> SourceLoader for F
where
    F: Fn(&str) -> AppResult<Vec<u8>>,
{
    fn fetch(&self, locator: &str) -> AppResult<Vec<u8>> {
        self(locator)
    }
}

/// Where a locator points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    /// Absolute URL with a scheme (`http`, `https`, `file`, ...).
    Url(Url),
    /// Filesystem path, already joined with the base directory.
    Path(PathBuf),
}

impl SourceLocator {
    /// Classifies `locator`; scheme-less locators are paths relative to `base_dir`.
    ///
    /// Single-letter schemes are treated as Windows drive letters, not URLs.
    pub fn parse(locator: &str, base_dir: &Path) -> Self {
        match Url::parse(locator) {
            Ok(url) if url.scheme().len() > 1 => SourceLocator::Url(url),
            _ => SourceLocator::Path(base_dir.join(locator)),
        }
    }
}

/// Loads documents from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsLoader {
    base_dir: PathBuf,
}

impl FsLoader {
    /// Loader resolving relative locators against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory relative locators are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl SourceLoader for FsLoader {
    fn fetch(&self, locator: &str) -> AppResult<Vec<u8>> {
        let fetch_err = |reason: String| AppError::SourceFetch {
            locator: locator.to_string(),
            reason,
        };

        let path = match SourceLocator::parse(locator, &self.base_dir) {
            SourceLocator::Path(path) => path,
            SourceLocator::Url(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_err(|_| fetch_err(format!("'{}' is not a local file URL", url)))?,
            SourceLocator::Url(url) => {
                return Err(fetch_err(format!(
                    "no loader available for scheme '{}'",
                    url.scheme()
                )))
            }
        };

        tracing::debug!(path = %path.display(), "reading document");
        fs::read(&path).map_err(|e| fetch_err(format!("{}: {}", path.display(), e)))
    }
}

/// Decodes document bytes, trying JSON first and YAML second.
///
/// # Errors
///
/// * `AppError::Parse` when the bytes are neither valid JSON nor valid YAML.
pub fn decode_document(bytes: &[u8]) -> AppResult<Value> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_slice::<Value>(bytes).map_err(|yaml_err| {
            AppError::Parse(format!("not JSON ({}) and not YAML ({})", json_err, yaml_err))
        }),
    }
}
