#![deny(missing_docs)]

//! # HTTP Loading
//!
//! `http`/`https` sources fetched with `ureq`; everything else is delegated to
//! the filesystem loader.

use std::time::Duration;
use swaggerdoc_core::{AppError, AppResult, FsLoader, SourceLoader, SourceLocator};

/// Loader that understands HTTP(S) URLs in addition to paths and `file://` URLs.
#[derive(Clone)]
pub struct HttpLoader {
    fs: FsLoader,
    agent: ureq::Agent,
}

impl HttpLoader {
    /// Creates a loader with a global per-request timeout.
    pub fn new(fs: FsLoader, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            fs,
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl SourceLoader for HttpLoader {
    fn fetch(&self, locator: &str) -> AppResult<Vec<u8>> {
        let url = match SourceLocator::parse(locator, self.fs.base_dir()) {
            SourceLocator::Url(url) if matches!(url.scheme(), "http" | "https") => url,
            _ => return self.fs.fetch(locator),
        };

        tracing::debug!(url = %url, "fetching document");
        let fetch_err = |reason: String| AppError::SourceFetch {
            locator: locator.to_string(),
            reason,
        };
        let mut response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|e| fetch_err(e.to_string()))?;
        response
            .body_mut()
            .read_to_vec()
            .map_err(|e| fetch_err(e.to_string()))
    }
}
