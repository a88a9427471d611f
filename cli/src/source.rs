#![deny(missing_docs)]

//! # Source Options
//!
//! Arguments shared by every command that reads a Swagger document, and the
//! loader built from them.

use std::path::PathBuf;
use swaggerdoc_core::FsLoader;

/// Loader used by the CLI: HTTP capable with the `client` feature.
#[cfg(feature = "client")]
pub type CliLoader = crate::http::HttpLoader;

/// Loader used by the CLI: filesystem only without the `client` feature.
#[cfg(not(feature = "client"))]
pub type CliLoader = FsLoader;

/// Where to read the Swagger document from.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// URL or path of the Swagger document (JSON or YAML).
    pub source: String,

    /// Directory relative paths are resolved against.
    #[clap(long, env = "SWAGGERDOC_BASE_DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// Timeout for HTTP(S) sources, in seconds.
    #[clap(long, env = "SWAGGERDOC_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl SourceArgs {
    /// Builds the loader for this source.
    #[cfg(feature = "client")]
    pub fn loader(&self) -> CliLoader {
        crate::http::HttpLoader::new(
            FsLoader::new(&self.base_dir),
            std::time::Duration::from_secs(self.timeout_secs),
        )
    }

    /// Builds the loader for this source.
    #[cfg(not(feature = "client"))]
    pub fn loader(&self) -> CliLoader {
        FsLoader::new(&self.base_dir)
    }
}
