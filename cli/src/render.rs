#![deny(missing_docs)]

//! # Render Command
//!
//! Runs the document tree pipeline and writes the tree for an output adapter.

use crate::error::{CliError, CliResult};
use crate::source::SourceArgs;
use crate::tags::UNTAGGED_LABEL;
use std::fs;
use std::path::{Path, PathBuf};
use swaggerdoc_core::oas::DEFAULT_GROUP;
use swaggerdoc_core::{render, try_render, DocNode, RenderRequest};

/// Arguments for the render command.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Only render the `Methods` subsections of these tags (repeatable).
    /// `(untagged)` selects operations without a tag.
    #[clap(long = "tag")]
    pub tags: Vec<String>,

    /// Output path for the tree.
    /// Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Exit with an error instead of emitting an error block.
    #[clap(long)]
    pub strict: bool,
}

/// Executes the render command.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &RenderArgs) -> CliResult<()> {
    let loader = args.source.loader();
    let tags = args.tags.iter().map(|tag| {
        if tag == UNTAGGED_LABEL {
            DEFAULT_GROUP
        } else {
            tag.as_str()
        }
    });
    let request = RenderRequest::new(args.source.source.clone()).with_tags(tags);

    let nodes = if args.strict {
        try_render(&loader, &request)?.into_nodes()
    } else {
        render(&loader, &request)
    };

    let output_str = serialize(&nodes, args.output.as_deref())?;

    if let Some(out_path) = &args.output {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(out_path, output_str)?;
        tracing::info!(path = %out_path.display(), "document tree written");
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn serialize(nodes: &[DocNode], out_path: Option<&Path>) -> CliResult<String> {
    let ext = out_path
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .unwrap_or("json");
    match ext {
        "yaml" | "yml" => serde_yaml::to_string(nodes)
            .map_err(|e| CliError::General(format!("YAML serialization failed: {}", e))),
        _ => serde_json::to_string_pretty(nodes)
            .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e))),
    }
}
