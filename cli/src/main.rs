#![deny(missing_docs)]

//! # Swaggerdoc CLI
//!
//! Command Line Interface for the Swagger documentation tree builder.
//!
//! Supported Commands:
//! - `render`: Builds the documentation tree and writes it as JSON or YAML.
//! - `tags`: Lists the tag groups available for `render --tag`.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod error;
#[cfg(feature = "client")]
mod http;
mod render;
mod source;
mod tags;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger documentation tree builder")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a Swagger document into a documentation tree.
    Render(render::RenderArgs),
    /// List the tag groups of a Swagger document.
    Tags(tags::TagsArgs),
}

fn main() -> CliResult<()> {
    // Logs go to stderr so stdout only carries the tree.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Render(args) => render::execute(args)?,
        Commands::Tags(args) => tags::execute(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeated_tag_filters() {
        let cli = Cli::try_parse_from([
            "swaggerdoc",
            "render",
            "swagger.json",
            "--tag",
            "pets",
            "--tag",
            "store",
        ])
        .unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.tags, vec!["pets", "store"]);
        assert_eq!(args.source.source, "swagger.json");
    }
}
