#![deny(missing_docs)]

//! # Tags Command
//!
//! Lists the tag groups of a document, i.e. the valid values for `--tag`.

use crate::error::CliResult;
use crate::source::SourceArgs;
use swaggerdoc_core::oas::DEFAULT_GROUP;
use swaggerdoc_core::{decode_document, group_by_tag, normalize_document, SourceLoader};

/// Name under which the unnamed group is listed and selected with `--tag`.
pub const UNTAGGED_LABEL: &str = "(untagged)";

/// Arguments for the tags command.
#[derive(clap::Args, Debug, Clone)]
pub struct TagsArgs {
    #[clap(flatten)]
    pub source: SourceArgs,
}

/// Executes the tags command, printing one group per line with its operation count.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &TagsArgs) -> CliResult<()> {
    for line in list_groups(&args.source.loader(), &args.source.source)? {
        println!("{}", line);
    }
    Ok(())
}

fn list_groups(loader: &impl SourceLoader, locator: &str) -> CliResult<Vec<String>> {
    let raw = decode_document(&loader.fetch(locator)?)?;
    let spec = normalize_document(&raw)?;

    Ok(group_by_tag(&spec)
        .iter()
        .map(|(tag, ops)| {
            let name = if tag == DEFAULT_GROUP {
                UNTAGGED_LABEL
            } else {
                tag.as_str()
            };
            format!("{}\t{}", name, ops.len())
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use swaggerdoc_core::AppResult;

    #[test]
    fn test_list_groups() {
        let loader = |_: &str| -> AppResult<Vec<u8>> {
            Ok(br#"
tags: [{name: pets}, {name: store}]
paths:
  /pets: {get: {tags: [pets]}, post: {tags: [pets]}}
  /health: {get: {}}
"#
            .to_vec())
        };
        assert_eq!(
            list_groups(&loader, "swagger.yaml").unwrap(),
            vec!["pets\t2", "store\t0", "(untagged)\t1"]
        );
    }
}
