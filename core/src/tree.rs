//! # Document Tree
//!
//! Generic, markup-agnostic primitives handed to an output adapter.
//! Tables hold full sub-documents in their cells so nested schemas can be
//! embedded inside a parent table.

use serde::Serialize;

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Inline {
    /// Plain text.
    Text(String),
    /// Emphasized label (field names, table headings).
    Strong(String),
    /// Internal cross-reference to the section whose id is `refid`.
    Reference {
        /// Target section id.
        refid: String,
        /// Link text.
        text: String,
    },
}

/// A table cell: an ordered list of block nodes.
pub type Cell = Vec<DocNode>;

/// Block level node of the produced tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocNode {
    /// Titled section; `id` is the anchor cross-references point at.
    Section {
        /// Anchor id.
        id: String,
        /// Heading text.
        title: String,
        /// Section content.
        children: Vec<DocNode>,
    },
    /// Boxed entity block (one method, response or definition).
    Block {
        /// Block title, e.g. `GET /pets`.
        title: String,
        /// Block content.
        children: Vec<DocNode>,
    },
    /// Paragraph of inline content.
    Paragraph {
        /// Inline runs.
        inlines: Vec<Inline>,
    },
    /// Bulleted list; every item is a sub-document.
    BulletList {
        /// List items.
        items: Vec<Vec<DocNode>>,
    },
    /// Table with a header row.
    Table {
        /// Column headings.
        head: Vec<String>,
        /// Body rows, one cell per column.
        rows: Vec<Vec<Cell>>,
    },
    /// User-visible error.
    Error {
        /// Error content.
        children: Vec<DocNode>,
    },
}

impl DocNode {
    /// Paragraph holding a single text run.
    pub fn text(value: impl Into<String>) -> Self {
        DocNode::Paragraph {
            inlines: vec![Inline::Text(value.into())],
        }
    }

    /// Paragraph holding a single strong run, used as a heading for tables.
    pub fn heading(value: impl Into<String>) -> Self {
        DocNode::Paragraph {
            inlines: vec![Inline::Strong(value.into())],
        }
    }

    /// Section with an anchor equal to its title.
    pub fn section(title: impl Into<String>, children: Vec<DocNode>) -> Self {
        let title = title.into();
        DocNode::Section {
            id: title.clone(),
            title,
            children,
        }
    }

    /// Concatenated text of this node and its descendants.
    ///
    /// Strong runs and reference labels are included, table cells are joined with
    /// a single space. Mostly useful for assertions and plain-text adapters.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, out: &mut Vec<String>) {
        match self {
            DocNode::Section { title, children, .. } | DocNode::Block { title, children } => {
                out.push(title.clone());
                children.iter().for_each(|c| c.collect_text(out));
            }
            DocNode::Paragraph { inlines } => {
                let line: String = inlines
                    .iter()
                    .map(|i| match i {
                        Inline::Text(t) | Inline::Strong(t) => t.as_str(),
                        Inline::Reference { text, .. } => text.as_str(),
                    })
                    .collect();
                if !line.is_empty() {
                    out.push(line);
                }
            }
            DocNode::BulletList { items } => items
                .iter()
                .flatten()
                .for_each(|c| c.collect_text(out)),
            DocNode::Table { head, rows } => {
                out.extend(head.iter().cloned());
                rows.iter()
                    .flatten()
                    .flatten()
                    .for_each(|c| c.collect_text(out));
            }
            DocNode::Error { children } => children.iter().for_each(|c| c.collect_text(out)),
        }
    }
}

/// The assembled tree of one successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentTree {
    /// `Methods` section: one subsection per tag group.
    pub methods: DocNode,
    /// `Responses` section: one subsection per shared response.
    pub responses: DocNode,
    /// `Definitions` section: one subsection per definition.
    pub definitions: DocNode,
}

impl DocumentTree {
    /// Sections in display order.
    pub fn into_nodes(self) -> Vec<DocNode> {
        vec![self.methods, self.responses, self.definitions]
    }
}
