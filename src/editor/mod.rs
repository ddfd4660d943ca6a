//! Address-based block editing over a lossless HCL syntax tree.
//!
//! The engine operates on in-memory buffers only: parse once, walk the
//! tree to index block addresses, match a query against that index, and
//! either slice out matched block text (get), rewrite matched headers in
//! place (mv), or print every address (list). File and stream plumbing
//! lives in the CLI layer.

pub mod errors;
pub mod matcher;
pub mod mutator;
pub mod walker;

pub use errors::EditError;
pub use matcher::find_matches;
pub use mutator::rewrite_header;
pub use walker::{BlockWalker, WalkedBlock};

use crate::address::Address;
use hcl_edit::structure::Body;

/// One parsed document, ready to serve get/mv/list queries.
///
/// Get answers are sliced from the original source text, so they reflect
/// the document as parsed; `rename` mutates the tree and `render` reprints
/// it. One editor serves one operation per invocation.
#[derive(Debug)]
pub struct BlockEditor {
    source: String,
    body: Body,
}

impl BlockEditor {
    pub fn parse(source: &str) -> Result<Self, EditError> {
        let body = source.parse::<Body>().map_err(|err| EditError::Parse {
            message: err.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            body,
        })
    }

    /// Addresses of every block at every depth, in document order.
    pub fn list(&self) -> Vec<Address> {
        BlockWalker::new(&self.body)
            .map(|walked| walked.address)
            .collect()
    }

    /// Full original text of every block matching `address`, in document
    /// order. An empty result is not an error. Every block parsed from
    /// source carries its span; a missing or out-of-range span means the
    /// tree and the source text are out of sync, which is a bug, not a
    /// recoverable condition.
    pub fn get(&self, address: &Address) -> Result<Vec<String>, EditError> {
        find_matches(&self.body, address)
            .into_iter()
            .map(|matched| {
                let range = matched.span.ok_or_else(|| EditError::Serialize {
                    message: format!("block at {} is missing its source span", matched.address),
                })?;
                let text = self.source.get(range).ok_or_else(|| EditError::Serialize {
                    message: format!("block span at {} exceeds the source text", matched.address),
                })?;
                Ok(ensure_trailing_newline(text.to_string()))
            })
            .collect()
    }

    /// Rename every block matching `from` so that it matches `to`,
    /// rewriting only block headers. Returns the number of blocks renamed;
    /// zero matches is an error.
    pub fn rename(&mut self, from: &Address, to: &Address) -> Result<usize, EditError> {
        let matches: Vec<(Vec<usize>, usize)> = find_matches(&self.body, from)
            .into_iter()
            .map(|matched| (matched.node_path, matched.ancestor_parts))
            .collect();

        if matches.is_empty() {
            return Err(EditError::NoMatchFound {
                address: from.to_string(),
            });
        }

        // Validate the target against every match before touching the tree,
        // so a rejected rename leaves the document unchanged.
        for (_, ancestors) in &matches {
            if to.len() <= *ancestors || to.parts()[..*ancestors] != from.parts()[..*ancestors] {
                return Err(EditError::MalformedAddress {
                    input: to.to_string(),
                    message: "renaming a block cannot change its enclosing path".to_string(),
                });
            }
            let new_type = &to.parts()[*ancestors];
            if !mutator::is_valid_block_type(new_type) {
                return Err(EditError::MalformedAddress {
                    input: to.to_string(),
                    message: format!("'{new_type}' is not a valid block type"),
                });
            }
        }

        for (node_path, ancestors) in &matches {
            walker::with_block_at_mut(&mut self.body, node_path, |block| {
                rewrite_header(block, &to.parts()[*ancestors], &to.parts()[*ancestors + 1..])
            })
            .ok_or_else(|| EditError::Serialize {
                message: "matched node path no longer points at a block".to_string(),
            })??;
        }

        Ok(matches.len())
    }

    /// Reprint the document. The output is re-parsed as a self-check; a
    /// tree that no longer parses is a mutation bug, surfaced as
    /// [`EditError::Serialize`].
    pub fn render(&self) -> Result<String, EditError> {
        let output = self.body.to_string();
        output
            .parse::<Body>()
            .map_err(|err| EditError::Serialize {
                message: err.to_string(),
            })?;
        Ok(output)
    }
}

/// Get: matched block texts concatenated in document order.
pub fn get_block(input: &str, address: &str) -> Result<String, EditError> {
    let query = Address::parse(address)?;
    let editor = BlockEditor::parse(input)?;
    Ok(editor.get(&query)?.concat())
}

/// Mv: the whole document with matched headers rewritten.
pub fn rename_block(input: &str, from: &str, to: &str) -> Result<String, EditError> {
    let from = Address::parse(from)?;
    let to = Address::parse(to)?;
    let mut editor = BlockEditor::parse(input)?;
    editor.rename(&from, &to)?;
    editor.render()
}

/// List: one re-parseable address per line, one line per block.
pub fn list_block(input: &str) -> Result<String, EditError> {
    let editor = BlockEditor::parse(input)?;
    let mut output = String::new();
    for address in editor.list() {
        output.push_str(&address.to_string());
        output.push('\n');
    }
    Ok(output)
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
