use crate::address::Address;
use hcl_edit::structure::{Block, BlockLabel, Body, Structure};
use hcl_edit::Span;
use std::ops::Range;

/// One block visited during traversal.
#[derive(Debug, Clone)]
pub struct WalkedBlock<'a> {
    /// The block's full address: ancestor components followed by its own
    /// type and labels.
    pub address: Address,
    /// Number of leading address components contributed by enclosing
    /// blocks. The trailing components are this block's own header.
    pub ancestor_parts: usize,
    /// Structure indices from the root body down to this block. Stable
    /// under header mutation of any node, so matches can be resolved
    /// mutably later without re-walking.
    pub node_path: Vec<usize>,
    /// Byte range of the block in the original input, when parsed.
    pub span: Option<Range<usize>>,
    pub block: &'a Block,
}

/// Depth-first, document-order iterator over every block at every nesting
/// depth. Blocks sharing an address are yielded separately, in source
/// order; duplicates are valid input and are never collapsed.
pub struct BlockWalker<'a> {
    stack: Vec<Frame<'a>>,
}

struct Frame<'a> {
    prefix: Vec<String>,
    path: Vec<usize>,
    structures: Box<dyn Iterator<Item = (usize, &'a Structure)> + 'a>,
}

impl<'a> BlockWalker<'a> {
    pub fn new(body: &'a Body) -> Self {
        Self {
            stack: vec![Frame {
                prefix: Vec::new(),
                path: Vec::new(),
                structures: Box::new(body.iter().enumerate()),
            }],
        }
    }
}

impl<'a> Iterator for BlockWalker<'a> {
    type Item = WalkedBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.stack.last_mut()?.structures.next();
            let (index, structure) = match next {
                Some(entry) => entry,
                None => {
                    self.stack.pop();
                    continue;
                }
            };

            let block = match structure.as_block() {
                Some(block) => block,
                None => continue,
            };

            let frame = self.stack.last().expect("walker stack is non-empty");
            let ancestor_parts = frame.prefix.len();

            let mut parts = frame.prefix.clone();
            parts.push(block.ident.as_str().to_string());
            for label in &block.labels {
                parts.push(label_text(label).to_string());
            }

            let mut node_path = frame.path.clone();
            node_path.push(index);

            // Children are visited before later siblings: push a frame for
            // the block's body on top of the stack.
            self.stack.push(Frame {
                prefix: parts.clone(),
                path: node_path.clone(),
                structures: Box::new(block.body.iter().enumerate()),
            });

            return Some(WalkedBlock {
                address: Address::from_parts(parts),
                ancestor_parts,
                node_path,
                span: block.span(),
                block,
            });
        }
    }
}

/// The text value of a block label, whichever token form it was written in.
pub(crate) fn label_text(label: &BlockLabel) -> &str {
    match label {
        BlockLabel::Ident(ident) => ident.as_str(),
        BlockLabel::String(value) => value.as_str(),
    }
}

/// Resolve a walker-produced node path and run `f` on its block, mutably.
/// `iter_mut` hands out guard values, so the mutable borrow cannot leave
/// the traversal; mutation happens inside it instead. Returns `None` only
/// if the path does not point at a block, which indicates the path and the
/// tree are out of sync.
pub(crate) fn with_block_at_mut<R>(
    body: &mut Body,
    node_path: &[usize],
    f: impl FnOnce(&mut Block) -> R,
) -> Option<R> {
    let (first, rest) = node_path.split_first()?;
    let mut structure = body.iter_mut().nth(*first)?;
    let block = structure.as_block_mut()?;
    if rest.is_empty() {
        Some(f(block))
    } else {
        with_block_at_mut(&mut block.body, rest, f)
    }
}
