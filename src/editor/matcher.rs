use crate::address::Address;
use crate::editor::walker::{BlockWalker, WalkedBlock};
use hcl_edit::structure::Body;

/// Find every block whose full address equals the query, in document order.
///
/// Equality is component-wise and case-sensitive; there is no prefix,
/// substring, or pattern matching. Because addresses are flat component
/// lists, a query like `a.b` matches a top-level block `a "b" {}` and a
/// nested chain `a { b {} }` alike, exactly as the walker flattens them.
pub fn find_matches<'a>(body: &'a Body, query: &Address) -> Vec<WalkedBlock<'a>> {
    BlockWalker::new(body)
        .filter(|walked| walked.address == *query)
        .collect()
}
