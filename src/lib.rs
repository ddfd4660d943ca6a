//! Blockedit: address-based block editing for HCL documents
//!
//! Blocks are addressed by the types and labels of their nesting chain
//! (`resource.aws_instance.foo`) instead of by text position. Three
//! operations are supported: get the source text of matched blocks, mv
//! (rename) a block's type and labels in place, and list the address of
//! every block in a document.
//!
//! # Architecture
//!
//! Parsing and reprinting are delegated to [`hcl_edit`], which keeps every
//! token and its surrounding trivia. The engine only decides *which*
//! header tokens to swap; everything else in the document reprints
//! byte-identically. A no-op rename therefore returns the input unchanged.
//!
//! # Example
//!
//! ```
//! use blockedit::editor::rename_block;
//!
//! let input = "resource \"aws_instance\" \"foo\" {\n  ami = \"x\"\n}\n";
//! let output = rename_block(
//!     input,
//!     "resource.aws_instance.foo",
//!     "resource.aws_instance.bar",
//! )
//! .unwrap();
//! assert_eq!(output, "resource \"aws_instance\" \"bar\" {\n  ami = \"x\"\n}\n");
//! ```

pub mod address;
pub mod editor;

// Re-exports
pub use address::Address;
pub use editor::{
    find_matches, get_block, list_block, rename_block, BlockEditor, BlockWalker, EditError,
    WalkedBlock,
};
