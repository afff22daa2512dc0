#![warn(missing_docs)]
//! `semtok-core` - value types and coordinate machinery for semantic highlight overlays.
//!
//! This crate is protocol-agnostic. It provides:
//! - [`LineIndex`]: rope-backed line/column ↔ char-offset conversion over a document snapshot
//! - [`TextRange`] / [`SemanticCategory`] / [`HighlightBuckets`]: the overlay value types a
//!   rendering frontend consumes
//! - [`OffsetLookup`]: the seam through which a decoder asks the document for buffer offsets
//!
//! Protocol-specific decoding (LSP semantic tokens) lives in `semtok-lsp`.

pub mod line_index;
pub mod ranges;

pub use line_index::LineIndex;
pub use ranges::{HighlightBuckets, OffsetLookup, SemanticCategory, TextRange};
