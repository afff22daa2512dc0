#![warn(missing_docs)]
//! `semtok-lsp` - LSP semantic token decoding for `semtok-core`.
//!
//! This crate turns the compact, delta-encoded token stream of
//! `textDocument/semanticTokens/full` into classified text ranges ready for overlay
//! application:
//!
//! - [`decode_tokens`]: relative → absolute position reconstruction
//! - [`CategoryResolver`]: numeric type codes → semantic categories, via the server's
//!   legend or a fixed fallback table
//! - [`bucket_tokens`]: classification + per-category range bucketing
//! - [`HighlightSession`]: request tagging, stale-response rejection, trigger debounce
//!
//! Payloads are parsed from `serde_json::Value` rather than `lsp-types` to keep the
//! dependency surface small; transport and rendering are the caller's concern.

pub mod buckets;
pub mod convert;
pub mod legend;
pub mod session;
pub mod tokens;

pub use buckets::{BucketOutcome, bucket_tokens, classify_token};
pub use convert::{DocumentOffsets, char_offset_to_utf16, utf16_len, utf16_to_char_offset};
pub use legend::CategoryResolver;
pub use session::{HighlightSession, RequestTag, SessionError, Trigger};
pub use tokens::{
    DecodedToken, RawTokenRecord, TokenDecoder, data_from_response, decode_tokens, encode_tokens,
};
