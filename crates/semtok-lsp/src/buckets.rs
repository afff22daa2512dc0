//! Token classification and span bucketing.
//!
//! The tail of the decode pipeline: decoded tokens are classified through a
//! [`CategoryResolver`], unclassified tokens are dropped, and the survivors are converted
//! to `[start, end)` char-offset ranges and collected per category into a fresh
//! [`HighlightBuckets`]. Nothing here is fatal: a token whose position no longer exists
//! in the document is skipped and counted, and the pass continues.

use crate::legend::CategoryResolver;
use crate::tokens::{DecodedToken, decode_tokens};
use semtok_core::{HighlightBuckets, OffsetLookup, SemanticCategory, TextRange};

/// Result of one bucketing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketOutcome {
    /// The per-category ranges, replacing any previous set for this document version.
    pub buckets: HighlightBuckets,
    /// Tokens dropped because their position could not be converted (stale snapshot).
    pub skipped: usize,
}

/// Classify one decoded token. Unclassified tokens yield `None` and are dropped.
pub fn classify_token(
    resolver: &CategoryResolver,
    token: DecodedToken,
) -> Option<(SemanticCategory, DecodedToken)> {
    resolver
        .resolve(token.token_type)
        .map(|category| (category, token))
}

/// Decode, classify, and bucket one full response's `data` sequence.
///
/// `offsets` is the line/column→offset collaborator for the current document snapshot
/// (use [`crate::DocumentOffsets`] for UTF-16 wire columns). Ranges are appended in
/// decode order, preserving the protocol's non-decreasing position guarantee; zero-width
/// ranges are dropped silently.
pub fn bucket_tokens<L: OffsetLookup>(
    data: &[u32],
    resolver: &CategoryResolver,
    offsets: &L,
) -> BucketOutcome {
    let mut outcome = BucketOutcome::default();

    for token in decode_tokens(data) {
        let Some((category, token)) = classify_token(resolver, token) else {
            continue;
        };

        let line = token.line as usize;
        let start = offsets.char_offset(line, token.column as usize);
        let end = offsets.char_offset(line, token.column as usize + token.length as usize);
        let (Some(start), Some(end)) = (start, end) else {
            outcome.skipped += 1;
            continue;
        };
        if start >= end {
            continue;
        }

        outcome.buckets.push(category, TextRange::new(start, end));
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::DocumentOffsets;
    use pretty_assertions::assert_eq;
    use semtok_core::LineIndex;

    #[test]
    fn classify_drops_unclassified() {
        let resolver = CategoryResolver::fallback();
        let token = DecodedToken {
            line: 0,
            column: 0,
            length: 4,
            token_type: 3,
            token_modifiers: 0,
        };
        assert_eq!(
            classify_token(&resolver, token),
            Some((SemanticCategory::Function, token))
        );

        let unknown = DecodedToken {
            token_type: 42,
            ..token
        };
        assert_eq!(classify_token(&resolver, unknown), None);
    }

    #[test]
    fn end_to_end_fixed_scheme() {
        let index = LineIndex::from_text("main i        \nfuture line");
        let offsets = DocumentOffsets::new(&index);
        let resolver = CategoryResolver::fallback();

        // (0,0,4,3,_) -> Function line 0 col 0 len 4
        // (0,5,1,2,_) -> Parameter line 0 col 5 len 1
        // (1,0,6,8,_) -> Struct line 1 col 0 len 6
        let data = [0, 0, 4, 3, 0, 0, 5, 1, 2, 0, 1, 0, 6, 8, 0];
        let outcome = bucket_tokens(&data, &resolver, &offsets);

        assert_eq!(outcome.skipped, 0);
        assert_eq!(
            outcome.buckets.ranges(SemanticCategory::Function),
            &[TextRange::new(0, 4)]
        );
        assert_eq!(
            outcome.buckets.ranges(SemanticCategory::Parameter),
            &[TextRange::new(5, 6)]
        );
        // Line 1 starts at char offset 15.
        assert_eq!(
            outcome.buckets.ranges(SemanticCategory::Struct),
            &[TextRange::new(15, 21)]
        );
        assert_eq!(outcome.buckets.len(), 3);
    }

    #[test]
    fn stale_positions_are_skipped_and_counted() {
        let index = LineIndex::from_text("short");
        let offsets = DocumentOffsets::new(&index);
        let resolver = CategoryResolver::fallback();

        // First token fits; second points at a line that no longer exists; third fits.
        let data = [0, 0, 5, 1, 0, 3, 0, 2, 2, 0, 0, 1, 1, 3, 0];
        let outcome = bucket_tokens(&data, &resolver, &offsets);

        assert_eq!(outcome.skipped, 2);
        assert_eq!(
            outcome.buckets.ranges(SemanticCategory::Variable),
            &[TextRange::new(0, 5)]
        );
        assert!(outcome
            .buckets
            .ranges(SemanticCategory::Parameter)
            .is_empty());
    }

    #[test]
    fn zero_length_tokens_are_dropped_silently() {
        let index = LineIndex::from_text("abc");
        let offsets = DocumentOffsets::new(&index);
        let resolver = CategoryResolver::fallback();

        let outcome = bucket_tokens(&[0, 1, 0, 1, 0], &resolver, &offsets);
        assert_eq!(outcome.skipped, 0);
        assert!(outcome.buckets.is_empty());
    }

    #[test]
    fn unclassified_codes_never_reach_a_bucket() {
        let index = LineIndex::from_text("abcdef");
        let offsets = DocumentOffsets::new(&index);
        let resolver = CategoryResolver::fallback();

        // Codes 4, 5, 7 have no fixed mapping.
        let data = [0, 0, 2, 4, 0, 0, 1, 2, 5, 0, 0, 1, 2, 7, 0];
        let outcome = bucket_tokens(&data, &resolver, &offsets);
        assert!(outcome.buckets.is_empty());
        assert_eq!(outcome.skipped, 0);
    }
}
