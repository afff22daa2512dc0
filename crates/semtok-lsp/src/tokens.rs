//! Semantic token stream decoding (LSP relative encoding).
//!
//! The wire form is a flat `u32` sequence in records of 5:
//! `(deltaLine, deltaStart, length, tokenType, tokenModifiers)`. Positions are encoded
//! relative to the previous token to keep the payload small; this module reconstructs
//! absolute `(line, column)` coordinates.

use serde_json::Value;

/// Number of integers per wire record.
const RECORD_LEN: usize = 5;

/// One raw 5-integer wire record, positions still relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTokenRecord {
    /// Line offset relative to the previous token.
    pub delta_line: u32,
    /// Column offset relative to the previous token (same line) or absolute column (new line).
    pub delta_start: u32,
    /// Token length in wire column units.
    pub length: u32,
    /// Type code, resolved through a legend or the fixed fallback table.
    pub token_type: u32,
    /// Modifier bit flags. Carried through, never interpreted here.
    pub token_modifiers: u32,
}

/// A token with absolute document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedToken {
    /// Absolute line (0-based).
    pub line: u32,
    /// Absolute column within the line (0-based, wire column units).
    pub column: u32,
    /// Token length in wire column units.
    pub length: u32,
    /// Raw type code.
    pub token_type: u32,
    /// Modifier bit flags, uninterpreted.
    pub token_modifiers: u32,
}

/// Iterator reconstructing absolute positions from the relative encoding.
///
/// Created by [`decode_tokens`]. Finite, single pass. A trailing partial record
/// (input length not a multiple of 5) is discarded silently.
pub struct TokenDecoder<'a> {
    records: std::slice::ChunksExact<'a, u32>,
    prev: Option<(u32, u32)>,
}

impl Iterator for TokenDecoder<'_> {
    type Item = DecodedToken;

    fn next(&mut self) -> Option<DecodedToken> {
        let chunk = self.records.next()?;
        let record = RawTokenRecord {
            delta_line: chunk[0],
            delta_start: chunk[1],
            length: chunk[2],
            token_type: chunk[3],
            token_modifiers: chunk[4],
        };

        // The single classic decode bug lives here: when delta_line > 0 the column starts
        // over from delta_start and is NOT offset by the previous token's column.
        let (line, column) = match self.prev {
            None => (record.delta_line, record.delta_start),
            Some((prev_line, prev_column)) => {
                if record.delta_line == 0 {
                    (prev_line, prev_column.saturating_add(record.delta_start))
                } else {
                    (
                        prev_line.saturating_add(record.delta_line),
                        record.delta_start,
                    )
                }
            }
        };
        self.prev = Some((line, column));

        Some(DecodedToken {
            line,
            column,
            length: record.length,
            token_type: record.token_type,
            token_modifiers: record.token_modifiers,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

/// Decode a flat `data` sequence into absolute tokens.
///
/// Emits tokens in input order; the protocol guarantees non-decreasing `(line, column)`
/// order, which the delta arithmetic preserves by construction.
pub fn decode_tokens(data: &[u32]) -> TokenDecoder<'_> {
    TokenDecoder {
        records: data.chunks_exact(RECORD_LEN),
        prev: None,
    }
}

/// Re-encode absolute tokens into the relative wire form.
///
/// Input must be sorted by `(line, column)`; this is the inverse of [`decode_tokens`]
/// and is intended for tests and test fixtures acting as servers.
pub fn encode_tokens(tokens: &[DecodedToken]) -> Vec<u32> {
    let mut data = Vec::with_capacity(tokens.len() * RECORD_LEN);
    let mut prev_line = 0u32;
    let mut prev_column = 0u32;

    for token in tokens {
        let delta_line = token.line - prev_line;
        let delta_start = if delta_line == 0 {
            token.column - prev_column
        } else {
            token.column
        };

        data.extend_from_slice(&[
            delta_line,
            delta_start,
            token.length,
            token.token_type,
            token.token_modifiers,
        ]);
        prev_line = token.line;
        prev_column = token.column;
    }

    data
}

/// Extract the flat `data` integer array from a raw `semanticTokens` response payload.
///
/// Accepts the `result` value of a `textDocument/semanticTokens/full` response
/// (`{ resultId?, data: u32[] }`). Missing `data` yields an empty sequence; non-integer
/// entries are skipped.
pub fn data_from_response(result: &Value) -> Vec<u32> {
    let Some(data_arr) = result.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut data = Vec::with_capacity(data_arr.len());
    for v in data_arr {
        if let Some(n) = v.as_u64() {
            data.push(n as u32);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn positions(data: &[u32]) -> Vec<(u32, u32, u32)> {
        decode_tokens(data)
            .map(|t| (t.line, t.column, t.length))
            .collect()
    }

    #[test]
    fn first_record_is_absolute() {
        assert_eq!(positions(&[3, 7, 2, 1, 0]), vec![(3, 7, 2)]);
    }

    #[test]
    fn same_line_accumulates_columns() {
        // Second record's column is 5 + 2 = 7, not 2.
        let data = [0, 5, 3, 1, 0, 0, 2, 4, 2, 0];
        assert_eq!(positions(&data), vec![(0, 5, 3), (0, 7, 4)]);
    }

    #[test]
    fn new_line_resets_column_base() {
        // deltaLine > 0: the column is NOT offset by the previous column.
        let data = [2, 5, 3, 1, 0, 1, 2, 4, 2, 0];
        assert_eq!(positions(&data), vec![(2, 5, 3), (3, 2, 4)]);
    }

    #[test]
    fn trailing_partial_record_is_dropped() {
        // 5k + 3 integers decode exactly k records.
        let data = [0, 0, 4, 3, 0, 1, 0, 6, 8, 0, 9, 9, 9];
        assert_eq!(positions(&data), vec![(0, 0, 4), (1, 0, 6)]);
    }

    #[test]
    fn empty_data_decodes_nothing() {
        assert_eq!(decode_tokens(&[]).count(), 0);
    }

    #[test]
    fn modifier_bits_are_carried_through() {
        let tokens: Vec<DecodedToken> = decode_tokens(&[0, 1, 2, 3, 0b101]).collect();
        assert_eq!(tokens[0].token_modifiers, 0b101);
    }

    #[test]
    fn encode_is_inverse_of_decode() {
        let original = [0, 0, 5, 12, 0, 0, 6, 5, 8, 1, 1, 0, 6, 12, 0, 4, 2, 3, 1, 0];
        let decoded: Vec<DecodedToken> = decode_tokens(&original).collect();
        assert_eq!(encode_tokens(&decoded), original.to_vec());
    }

    #[test]
    fn data_from_response_reads_flat_array() {
        let result = json!({ "resultId": "7", "data": [0, 0, 4, 3, 0] });
        assert_eq!(data_from_response(&result), vec![0, 0, 4, 3, 0]);
    }

    #[test]
    fn data_from_response_skips_non_integers() {
        let result = json!({ "data": [0, "x", 4, null, 0] });
        assert_eq!(data_from_response(&result), vec![0, 4, 0]);
    }

    #[test]
    fn data_from_response_tolerates_missing_data() {
        assert!(data_from_response(&json!({})).is_empty());
        assert!(data_from_response(&Value::Null).is_empty());
    }
}
