//! Property test: relative re-encoding followed by decoding reproduces any
//! position-sorted absolute token sequence exactly.

use proptest::prelude::*;
use semtok_lsp::{DecodedToken, decode_tokens, encode_tokens};

/// Build a position-sorted absolute token sequence from raw step values, independently
/// of the decoder under test.
fn absolute_tokens(steps: &[(u32, u32, u32, u32, u32)]) -> Vec<DecodedToken> {
    let mut tokens = Vec::with_capacity(steps.len());
    let mut line = 0u32;
    let mut column = 0u32;

    for &(line_step, column_step, length, token_type, token_modifiers) in steps {
        if line_step > 0 {
            line += line_step;
            column = column_step;
        } else {
            column += column_step;
        }
        tokens.push(DecodedToken {
            line,
            column,
            length,
            token_type,
            token_modifiers,
        });
    }

    tokens
}

proptest! {
    #[test]
    fn encode_then_decode_is_identity(
        steps in prop::collection::vec(
            (0u32..4, 0u32..64, 1u32..16, 0u32..24, 0u32..8),
            0..64,
        )
    ) {
        let tokens = absolute_tokens(&steps);
        let encoded = encode_tokens(&tokens);
        prop_assert_eq!(encoded.len(), tokens.len() * 5);

        let decoded: Vec<DecodedToken> = decode_tokens(&encoded).collect();
        prop_assert_eq!(decoded, tokens);
    }

    #[test]
    fn decoded_positions_are_non_decreasing(
        data in prop::collection::vec(0u32..32, 0..80)
    ) {
        let mut prev = None;
        for token in decode_tokens(&data) {
            if let Some((line, column)) = prev {
                prop_assert!((token.line, token.column) >= (line, column));
            }
            prev = Some((token.line, token.column));
        }
    }
}
