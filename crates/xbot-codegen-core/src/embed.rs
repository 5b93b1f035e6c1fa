//! # Binary Embedding
//!
//! Formats bytes as a C array initializer so the canonical CBOR schema can be
//! compiled into firmware. The embedded target never needs a CBOR parser to
//! report its interface; it copies the array verbatim.

/// Number of byte tokens on each line of the literal.
pub const BYTES_PER_LINE: usize = 8;

/// Render `data` as a brace-enclosed initializer list.
///
/// Each byte is written as `0xHH` (upper-case hex), eight per line with a
/// two-space indent. Tokens are separated by `", "`, including across line
/// breaks, except after the final byte. The literal ends with `};`.
///
/// ```
/// use xbot_codegen_core::embed::binary2c_array;
///
/// assert_eq!(binary2c_array(&[0xA1, 0x02]), "{\n  0xA1, 0x02\n};");
/// assert_eq!(binary2c_array(&[]), "{\n};");
/// ```
pub fn binary2c_array(data: &[u8]) -> String {
    let mut out = String::with_capacity(4 + data.len() * 6 + data.len() / BYTES_PER_LINE * 3);
    out.push_str("{\n");
    let last = data.len().saturating_sub(1);
    for (line, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        out.push_str("  ");
        for (offset, byte) in chunk.iter().enumerate() {
            out.push_str(&format!("0x{byte:02X}"));
            if line * BYTES_PER_LINE + offset < last {
                out.push_str(", ");
            }
        }
        out.push('\n');
    }
    out.push_str("};");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(binary2c_array(&[]), "{\n};");
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(binary2c_array(&[0x0A]), "{\n  0x0A\n};");
    }

    #[test]
    fn test_full_line_has_trailing_separator_before_next_line() {
        let data: Vec<u8> = (0..9).collect();
        assert_eq!(
            binary2c_array(&data),
            "{\n  0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, \n  0x08\n};"
        );
    }

    #[test]
    fn test_exact_multiple_of_eight() {
        let data = [0xFFu8; 16];
        let out = binary2c_array(&data);
        assert_eq!(out.lines().count(), 4);
        assert!(out.ends_with("0xFF\n};"));
        assert!(!out.contains("0xFF\n};,"));
    }

    #[test]
    fn test_upper_case_hex() {
        assert_eq!(binary2c_array(&[0xab, 0xcd]), "{\n  0xAB, 0xCD\n};");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn body_lines(out: &str) -> Vec<&str> {
        let lines: Vec<&str> = out.lines().collect();
        lines[1..lines.len() - 1].to_vec()
    }

    proptest! {
        /// One token per byte, in order.
        #[test]
        fn token_count_matches_length(data in prop::collection::vec(any::<u8>(), 0..200)) {
            let out = binary2c_array(&data);
            let tokens: Vec<u8> = out
                .split(|c: char| c == ',' || c.is_whitespace() || c == '{' || c == '}' || c == ';')
                .filter(|t| !t.is_empty())
                .map(|t| u8::from_str_radix(t.trim_start_matches("0x"), 16).unwrap())
                .collect();
            prop_assert_eq!(tokens, data);
        }

        /// ceil(L / 8) body lines, each holding at most eight tokens.
        #[test]
        fn line_count(data in prop::collection::vec(any::<u8>(), 0..200)) {
            let out = binary2c_array(&data);
            let body = body_lines(&out);
            prop_assert_eq!(body.len(), data.len().div_ceil(BYTES_PER_LINE));
            for line in body {
                prop_assert!(line.matches("0x").count() <= BYTES_PER_LINE);
            }
        }

        /// No separator follows the final token.
        #[test]
        fn no_trailing_comma(data in prop::collection::vec(any::<u8>(), 1..200)) {
            let out = binary2c_array(&data);
            let last = format!("0x{:02X}\n}};", data[data.len() - 1]);
            prop_assert!(out.ends_with(&last));
            prop_assert_eq!(out.matches(',').count(), data.len() - 1);
        }
    }
}
