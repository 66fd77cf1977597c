//! Parser for the gmir text format.

mod block;
mod error;
mod function;
mod instructions;
mod primitives;
mod whitespace;

use error::parse_error;
pub use error::ParseError;
use function::{assemble, parse_function_internal};

use crate::function::Function;

/// Parse a function from IR text.
pub fn parse_function(input: &str) -> Result<Function, ParseError> {
    let trimmed = input.trim();
    match parse_function_internal(trimmed) {
        Ok((remaining, parsed)) => {
            if remaining.trim().is_empty() {
                assemble(parsed)
            } else {
                Err(parse_error(
                    trimmed,
                    remaining,
                    &alloc::format!("Unexpected input remaining: {}", remaining),
                ))
            }
        }
        Err(e) => Err(parse_error(
            trimmed,
            trimmed,
            &alloc::format!("Parse error: {:?}", e),
        )),
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_parse_function_empty() {
        assert!(parse_function("").is_err());
    }

    #[test]
    fn test_parse_function_invalid_syntax() {
        assert!(parse_function("invalid").is_err());
    }

    #[test]
    fn test_parse_function_missing_brace() {
        assert!(parse_function("function {\nblock0:\n    RET\n").is_err());
    }

    #[test]
    fn test_parse_function_trailing_garbage() {
        assert!(parse_function("function {\nblock0:\n    RET\n} trailing").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let text = "function @lower {\nblock0:\n    %0 = G_FRAME_INDEX p64, 1\n    %1 = G_ADD s32, %2, %3 !7\n    BR block1\nblock1:\n    %4 = COPY %1\n    RET\n}\n";
        let func = parse_function(text).unwrap();
        assert_eq!(func.to_string(), text);
        // And the printed form parses back to the same text again.
        let again = parse_function(&func.to_string()).unwrap();
        assert_eq!(again.to_string(), text);
    }
}
