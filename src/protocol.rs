//! Count-prefixed batch format shared by all CLI modes.
//!
//! Line 1 carries a single non-negative element count `n`; the rest of the
//! input carries `n` whitespace-separated 32-bit integers in signed
//! two's-complement text form (callers sign-wrap unsigned values before
//! transmission). Values may span multiple lines and a trailing newline is
//! tolerated.

use std::io::{self, BufRead};

/// Malformed-input errors. All of them are fatal to the invocation.
#[derive(Debug)]
pub enum InputError {
    Io(io::Error),
    /// Input ended before the count line.
    MissingCount,
    /// Count line did not parse as an integer.
    InvalidCount(String),
    /// Count line parsed but was negative.
    NegativeCount(i64),
    /// A value token did not parse as a 32-bit signed integer.
    InvalidToken(String),
    /// Number of value tokens disagreed with the declared count.
    TokenCountMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Io(err) => write!(f, "failed to read input: {err}"),
            InputError::MissingCount => write!(f, "missing element count line"),
            InputError::InvalidCount(token) => write!(f, "invalid element count {token:?}"),
            InputError::NegativeCount(n) => write!(f, "element count must be non-negative, got {n}"),
            InputError::InvalidToken(token) => write!(f, "invalid 32-bit integer {token:?}"),
            InputError::TokenCountMismatch { expected, actual } => {
                write!(f, "expected {expected} values, got {actual}")
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for InputError {
    fn from(err: io::Error) -> Self {
        InputError::Io(err)
    }
}

/// Read one batch of sign-wrapped 32-bit values, reinterpreting each as its
/// unsigned bit pattern.
pub fn read_batch<R: BufRead>(input: &mut R) -> Result<Vec<u32>, InputError> {
    let mut count_line = String::new();
    if input.read_line(&mut count_line)? == 0 {
        return Err(InputError::MissingCount);
    }
    let count_token = count_line.trim();
    if count_token.is_empty() {
        return Err(InputError::MissingCount);
    }
    let declared: i64 = count_token
        .parse()
        .map_err(|_| InputError::InvalidCount(count_token.to_string()))?;
    if declared < 0 {
        return Err(InputError::NegativeCount(declared));
    }
    let expected = declared as usize;

    let mut rest = String::new();
    input.read_to_string(&mut rest)?;
    let mut values = Vec::with_capacity(expected.min(1 << 20));
    for token in rest.split_whitespace() {
        let value: i32 = token
            .parse()
            .map_err(|_| InputError::InvalidToken(token.to_string()))?;
        // Reinterpret the signed wire value as its unsigned bit pattern.
        values.push(value as u32);
    }
    if values.len() != expected {
        return Err(InputError::TokenCountMismatch {
            expected,
            actual: values.len(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use test_case::test_case;

    fn parse(input: &str) -> Result<Vec<u32>, InputError> {
        read_batch(&mut Cursor::new(input))
    }

    #[test]
    fn parses_simple_batch() {
        assert_eq!(parse("3\n1 2 3\n").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn parses_empty_batch_with_and_without_value_line() {
        assert_eq!(parse("0\n\n").unwrap(), Vec::<u32>::new());
        assert_eq!(parse("0\n").unwrap(), Vec::<u32>::new());
        assert_eq!(parse("0").unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn parses_values_spread_over_multiple_lines() {
        assert_eq!(parse("4\n1 2\n3\n4\n").unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn sign_wrapped_values_keep_their_bit_pattern() {
        assert_eq!(
            parse("3\n-1 -2147483648 2147483647\n").unwrap(),
            vec![0xffff_ffff, 0x8000_0000, 0x7fff_ffff]
        );
    }

    #[test]
    fn rejects_missing_count() {
        assert!(matches!(parse(""), Err(InputError::MissingCount)));
        assert!(matches!(parse("\n1 2\n"), Err(InputError::MissingCount)));
    }

    #[test]
    fn rejects_negative_count() {
        assert!(matches!(parse("-1\n"), Err(InputError::NegativeCount(-1))));
    }

    #[test_case("x\n1\n")]
    #[test_case("1.5\n1\n")]
    fn rejects_non_integer_count(input: &str) {
        assert!(matches!(parse(input), Err(InputError::InvalidCount(_))));
    }

    #[test_case("2\n1 x\n")]
    #[test_case("1\n3.14\n")]
    #[test_case("1\n4294967295\n"; "out of i32 range")]
    fn rejects_non_integer_token(input: &str) {
        assert!(matches!(parse(input), Err(InputError::InvalidToken(_))));
    }

    #[test_case("3\n1 2\n", 3, 2)]
    #[test_case("1\n1 2 3\n", 1, 3)]
    #[test_case("2\n\n", 2, 0)]
    fn rejects_token_count_mismatch(input: &str, expected: usize, actual: usize) {
        match parse(input) {
            Err(InputError::TokenCountMismatch {
                expected: e,
                actual: a,
            }) => {
                assert_eq!((e, a), (expected, actual));
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }
}
