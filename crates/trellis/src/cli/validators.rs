//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute so bad
//! values are reported at parse time.

use crate::loader::MAX_VERTICES;

/// Validate a `--vertices` count against [`MAX_VERTICES`].
pub fn validate_vertex_count(s: &str) -> Result<usize, String> {
    let count: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a vertex count"))?;
    if count > MAX_VERTICES {
        return Err(format!(
            "{count} vertices exceeds the limit of {MAX_VERTICES}"
        ));
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero("0", 0)]
    #[case::padded(" 12 ", 12)]
    #[case::limit("1048576", MAX_VERTICES)]
    fn accepts_counts_up_to_limit(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(validate_vertex_count(input), Ok(expected));
    }

    #[rstest]
    #[case::over_limit("1048577")]
    #[case::huge("9223372036854775807")]
    #[case::negative("-1")]
    #[case::not_a_number("many")]
    fn rejects_invalid_counts(#[case] input: &str) {
        assert!(validate_vertex_count(input).is_err());
    }
}
