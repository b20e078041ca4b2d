//! Case-count policy shared by property suites.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const PROPTEST_CASES_ENV_KEY: &str = "TOPOGEN_PROPTEST_CASES";

/// Returns the number of cases each property should run.
///
/// Reads [`PROPTEST_CASES_ENV_KEY`]; unset, unparsable, or zero values fall
/// back to `default_cases`.
///
/// # Examples
/// ```
/// use topogen_test_support::property::case_count;
///
/// assert!(case_count(32) > 0);
/// ```
#[must_use]
pub fn case_count(default_cases: u32) -> u32 {
    match env::var(PROPTEST_CASES_ENV_KEY) {
        Ok(raw) => parse_cases(&raw).unwrap_or_else(|| {
            tracing::warn!(
                env = PROPTEST_CASES_ENV_KEY,
                raw = %raw,
                "invalid property case override; using default",
            );
            default_cases
        }),
        Err(_) => default_cases,
    }
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|&cases| cases > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("64", Some(64))]
    #[case(" 8 ", Some(8))]
    #[case("0", None)]
    #[case("many", None)]
    fn parses_case_overrides(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_cases(raw), expected);
    }
}
