//! Content validation rules shared by every blog operation.
//!
//! Blog text fields (except the title) may not contain digit characters,
//! whether they arrive as a single string or as a sequence of strings.

/// Returns true if the value contains a decimal digit anywhere.
pub fn contains_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

/// Returns true if any element of the sequence contains a decimal digit.
pub fn any_contains_digit<I, S>(values: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().any(|v| contains_digit(v.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_digit_anywhere_in_string() {
        assert!(contains_digit("abc1def"));
        assert!(contains_digit("9"));
        assert!(!contains_digit("hello world"));
        assert!(!contains_digit(""));
    }

    #[test]
    fn detects_digit_in_any_element() {
        assert!(any_contains_digit(["tech", "web3"]));
        assert!(!any_contains_digit(["tech", "life"]));
        assert!(!any_contains_digit(Vec::<String>::new()));
    }
}
