/// User-typed partial word, guaranteed to meet the minimum length
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefix(String);

impl Prefix {
    /// Validate a raw query value. Length is counted in chars, so `"éa"` is two long.
    pub fn parse(raw: Option<&str>, min_len: usize) -> Option<Self> {
        let raw = raw?;
        if raw.chars().count() < min_len {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_and_missing() {
        assert!(Prefix::parse(None, 2).is_none());
        assert!(Prefix::parse(Some(""), 2).is_none());
        assert!(Prefix::parse(Some("a"), 2).is_none());
    }

    #[test]
    fn test_accepts_minimum_length() {
        let prefix = Prefix::parse(Some("ap"), 2).unwrap();
        assert_eq!(prefix.as_str(), "ap");
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // "é" is two bytes but one char
        assert!(Prefix::parse(Some("é"), 2).is_none());
        assert!(Prefix::parse(Some("éa"), 2).is_some());
    }
}
