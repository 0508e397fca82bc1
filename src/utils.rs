use std::collections::HashSet;
use std::hash::Hash;

/// Strip trailing character from string
pub fn strip_end(s: &str, c: char) -> String {
    s.trim_end_matches(c).to_string()
}

/// Keep the first occurrence of every item, preserving order
pub fn dedup_preserving_order<T>(items: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_end() {
        assert_eq!(strip_end("https://api.datamuse.com//", '/'), "https://api.datamuse.com");
        assert_eq!(strip_end("http://localhost", '/'), "http://localhost");
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let merged = dedup_preserving_order(["cat", "car", "cart", "cat"]);
        assert_eq!(merged, vec!["cat", "car", "cart"]);
    }

    #[test]
    fn test_dedup_empty() {
        let merged: Vec<&str> = dedup_preserving_order(Vec::new());
        assert!(merged.is_empty());
    }
}
