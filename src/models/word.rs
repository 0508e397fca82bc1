use serde::Deserialize;

/// Single result object returned by the Datamuse `/sug` and `/words` endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WordEntry {
    pub word: String,
}

/// Ordered, duplicate-free suggestions, most relevant first
pub type SuggestionList = Vec<String>;

/// Extract the words from a lookup response, keeping upstream order
pub fn words(entries: Vec<WordEntry>) -> Vec<String> {
    entries.into_iter().map(|entry| entry.word).collect()
}
