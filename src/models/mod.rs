pub mod prefix;
pub mod word;

pub use prefix::Prefix;
pub use word::{SuggestionList, WordEntry};
