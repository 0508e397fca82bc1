use crate::error::FetchError;
use crate::models::{Prefix, SuggestionList};
use crate::upstream::DatamuseClient;
use crate::utils::dedup_preserving_order;

/// Default number of suggestions returned per prefix
pub const DEFAULT_MAX_SUGGESTIONS: usize = 20;

/// Resolves a prefix into a merged suggestion list from both upstream lookups
#[derive(Debug, Clone)]
pub struct SuggestionFetcher {
    client: DatamuseClient,
    max_suggestions: usize,
}

impl SuggestionFetcher {
    pub fn new(client: DatamuseClient, max_suggestions: usize) -> Self {
        Self {
            client,
            max_suggestions,
        }
    }

    /// Query completion and sounds-like lookups concurrently and merge them.
    ///
    /// Either lookup failing fails the whole fetch.
    pub async fn fetch(&self, prefix: &Prefix) -> Result<SuggestionList, FetchError> {
        let (completions, sounds_like) = futures::try_join!(
            self.client.complete(prefix.as_str()),
            self.client.sounds_like(prefix.as_str())
        )?;

        Ok(merge_suggestions(
            prefix.as_str(),
            completions,
            sounds_like,
            self.max_suggestions,
        ))
    }
}

/// Completions first, then sounds-like words that literally start with
/// `prefix`, deduplicated and capped at `limit`.
pub fn merge_suggestions(
    prefix: &str,
    completions: Vec<String>,
    sounds_like: Vec<String>,
    limit: usize,
) -> SuggestionList {
    let anchored = sounds_like
        .into_iter()
        .filter(|word| word.starts_with(prefix));

    dedup_preserving_order(completions.into_iter().chain(anchored))
        .into_iter()
        .take(limit)
        .collect()
}
