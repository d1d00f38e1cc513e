//! Query relevance filter for raw candidate articles.
//!
//! A candidate is admitted when enough query tokens appear as substrings of
//! its lowercased title, description and content. Queries with three or
//! fewer tokens must match every token; longer queries must match
//! `max(1, floor(0.7 × token_count))` tokens.
//!
//! Tokens of two characters or fewer never match but still count toward
//! the token total, so a query made only of short tokens admits nothing.

use crate::config::{RELEVANCE_MATCH_RATIO, RELEVANCE_MIN_TOKEN_CHARS, RELEVANCE_STRICT_TOKEN_LIMIT};
use crate::types::Article;

/// A query tokenised once and applied to many candidates.
#[derive(Debug, Clone)]
pub struct RelevanceQuery {
    tokens: Vec<String>,
    required: usize,
}

impl RelevanceQuery {
    /// Tokenise `query` on whitespace and lowercase each token.
    pub fn new(query: &str) -> Self {
        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        let required = required_matches(tokens.len());
        Self { tokens, required }
    }

    /// Returns `true` when the query is empty or whitespace-only, in which
    /// case every candidate is admitted.
    pub fn is_unrestricted(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The lowercased query tokens, including short ones.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of matching tokens a candidate needs to be admitted.
    pub fn required_matches(&self) -> usize {
        self.required
    }

    /// Count the tokens longer than two characters found in `text`.
    ///
    /// `text` must already be lowercase.
    pub fn count_matches(&self, text: &str) -> usize {
        self.tokens
            .iter()
            .filter(|t| t.chars().count() > RELEVANCE_MIN_TOKEN_CHARS && text.contains(t.as_str()))
            .count()
    }

    /// Decide whether a candidate with the given fields is on topic.
    pub fn admits_text(&self, title: &str, description: &str, content: &str) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        let blob = format!("{title} {description} {content}").to_lowercase();
        let matched = self.count_matches(&blob);
        let admitted = matched >= self.required;
        if !admitted {
            tracing::trace!(
                matched,
                required = self.required,
                title,
                "candidate rejected as off-topic"
            );
        }
        admitted
    }

    /// Decide whether `article` is on topic.
    pub fn admits(&self, article: &Article) -> bool {
        self.admits_text(&article.title, &article.description, &article.content)
    }
}

/// Check if `article` is relevant to `query`.
///
/// Convenience wrapper that tokenises the query on every call; prefer
/// [`RelevanceQuery`] when filtering many candidates against one query.
pub fn is_relevant(article: &Article, query: &str) -> bool {
    RelevanceQuery::new(query).admits(article)
}

/// Filter `candidates` down to those relevant to `query`, preserving order.
pub fn filter_relevant(candidates: Vec<Article>, query: &str) -> Vec<Article> {
    let relevance = RelevanceQuery::new(query);
    let before = candidates.len();
    let admitted: Vec<Article> = candidates
        .into_iter()
        .filter(|a| relevance.admits(a))
        .collect();
    tracing::debug!(before, after = admitted.len(), "relevance filter applied");
    admitted
}

fn required_matches(token_count: usize) -> usize {
    if token_count <= RELEVANCE_STRICT_TOKEN_LIMIT {
        token_count
    } else {
        // Truncation toward zero is the intended floor here.
        ((token_count as f64 * RELEVANCE_MATCH_RATIO) as usize).max(1)
    }
}
