//! Near-duplicate removal by title word overlap.
//!
//! Articles are visited in collection order. Each candidate title is
//! lowercased and split on whitespace, then compared against the word set
//! of every previously accepted title. When the shared words exceed 70% of
//! the candidate's own word count the candidate is dropped. The first
//! report of a story always wins.

use std::collections::HashSet;

use crate::config::DUPLICATE_TITLE_RATIO;
use crate::types::Article;

/// Remove near-duplicate articles using the default overlap ratio.
///
/// Surviving articles keep their relative input order.
pub fn deduplicate(articles: Vec<Article>) -> Vec<Article> {
    deduplicate_with_ratio(articles, DUPLICATE_TITLE_RATIO)
}

/// Remove near-duplicate articles using an explicit overlap `ratio`.
///
/// A candidate is a duplicate of an accepted title when
/// `|shared words| > ratio × candidate word count`.
pub fn deduplicate_with_ratio(articles: Vec<Article>, ratio: f64) -> Vec<Article> {
    let before = articles.len();
    let mut accepted_words: Vec<HashSet<String>> = Vec::new();
    let mut unique: Vec<Article> = Vec::with_capacity(articles.len());

    for article in articles {
        let title = article.title.to_lowercase();
        let words: Vec<&str> = title.split_whitespace().collect();
        let limit = words.len() as f64 * ratio;
        let candidate: HashSet<&str> = words.iter().copied().collect();

        let absorbed_by = accepted_words.iter().position(|seen| {
            let shared = candidate.iter().filter(|w| seen.contains(**w)).count();
            shared as f64 > limit
        });

        match absorbed_by {
            Some(index) => {
                tracing::debug!(
                    title = %article.title,
                    kept_index = index,
                    "dropping near-duplicate title"
                );
            }
            None => {
                accepted_words.push(candidate.into_iter().map(str::to_owned).collect());
                unique.push(article);
            }
        }
    }

    tracing::debug!(before, after = unique.len(), "title deduplication applied");
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceApi;

    fn make_article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: String::new(),
            content: String::new(),
            source_name: "AP".to_string(),
            source_api: SourceApi::NewsData,
            published_at: String::new(),
            url: None,
            author: None,
        }
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn unique_titles_pass_through() {
        let articles = vec![
            make_article("Budget session begins"),
            make_article("Football final tonight"),
        ];
        let deduped = deduplicate(articles);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn five_of_six_shared_words_is_duplicate() {
        let articles = vec![
            make_article("Central bank raises interest rates again"),
            make_article("Central bank raises interest rates sharply"),
        ];
        let deduped = deduplicate(articles);
        assert_eq!(titles(&deduped), vec!["Central bank raises interest rates again"]);
    }

    #[test]
    fn first_occurrence_wins() {
        let articles = vec![
            make_article("Storm hits coast overnight"),
            make_article("Storm hits coast overnight"),
            make_article("storm HITS coast overnight"),
        ];
        let deduped = deduplicate(articles);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].title, "Storm hits coast overnight");
    }

    #[test]
    fn exactly_seventy_percent_is_not_duplicate() {
        // 7 of 10 words shared: 7 > 7.0 is false.
        let articles = vec![
            make_article("a b c d e f g x y z"),
            make_article("a b c d e f g p q r"),
        ];
        let deduped = deduplicate(articles);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn ratio_is_relative_to_candidate_length() {
        // The short candidate is covered by the long accepted title.
        let articles = vec![
            make_article("Parliament budget session begins today in capital"),
            make_article("Budget session begins"),
        ];
        let deduped = deduplicate(articles);
        assert_eq!(deduped.len(), 1);

        // Reversed order: the long candidate only shares 3 of 7 words.
        let articles = vec![
            make_article("Budget session begins"),
            make_article("Parliament budget session begins today in capital"),
        ];
        let deduped = deduplicate(articles);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn order_preserved() {
        let articles = vec![
            make_article("Alpha story one"),
            make_article("Bravo story two"),
            make_article("Alpha story one"),
            make_article("Charlie story three"),
        ];
        let deduped = deduplicate(articles);
        assert_eq!(
            titles(&deduped),
            vec!["Alpha story one", "Bravo story two", "Charlie story three"]
        );
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(deduplicate(vec![]).is_empty());
    }

    #[test]
    fn empty_title_is_never_a_duplicate() {
        let articles = vec![make_article(""), make_article("")];
        let deduped = deduplicate(articles);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn running_twice_removes_nothing_more() {
        let articles = vec![
            make_article("Rates rise again"),
            make_article("Rates rise again today"),
            make_article("Markets fall on rates news"),
            make_article("Markets fall on rate news"),
        ];
        let once = deduplicate(articles);
        let twice = deduplicate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn custom_ratio() {
        let articles = vec![
            make_article("one two three four"),
            make_article("one two five six"),
        ];
        // 2 shared of 4: duplicate at ratio 0.4, not at 0.7.
        assert_eq!(deduplicate_with_ratio(articles.clone(), 0.4).len(), 1);
        assert_eq!(deduplicate_with_ratio(articles, 0.7).len(), 2);
    }
}
