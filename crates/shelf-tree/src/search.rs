//! Ranked title search over the reading sequence.
//!
//! Scoring, with title and query lower-cased:
//! - exact title match scores 1000
//! - a title containing the query scores 500 plus a bonus for short titles
//! - otherwise points accumulate from the folder path, word-boundary matches
//!   and a fuzzy in-order character walk over the title
//!
//! A fuzzy hit only counts when every query character was found in order.

use regex::Regex;
use serde::Serialize;

use crate::sequence::TutorialEntry;

/// A matched page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Page path.
    pub page: String,
    /// Display title.
    pub title: String,
    /// Enclosing folders joined with ` > `.
    pub folder_path: String,
    /// Ranking score (higher is better).
    pub score: i64,
}

/// Compiled search query.
struct Query {
    text: String,
    chars: Vec<char>,
    words: Vec<Regex>,
}

impl Query {
    fn new(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        let words = text
            .split(' ')
            .filter(|word| word.chars().count() > 2)
            .filter_map(|word| Regex::new(&format!(r"(?i)\b{}", regex::escape(word))).ok())
            .collect();
        Self {
            chars: text.chars().collect(),
            text,
            words,
        }
    }
}

/// Search the sequence for `query`.
///
/// Returns hits with a positive score, best first. Equal scores keep reading
/// order. A blank query returns nothing.
pub fn search(sequence: &[TutorialEntry], query: &str) -> Vec<SearchHit> {
    let query = Query::new(query);
    if query.text.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = sequence
        .iter()
        .filter_map(|entry| {
            let title = entry.title.to_lowercase();
            let mut full_path = entry.folders.clone();
            full_path.push(entry.title.clone());
            let full_path = full_path.join(" ").to_lowercase();

            let score = score(&title, &full_path, &query);
            (score > 0).then(|| SearchHit {
                page: entry.page.clone(),
                title: entry.title.clone(),
                folder_path: entry.folder_path(),
                score,
            })
        })
        .collect();

    // Stable sort keeps reading order for ties
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}

/// Score a lower-cased title and full path against a query.
fn score(title: &str, full_path: &str, query: &Query) -> i64 {
    if title == query.text {
        return 1000;
    }
    if title.contains(&query.text) {
        let len = i64::try_from(title.chars().count()).unwrap_or(i64::MAX);
        return 500 + (100 - len);
    }

    let mut score = 0;
    if full_path.contains(&query.text) {
        score += 200;
    }

    for word in &query.words {
        if word.is_match(title) {
            score += 50;
        }
        if word.is_match(full_path) {
            score += 25;
        }
    }

    let mut matched = 0;
    let mut run = 0i64;
    for c in title.chars() {
        if matched == query.chars.len() {
            break;
        }
        if c == query.chars[matched] {
            score += 2;
            run += 1;
            matched += 1;
        } else {
            if run > 2 {
                score += run * 5;
            }
            run = 0;
        }
    }

    if matched == query.chars.len() { score } else { 0 }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(page: &str, title: &str, folders: &[&str]) -> TutorialEntry {
        TutorialEntry {
            page: page.to_owned(),
            title: title.to_owned(),
            folders: folders.iter().map(|f| (*f).to_owned()).collect(),
        }
    }

    fn sequence() -> Vec<TutorialEntry> {
        vec![
            entry("go/concurrency/channels", "Channels", &["Go", "Concurrency"]),
            entry("go/concurrency/channel-patterns", "Channel Patterns", &["Go", "Concurrency"]),
            entry("rust/error-handling", "Error Handling", &["Rust"]),
            entry("go/intro", "Intro", &["Go"]),
        ]
    }

    #[test]
    fn test_exact_match_scores_highest() {
        let query = Query::new("Channels");
        assert_eq!(score("channels", "go concurrency channels", &query), 1000);
    }

    #[test]
    fn test_contains_prefers_short_titles() {
        let query = Query::new("channel");
        assert_eq!(score("channels", "", &query), 500 + 100 - 8);
        assert_eq!(score("channel patterns", "", &query), 500 + 100 - 16);
    }

    #[test]
    fn test_fuzzy_requires_all_chars() {
        // e, h in order within "error handling"
        let query = Query::new("eh");
        assert_eq!(score("error handling", "rust error handling", &query), 4);

        let query = Query::new("xyz");
        assert_eq!(score("error handling", "rust error handling", &query), 0);
    }

    #[test]
    fn test_fuzzy_run_bonus() {
        // "err" matches as a run of 3, broken by 'o'
        let query = Query::new("errh");
        // 4 chars matched: 8, run of 3 broken: 15
        assert_eq!(score("error handling", "", &query), 8 + 15);
    }

    #[test]
    fn test_folder_path_and_word_bonus() {
        // Query matches the folder path but is not a title subsequence
        let query = Query::new("rust");
        assert_eq!(score("error handling", "rust error handling", &query), 0);

        // Folder and word bonuses do not rescue a failed fuzzy walk
        let query = Query::new("go intro");
        assert_eq!(score("intro", "go intro", &query), 0);
        let query = Query::new("intro");
        assert_eq!(score("intro", "go intro", &query), 1000);
    }

    #[test]
    fn test_search_ranks_exact_then_contains() {
        let hits = search(&sequence(), "channels");
        let ranked: Vec<_> = hits.iter().map(|h| (h.page.as_str(), h.score)).collect();
        // "channel" run of 7 plus the trailing 's' of "patterns"
        assert_eq!(
            ranked,
            vec![
                ("go/concurrency/channels", 1000),
                ("go/concurrency/channel-patterns", 16 + 35),
            ]
        );

        let hits = search(&sequence(), "channel");
        let pages: Vec<_> = hits.iter().map(|h| h.page.as_str()).collect();
        assert_eq!(
            pages,
            vec!["go/concurrency/channels", "go/concurrency/channel-patterns"]
        );
        assert_eq!(hits[0].folder_path, "Go > Concurrency");
    }

    #[test]
    fn test_search_blank_query() {
        assert!(search(&sequence(), "   ").is_empty());
        assert!(search(&sequence(), "").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let hits = search(&sequence(), "ERROR");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Error Handling");
    }
}
