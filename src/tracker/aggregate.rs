//! Hit Aggregator
//!
//! Count-by-key summaries over a (usually filtered) hit list. Every grouping
//! keeps keys in first-seen order; the leaderboard reorders by count with a
//! stable sort so ties keep that order.

use crate::storage::Hit;
use serde::Serialize;
use std::collections::HashMap;

/// Default number of leaderboard entries
pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;

/// One key and how many hits carried it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub key: String,
    pub count: usize,
}

impl CountEntry {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Group hits by a key and count them, in first-seen key order
pub fn count_by<'a, I, F>(hits: I, key: F) -> Vec<CountEntry>
where
    I: IntoIterator<Item = &'a Hit>,
    F: Fn(&'a Hit) -> &'a str,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<CountEntry> = Vec::new();

    for hit in hits {
        let k = key(hit);
        match positions.get(k) {
            Some(&idx) => entries[idx].count += 1,
            None => {
                positions.insert(k, entries.len());
                entries.push(CountEntry::new(k, 1));
            }
        }
    }

    entries
}

/// Hits per reporter name
pub fn per_user<'a>(hits: impl IntoIterator<Item = &'a Hit>) -> Vec<CountEntry> {
    count_by(hits, Hit::name)
}

/// Hits per URL
pub fn per_url<'a>(hits: impl IntoIterator<Item = &'a Hit>) -> Vec<CountEntry> {
    count_by(hits, Hit::url)
}

/// Hits per day, keyed by the timestamp text before its first comma
pub fn per_day<'a>(hits: impl IntoIterator<Item = &'a Hit>) -> Vec<CountEntry> {
    count_by(hits, Hit::day)
}

/// Per-URL counts, highest first, ties in first-seen order
pub fn ranked_urls<'a>(hits: impl IntoIterator<Item = &'a Hit>) -> Vec<CountEntry> {
    let mut ranked = per_url(hits);
    // sort_by is stable
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Top `limit` URLs by hit count
pub fn leaderboard<'a>(hits: impl IntoIterator<Item = &'a Hit>, limit: usize) -> Vec<CountEntry> {
    let mut ranked = ranked_urls(hits);
    ranked.truncate(limit);
    ranked
}

/// URL with the most hits, `None` when there are no hits
pub fn most_visited<'a>(hits: impl IntoIterator<Item = &'a Hit>) -> Option<CountEntry> {
    ranked_urls(hits).into_iter().next()
}

/// URL with the fewest hits, `None` when there are no hits
pub fn least_visited<'a>(hits: impl IntoIterator<Item = &'a Hit>) -> Option<CountEntry> {
    ranked_urls(hits).pop()
}

/// All derived aggregates for one hit selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub per_user: Vec<CountEntry>,
    pub per_url: Vec<CountEntry>,
    pub per_day: Vec<CountEntry>,
    pub leaderboard: Vec<CountEntry>,
    pub most_visited: Option<CountEntry>,
    pub least_visited: Option<CountEntry>,
}

impl Summary {
    /// Compute every aggregate from the given hits
    pub fn compute(hits: &[&Hit], leaderboard_size: usize) -> Self {
        let ranked = ranked_urls(hits.iter().copied());

        Self {
            total: hits.len(),
            per_user: per_user(hits.iter().copied()),
            per_url: per_url(hits.iter().copied()),
            per_day: per_day(hits.iter().copied()),
            leaderboard: ranked.iter().take(leaderboard_size).cloned().collect(),
            most_visited: ranked.first().cloned(),
            least_visited: ranked.last().cloned(),
        }
    }

    /// True when the selection held no hits
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hits() -> Vec<Hit> {
        vec![
            Hit::new("A", "http://x", "1/1/2024, 10:00:00 AM"),
            Hit::new("B", "http://x", "1/1/2024, 11:00:00 AM"),
            Hit::new("A", "http://y", "1/2/2024, 9:00:00 AM"),
        ]
    }

    fn pairs(entries: &[CountEntry]) -> Vec<(&str, usize)> {
        entries.iter().map(|e| (e.key.as_str(), e.count)).collect()
    }

    #[test]
    fn test_worked_example() {
        let hits = sample_hits();

        assert_eq!(pairs(&per_user(&hits)), vec![("A", 2), ("B", 1)]);
        assert_eq!(pairs(&per_url(&hits)), vec![("http://x", 2), ("http://y", 1)]);
        assert_eq!(pairs(&per_day(&hits)), vec![("1/1/2024", 2), ("1/2/2024", 1)]);
        assert_eq!(
            leaderboard(&hits, 1),
            vec![CountEntry::new("http://x", 2)]
        );
    }

    #[test]
    fn test_counts_sum_to_input_size() {
        let hits: Vec<Hit> = (0..37)
            .map(|i| {
                Hit::new(
                    format!("user{}", i % 4),
                    format!("http://site/{}", i % 7),
                    format!("1/{}/2024, 10:00:00 AM", i % 3 + 1),
                )
            })
            .collect();

        for entries in [per_user(&hits), per_url(&hits), per_day(&hits)] {
            assert_eq!(entries.iter().map(|e| e.count).sum::<usize>(), hits.len());
        }

        for entry in per_url(&hits) {
            let expected = hits.iter().filter(|h| h.url() == entry.key).count();
            assert_eq!(entry.count, expected);
        }
    }

    #[test]
    fn test_per_day_without_comma_uses_whole_time() {
        let hits = vec![
            Hit::new("A", "http://x", "2024-01-01 10:00"),
            Hit::new("A", "http://x", "2024-01-01 11:00"),
        ];
        assert_eq!(
            pairs(&per_day(&hits)),
            vec![("2024-01-01 10:00", 1), ("2024-01-01 11:00", 1)]
        );
    }

    #[test]
    fn test_leaderboard_is_stable() {
        let hits = vec![
            Hit::new("A", "http://c", "t"),
            Hit::new("A", "http://a", "t"),
            Hit::new("A", "http://b", "t"),
            Hit::new("A", "http://b", "t"),
            Hit::new("A", "http://a", "t"),
            Hit::new("A", "http://d", "t"),
        ];

        let board = leaderboard(&hits, 10);
        assert_eq!(
            pairs(&board),
            vec![("http://a", 2), ("http://b", 2), ("http://c", 1), ("http://d", 1)]
        );
        assert!(board.windows(2).all(|w| w[0].count >= w[1].count));

        assert_eq!(leaderboard(&hits, 2).len(), 2);
        assert_eq!(most_visited(&hits), Some(CountEntry::new("http://a", 2)));
        assert_eq!(least_visited(&hits), Some(CountEntry::new("http://d", 1)));
    }

    #[test]
    fn test_empty_input_reports_no_data() {
        let hits: Vec<Hit> = Vec::new();
        assert!(per_user(&hits).is_empty());
        assert!(leaderboard(&hits, 5).is_empty());
        assert_eq!(most_visited(&hits), None);
        assert_eq!(least_visited(&hits), None);

        let summary = Summary::compute(&[], DEFAULT_LEADERBOARD_SIZE);
        assert!(summary.is_empty());
        assert_eq!(summary.most_visited, None);
        assert_eq!(summary.least_visited, None);
    }

    #[test]
    fn test_summary_matches_functions() {
        let hits = sample_hits();
        let refs: Vec<&Hit> = hits.iter().collect();
        let summary = Summary::compute(&refs, 1);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.per_user, per_user(&hits));
        assert_eq!(summary.per_day, per_day(&hits));
        assert_eq!(summary.leaderboard, leaderboard(&hits, 1));
        assert_eq!(summary.most_visited, most_visited(&hits));
        assert_eq!(summary.least_visited, Some(CountEntry::new("http://y", 1)));
    }

    #[test]
    fn test_summary_of_filtered_hits() {
        use crate::tracker::HitFilter;

        let hits = sample_hits();
        let filtered = HitFilter::all().name("nobody").apply(&hits);
        let summary = Summary::compute(&filtered, DEFAULT_LEADERBOARD_SIZE);

        assert!(summary.is_empty());
        assert!(summary.per_url.is_empty());
        assert!(summary.leaderboard.is_empty());
    }
}
