//! Paper Researcher: runs every planned query and aggregates candidate papers.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::search::SearchProvider;
use crate::workflow::models::Paper;
use crate::workflow::WorkflowError;

/// Only the top results of each query are considered.
pub const RESULTS_PER_QUERY: usize = 3;

/// Searches each query in order and collects candidates, de-duplicated by URL.
///
/// A failing query is logged and skipped; the step only fails when no query
/// produced a usable result.
pub async fn research_papers(
    search: &dyn SearchProvider,
    queries: &[String],
) -> Result<Vec<Paper>, WorkflowError> {
    let mut papers = Vec::new();
    let mut seen_urls = HashSet::new();

    for query in queries {
        let hits = match search.search(query).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Search failed for query {:?}: {}", query, e);
                continue;
            }
        };

        for hit in hits.into_iter().take(RESULTS_PER_QUERY) {
            let Some(url) = hit.link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
            else {
                continue;
            };
            if !seen_urls.insert(url.clone()) {
                continue;
            }
            papers.push(Paper {
                title: hit
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| "No Title".to_string()),
                url,
                summary: hit
                    .snippet
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| "No summary available.".to_string()),
            });
        }
    }

    if papers.is_empty() {
        return Err(WorkflowError::NoPapers);
    }

    info!(
        "Collected {} candidate papers from {} queries",
        papers.len(),
        queries.len()
    );
    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchHit;
    use crate::test_support::{hit, StubSearch};

    fn queries(items: &[&str]) -> Vec<String> {
        items.iter().map(|q| q.to_string()).collect()
    }

    #[tokio::test]
    async fn test_takes_top_three_per_query_and_dedupes_urls() {
        let search = StubSearch::with_hits(vec![
            hit("A", "https://a"),
            hit("B", "https://b"),
            hit("C", "https://c"),
            hit("D", "https://d"),
        ]);

        let papers = research_papers(&search, &queries(&["q1", "q2"]))
            .await
            .unwrap();

        let urls: Vec<&str> = papers.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a", "https://b", "https://c"]);
        assert_eq!(search.queries(), vec!["q1", "q2"]);
    }

    #[tokio::test]
    async fn test_missing_fields_get_placeholders_and_linkless_hits_are_dropped() {
        let search = StubSearch::with_hits(vec![
            SearchHit {
                title: None,
                link: Some("https://x".to_string()),
                snippet: None,
            },
            SearchHit {
                title: Some("no link".to_string()),
                link: None,
                snippet: Some("snippet".to_string()),
            },
        ]);

        let papers = research_papers(&search, &queries(&["q"])).await.unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "No Title");
        assert_eq!(papers[0].summary, "No summary available.");
    }

    #[tokio::test]
    async fn test_no_results_is_no_papers() {
        let search = StubSearch::with_hits(vec![]);
        let err = research_papers(&search, &queries(&["q1", "q2", "q3"]))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NoPapers));
        assert_eq!(search.queries().len(), 3);
    }

    #[tokio::test]
    async fn test_failing_search_is_skipped() {
        let search = StubSearch::failing();
        let err = research_papers(&search, &queries(&["q1", "q2"]))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NoPapers));
        assert_eq!(search.queries().len(), 2);
    }

    #[tokio::test]
    async fn test_one_failing_query_keeps_the_others_hits() {
        let search = StubSearch::with_hits(vec![hit("A", "https://a"), hit("B", "https://b")])
            .failing_for("q1");

        let papers = research_papers(&search, &queries(&["q1", "q2"]))
            .await
            .unwrap();

        let titles: Vec<&str> = papers.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(search.queries(), vec!["q1", "q2"]);
    }
}
