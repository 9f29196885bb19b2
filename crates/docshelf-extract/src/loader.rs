//! Concurrent catalog loading.
//!
//! Extraction for each identifier runs as its own task, bounded by a
//! semaphore. Results are joined and put back in catalog order before the
//! article set is returned.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use docshelf_core::{Article, Catalog};

use crate::fetch::DocumentFetcher;
use crate::strategy::{DateExtractor, ExtractedDate};

/// Build one [`Article`] per catalog entry, in catalog order.
///
/// Never fails: an identifier whose extraction task cannot complete gets the
/// current-time fallback, so the result always has `catalog.len()` entries.
pub async fn load_articles(
    catalog: &Catalog,
    fetcher: Arc<dyn DocumentFetcher>,
    max_concurrent_fetches: usize,
) -> Vec<Article> {
    let started = Instant::now();
    let extractor = Arc::new(DateExtractor::new());
    let permits = Arc::new(Semaphore::new(max_concurrent_fetches.max(1)));
    let mut tasks = JoinSet::new();

    for (index, identifier) in catalog.identifiers().iter().enumerate() {
        let identifier = identifier.clone();
        let extractor = Arc::clone(&extractor);
        let fetcher = Arc::clone(&fetcher);
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            // The semaphore is never closed, so acquire only fails if it is.
            let _permit = permits.acquire_owned().await.ok();
            let found = extractor.extract(&identifier, fetcher.as_ref()).await;
            (index, found)
        });
    }

    let mut dates: Vec<Option<ExtractedDate>> = vec![None; catalog.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, found)) => dates[index] = Some(found),
            Err(e) => warn!(error = %e, "date extraction task failed"),
        }
    }

    let articles: Vec<Article> = catalog
        .identifiers()
        .iter()
        .zip(dates)
        .map(|(identifier, found)| {
            let found = found.unwrap_or_else(ExtractedDate::now);
            Article::new(identifier, found.at, found.source)
        })
        .collect();

    info!(
        count = articles.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "catalog loaded"
    );
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use chrono::{TimeZone, Utc};
    use docshelf_core::{Category, DateSource};

    #[tokio::test]
    async fn loads_one_article_per_identifier_in_catalog_order() {
        let catalog = Catalog::new([
            "A Crash Course in Docker.htm",
            "API Gateway.htm",
            "Missing.htm",
        ])
        .unwrap();
        let fetcher = MemoryFetcher::new()
            .with(
                "A Crash Course in Docker.htm",
                r#"<meta name="date" content="2023-03-03">"#,
            )
            .with("API Gateway.htm", "<body>Published Jan 5, 2022</body>");

        let articles = load_articles(&catalog, Arc::new(fetcher), 2).await;

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].identifier, "A Crash Course in Docker.htm");
        assert_eq!(articles[0].category, Category::DevOps);
        assert_eq!(
            articles[0].created_at,
            Utc.with_ymd_and_hms(2023, 3, 3, 0, 0, 0).unwrap()
        );
        assert_eq!(articles[1].category, Category::Apis);
        assert_eq!(articles[1].date_source, DateSource::Body);
        assert_eq!(articles[2].date_source, DateSource::Now);
    }

    #[tokio::test]
    async fn zero_concurrency_is_clamped() {
        let catalog = Catalog::new(["a.htm"]).unwrap();
        let articles = load_articles(&catalog, Arc::new(MemoryFetcher::new()), 0).await;
        assert_eq!(articles.len(), 1);
    }

    #[tokio::test]
    async fn empty_catalog_loads_nothing() {
        let catalog = Catalog::new(Vec::<String>::new()).unwrap();
        let articles = load_articles(&catalog, Arc::new(MemoryFetcher::new()), 4).await;
        assert!(articles.is_empty());
    }
}
