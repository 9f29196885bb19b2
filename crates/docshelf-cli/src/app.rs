//! Application state shared by the CLI commands.

use std::path::Path;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use docshelf_core::{Article, Catalog, CatalogError, Config, DocshelfError, Result};
use docshelf_extract::{load_articles, FsFetcher};
use docshelf_query::{query, sort_by_title, CategoryFilter, SortMode};
use docshelf_store::{JsonFileStore, SessionGate, SessionRecord, WatchStateStore};

/// Resolve the effective configuration from the global CLI flags.
///
/// An explicit `--config` file wins; otherwise `docshelf.toml` is looked up
/// in `--root` (or the working directory). `--root` always overrides the
/// catalog root.
///
/// # Errors
///
/// Returns the config loading error.
pub fn resolve_config(root: Option<&Path>, config_file: Option<&Path>) -> Result<Config> {
    let mut config = match config_file {
        Some(path) => Config::load(path)?,
        None => Config::discover(root.unwrap_or_else(|| Path::new(".")))?,
    };
    if let Some(root) = root {
        config.catalog.root = root.to_path_buf();
    }
    Ok(config)
}

/// The catalog, its persisted state, and (once loaded) the article set.
pub struct Shelf {
    config: Config,
    catalog: Catalog,
    store: JsonFileStore,
    articles: Vec<Article>,
}

impl Shelf {
    /// Open the state store and clear a lapsed session record.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog override is invalid or the store
    /// cannot be opened.
    pub fn open(config: Config) -> Result<Self> {
        let catalog = config.catalog()?;
        let mut store = JsonFileStore::open(config.storage_path())?;
        SessionGate::new(&mut store).logout_if_expired(Utc::now())?;
        debug!(
            root = %config.catalog.root.display(),
            entries = catalog.len(),
            "shelf opened"
        );
        Ok(Self {
            config,
            catalog,
            store,
            articles: Vec::new(),
        })
    }

    /// Fail unless the session gate is disabled or a valid session exists.
    ///
    /// # Errors
    ///
    /// Returns [`DocshelfError::SessionExpired`].
    pub fn ensure_session(&mut self) -> Result<()> {
        if !self.config.session.enforce {
            return Ok(());
        }
        SessionGate::new(&mut self.store).require(Utc::now())
    }

    /// Extract dates for every catalog entry, order by title, and apply the
    /// persisted watched flags.
    pub async fn load(&mut self) {
        let fetcher = Arc::new(FsFetcher::new(self.config.catalog.root.clone()));
        let mut articles = load_articles(
            &self.catalog,
            fetcher,
            self.config.load.max_concurrent_fetches,
        )
        .await;
        sort_by_title(&mut articles);
        WatchStateStore::load(&mut self.store).hydrate(&mut articles);
        self.articles = articles;
    }

    #[must_use]
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    #[must_use]
    pub fn find(&self, identifier: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.identifier == identifier)
    }

    #[must_use]
    pub fn list(&self, search: &str, category: &CategoryFilter, sort: SortMode) -> Vec<&Article> {
        query(&self.articles, search, category, sort)
    }

    /// Flip the watched flag of a catalog entry and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownArticle`] for identifiers outside the
    /// catalog, or the store's write error.
    pub fn toggle(&mut self, identifier: &str) -> Result<bool> {
        if !self.catalog.contains(identifier) {
            return Err(CatalogError::UnknownArticle(identifier.to_string()).into());
        }
        let watched = WatchStateStore::load(&mut self.store).toggle(identifier)?;
        if let Some(article) = self.articles.iter_mut().find(|a| a.identifier == identifier) {
            article.watched = watched;
        }
        info!(identifier, watched, "toggled");
        Ok(watched)
    }

    /// Start a session lasting `ttl_hours`, or the configured default.
    ///
    /// # Errors
    ///
    /// Returns [`DocshelfError::Config`] for a zero ttl, or the store's
    /// write error.
    pub fn login(&mut self, ttl_hours: Option<u32>) -> Result<SessionRecord> {
        let hours = ttl_hours.unwrap_or(self.config.session.ttl_hours);
        SessionGate::new(&mut self.store).start(Utc::now(), Duration::hours(i64::from(hours)))
    }

    /// # Errors
    ///
    /// Returns the store's write error.
    pub fn logout(&mut self) -> Result<()> {
        SessionGate::new(&mut self.store).logout()
    }

    /// The current session record, if it is still valid.
    #[must_use]
    pub fn session(&mut self) -> Option<SessionRecord> {
        let now = Utc::now();
        SessionGate::new(&mut self.store)
            .record()
            .filter(|r| r.is_valid(now))
    }

    #[must_use]
    pub fn session_enforced(&self) -> bool {
        self.config.session.enforce
    }
}

/// Convert an unknown-article lookup into the catalog error.
///
/// # Errors
///
/// Always [`CatalogError::UnknownArticle`] when `article` is `None`.
pub fn require_article<'a>(article: Option<&'a Article>, identifier: &str) -> Result<&'a Article> {
    article.ok_or_else(|| DocshelfError::from(CatalogError::UnknownArticle(identifier.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("docshelf.toml"),
            r#"
[catalog]
identifiers = ["A Crash Course in Docker.htm", "API Gateway.htm"]
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("A Crash Course in Docker.htm"),
            r#"<html><head><meta property="article:published_time" content="2023-01-10T00:00:00Z"></head></html>"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("API Gateway.htm"),
            "<html><body><p>Posted March 3, 2024</p></body></html>",
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn scenario_search_toggle_and_watched_mode() {
        let dir = fixture();
        let config = resolve_config(Some(dir.path()), None).unwrap();
        let mut shelf = Shelf::open(config).unwrap();
        shelf.load().await;

        let categories: Vec<&str> = shelf
            .articles()
            .iter()
            .map(|a| a.category.label())
            .collect();
        // Sorted by title: "A Crash Course..." before "API Gateway".
        assert_eq!(categories, vec!["DevOps", "APIs"]);

        let found = shelf.list("docker", &CategoryFilter::All, SortMode::NoSort);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].identifier, "A Crash Course in Docker.htm");

        assert!(shelf.toggle("A Crash Course in Docker.htm").unwrap());
        let watched = shelf.list("", &CategoryFilter::All, SortMode::Watched);
        assert_eq!(watched.len(), 1);
        assert_eq!(watched[0].identifier, "A Crash Course in Docker.htm");
    }

    #[tokio::test]
    async fn watched_flags_survive_reopen() {
        let dir = fixture();
        let mut shelf = Shelf::open(resolve_config(Some(dir.path()), None).unwrap()).unwrap();
        shelf.toggle("API Gateway.htm").unwrap();

        let mut reopened = Shelf::open(resolve_config(Some(dir.path()), None).unwrap()).unwrap();
        reopened.load().await;
        assert!(reopened.find("API Gateway.htm").unwrap().watched);
        assert!(!reopened.find("A Crash Course in Docker.htm").unwrap().watched);
    }

    #[test]
    fn toggle_rejects_unknown_identifiers() {
        let dir = fixture();
        let mut shelf = Shelf::open(resolve_config(Some(dir.path()), None).unwrap()).unwrap();
        let err = shelf.toggle("Nope.htm").unwrap_err();
        assert!(matches!(
            err,
            DocshelfError::Catalog(CatalogError::UnknownArticle(_))
        ));
    }

    #[test]
    fn enforced_session_gates_until_login() {
        let dir = fixture();
        let mut config = resolve_config(Some(dir.path()), None).unwrap();
        config.session.enforce = true;
        let mut shelf = Shelf::open(config).unwrap();

        assert!(matches!(
            shelf.ensure_session(),
            Err(DocshelfError::SessionExpired)
        ));
        shelf.login(Some(1)).unwrap();
        assert!(shelf.ensure_session().is_ok());
        assert!(shelf.session().is_some());
        shelf.logout().unwrap();
        assert!(shelf.ensure_session().is_err());
    }

    #[test]
    fn explicit_config_file_is_used() {
        let dir = fixture();
        let config = resolve_config(None, Some(&dir.path().join("docshelf.toml"))).unwrap();
        assert_eq!(config.catalog.identifiers.len(), 2);
    }
}
