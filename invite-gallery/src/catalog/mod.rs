//! Template catalog: load-once cache of the template data document
//!
//! [`TemplateCatalog`] is constructed once at startup and handed to every
//! consumer (HTTP handlers, CLI commands) by cloning the handle. The first
//! caller that needs data triggers a single fetch through the configured
//! [`TemplateSource`]; concurrent callers wait on the same in-flight load.
//!
//! ```text
//! Empty ──load──▶ Loading ──ok──▶ Loaded
//!   ▲               │
//!   └────error──────┘      clear_cache(): any state ──▶ Empty
//! ```
//!
//! A failed load is never cached: the error reaches every waiter of that load
//! and the next call starts a fresh fetch.
//!
//! # Example
//!
//! ```rust,no_run
//! use invite_gallery::catalog::{FileTemplateSource, TemplateCatalog};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let catalog = TemplateCatalog::new(FileTemplateSource::new("./public/data.json"));
//!
//! let page = catalog.get_templates_by_page(1, 6).await?;
//! println!("{} of {} templates", page.templates.len(), page.total);
//!
//! let matches = catalog.search_templates("t02").await?;
//! # Ok(())
//! # }
//! ```

pub mod source;
pub mod types;

pub use source::{FileTemplateSource, HttpTemplateSource, LoadError, TemplateSource};
pub use types::{CatalogStatus, Template, TemplateData, TemplatePage};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

type LoadResult = Result<Arc<[Template]>, LoadError>;
type PendingLoad = Shared<BoxFuture<'static, LoadResult>>;

enum LoadState {
    Empty,
    Loading(PendingLoad),
    Loaded(Arc<[Template]>),
}

struct Slot {
    state: LoadState,
    /// Bumped by `clear_cache` so a detached load cannot repopulate the cache
    generation: u64,
}

struct Inner {
    source: Arc<dyn TemplateSource>,
    slot: Mutex<Slot>,
}

/// Shared handle to the in-memory template catalog
///
/// Cloning is cheap; all clones see the same cache.
#[derive(Clone)]
pub struct TemplateCatalog {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for TemplateCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCatalog")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl TemplateCatalog {
    /// Create an empty catalog backed by `source`
    pub fn new(source: impl TemplateSource + 'static) -> Self {
        Self::from_source(Arc::new(source))
    }

    /// Create an empty catalog from an already shared source
    #[must_use]
    pub fn from_source(source: Arc<dyn TemplateSource>) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                slot: Mutex::new(Slot {
                    state: LoadState::Empty,
                    generation: 0,
                }),
            }),
        }
    }

    /// Load the catalog, fetching at most once
    ///
    /// Returns the cached templates without I/O once loaded. While a load is
    /// in flight every caller awaits the same result.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] of the in-flight fetch. The cache stays empty
    /// afterwards, so the next call fetches again.
    pub async fn load_templates(&self) -> LoadResult {
        let pending = {
            let mut slot = self.inner.slot.lock();
            match &slot.state {
                LoadState::Loaded(templates) => return Ok(Arc::clone(templates)),
                LoadState::Loading(pending) => pending.clone(),
                LoadState::Empty => {
                    let pending = self.start_load(slot.generation);
                    slot.state = LoadState::Loading(pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    fn start_load(&self, generation: u64) -> PendingLoad {
        let source = Arc::clone(&self.inner.source);
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);

        async move {
            tracing::debug!("Loading template catalog");
            let result: LoadResult = source
                .fetch()
                .await
                .map(|data| Arc::from(data.templates));

            if let Some(inner) = inner.upgrade() {
                let mut slot = inner.slot.lock();
                if slot.generation == generation {
                    slot.state = match &result {
                        Ok(templates) => {
                            tracing::info!(count = templates.len(), "Loaded template catalog");
                            LoadState::Loaded(Arc::clone(templates))
                        }
                        Err(error) => {
                            tracing::error!(%error, "Failed to load template catalog");
                            LoadState::Empty
                        }
                    };
                } else {
                    tracing::debug!("Catalog cleared while loading; discarding result");
                }
            }

            result
        }
        .boxed()
        .shared()
    }

    /// All templates in source order, loading them first if needed
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the catalog has to be loaded and that fails.
    pub async fn get_templates(&self) -> LoadResult {
        self.load_templates().await
    }

    /// First template whose id equals `id`
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if loading fails.
    pub async fn get_template_by_id(&self, id: u64) -> Result<Option<Template>, LoadError> {
        let templates = self.get_templates().await?;
        Ok(templates.iter().find(|t| t.id == id).cloned())
    }

    /// First template whose title equals `title`, ignoring case
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if loading fails.
    pub async fn get_template_by_title(&self, title: &str) -> Result<Option<Template>, LoadError> {
        let templates = self.get_templates().await?;
        let wanted = title.to_lowercase();
        Ok(templates
            .iter()
            .find(|t| t.title.to_lowercase() == wanted)
            .cloned())
    }

    /// Templates whose title or url contains `keyword`, ignoring case
    ///
    /// Plain substring semantics: an empty keyword matches everything. Callers
    /// that treat a blank search box as "no search" skip the call instead.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if loading fails.
    pub async fn search_templates(&self, keyword: &str) -> Result<Vec<Template>, LoadError> {
        let templates = self.get_templates().await?;
        let needle = keyword.to_lowercase();
        Ok(templates
            .iter()
            .filter(|t| t.matches_lowercase(&needle))
            .cloned()
            .collect())
    }

    /// Number of templates in the catalog
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if loading fails.
    pub async fn template_count(&self) -> Result<usize, LoadError> {
        Ok(self.get_templates().await?.len())
    }

    /// Page `page` (1-based) of `page_size` templates
    ///
    /// Out-of-range pages produce an empty page rather than an error.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if loading fails.
    pub async fn get_templates_by_page(
        &self,
        page: usize,
        page_size: usize,
    ) -> Result<TemplatePage, LoadError> {
        let templates = self.get_templates().await?;
        Ok(TemplatePage::slice(&templates, page, page_size))
    }

    /// Best-effort warm-up; failures are logged and swallowed
    pub async fn preload(&self) {
        if let Err(error) = self.load_templates().await {
            tracing::warn!(%error, "Failed to preload templates");
        }
    }

    /// Drop cached data and detach any in-flight load
    pub fn clear_cache(&self) {
        let mut slot = self.inner.slot.lock();
        slot.generation = slot.generation.wrapping_add(1);
        slot.state = LoadState::Empty;
    }

    /// Current cache state; never triggers a load
    #[must_use]
    pub fn status(&self) -> CatalogStatus {
        match &self.inner.slot.lock().state {
            LoadState::Empty => CatalogStatus::Empty,
            LoadState::Loading(_) => CatalogStatus::Loading,
            LoadState::Loaded(templates) => CatalogStatus::Loaded {
                count: templates.len(),
            },
        }
    }
}
