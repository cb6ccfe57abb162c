use std::sync::{Arc, OnceLock};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::clipboard_history::ClipboardHistory;
use crate::clipboard_monitor::{ClipboardPoller, ClipboardReader};
use crate::config::{validate, Config};
use crate::contract::{
    ClipboardItemsResponse, ClipboardResponse, CoreRequest, CoreResponse, SearchResponse,
};
use crate::discovery::Indexer;
use crate::index_store::Catalog;
use crate::model::{ClipboardItem, SearchResult};
use crate::search::{self, SearchLimits};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSummary {
    pub apps: usize,
    pub files: usize,
}

impl IndexSummary {
    fn of(catalog: &Catalog) -> Self {
        Self {
            apps: catalog.apps().len(),
            files: catalog.files().len(),
        }
    }

    /// Both catalogs came back empty; only clipboard search remains useful.
    pub fn is_degraded(&self) -> bool {
        self.apps == 0 && self.files == 0
    }
}

/// Process-lifetime state: the catalog (published once) and the clipboard
/// history. Construct one per host process and share it behind an `Arc`.
pub struct LauncherCore {
    config: Config,
    indexer: Indexer,
    catalog: OnceLock<Arc<Catalog>>,
    clipboard: Arc<ClipboardHistory>,
    limits: SearchLimits,
}

impl LauncherCore {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        let indexer = Indexer::from_config(&config);
        Ok(Self::with_indexer(config, indexer))
    }

    pub fn with_indexer(config: Config, indexer: Indexer) -> Self {
        let clipboard = Arc::new(ClipboardHistory::new(config.clipboard_capacity));
        let limits = SearchLimits::from_config(&config);
        Self {
            config,
            indexer,
            catalog: OnceLock::new(),
            clipboard,
            limits,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the catalog on first call; later calls return the summary of
    /// the catalog already published.
    pub fn initialize(&self) -> IndexSummary {
        let catalog = self.catalog.get_or_init(|| {
            let catalog = self.indexer.build();
            log::info!(
                "index built apps={} files={}",
                catalog.apps().len(),
                catalog.files().len()
            );
            Arc::new(catalog)
        });

        if catalog.is_empty() {
            log::warn!("index is empty; only clipboard history is searchable");
        }
        IndexSummary::of(catalog)
    }

    pub fn initialize_in_background(self: &Arc<Self>) -> std::io::Result<JoinHandle<IndexSummary>> {
        let core = Arc::clone(self);
        std::thread::Builder::new()
            .name("indexer".to_string())
            .spawn(move || core.initialize())
    }

    pub fn is_initialized(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// The published catalog, or an empty one while indexing is pending.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog
            .get()
            .cloned()
            .unwrap_or_else(|| Arc::new(Catalog::empty()))
    }

    pub fn clipboard(&self) -> &Arc<ClipboardHistory> {
        &self.clipboard
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let snapshot = self.clipboard.snapshot();
        self.search_with_snapshot(query, &snapshot)
    }

    pub fn search_with_snapshot(&self, query: &str, clipboard: &[ClipboardItem]) -> Vec<SearchResult> {
        search::search(&self.catalog(), query, clipboard, &self.limits)
    }

    pub fn detect_clipboard_change(&self, current_text: &str) -> Option<ClipboardItem> {
        self.clipboard.detect_change(current_text)
    }

    pub fn add_to_clipboard(&self, content: &str) -> Result<ClipboardItem, ServiceError> {
        if content.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "clipboard content is blank".to_string(),
            ));
        }
        Ok(self.clipboard.push_front(content))
    }

    pub fn clipboard_snapshot(&self) -> Vec<ClipboardItem> {
        self.clipboard.snapshot()
    }

    pub fn start_clipboard_polling(
        &self,
        reader: Box<dyn ClipboardReader>,
    ) -> std::io::Result<ClipboardPoller> {
        ClipboardPoller::spawn(
            Arc::clone(&self.clipboard),
            reader,
            Duration::from_millis(self.config.clipboard_poll_interval_ms),
        )
    }

    pub fn handle_command(&self, request: CoreRequest) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Search(request) => Ok(CoreResponse::Search(SearchResponse {
                results: self.search(&request.query),
            })),
            CoreRequest::DetectClipboardChange(request) => {
                Ok(CoreResponse::DetectClipboardChange(ClipboardResponse {
                    item: self.detect_clipboard_change(&request.text),
                }))
            }
            CoreRequest::AddClipboard(request) => {
                let item = self.add_to_clipboard(&request.content)?;
                Ok(CoreResponse::AddClipboard(ClipboardResponse { item: Some(item) }))
            }
            CoreRequest::ClipboardSnapshot => {
                Ok(CoreResponse::ClipboardSnapshot(ClipboardItemsResponse {
                    items: self.clipboard_snapshot(),
                }))
            }
        }
    }
}
