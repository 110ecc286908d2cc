//! Application state and orchestration

mod actions;
mod progress;

pub use progress::ProgressBarSink;

use crate::config::Config;
use crate::db::Database;
use crate::masterlist::{Masterlist, MasterlistClient};
use crate::mods::{load_mods, Mod};
use crate::scanner::{
    DumpExtractor, NoProvider, ProgressSink, ScanResult, Scanner, StopwordDetector,
    StringExtractor,
};
use crate::state::StateService;
use crate::translations::{DatabaseService, TranslationStore};

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Main application struct that wires all components together
pub struct App {
    /// Application configuration
    pub config: Arc<RwLock<Config>>,

    /// Translation store shared by scanner and database service
    pub store: Arc<RwLock<TranslationStore>>,

    pub scanner: Scanner,

    pub database: DatabaseService,

    pub state: StateService,

    /// Installed mods with their current statuses
    pub mods: Vec<Mod>,
}

impl App {
    /// Create a new App instance
    pub async fn new(config: Config) -> Result<Self> {
        // Ensure directories exist
        config.ensure_dirs().context("Failed to create directories")?;

        let db = Database::open(&config.paths.database_file())
            .context("Failed to open database")?;
        let db = Arc::new(db);

        let mut store = TranslationStore::load(config.translations_dir(), &config.vanilla_dir())
            .context("Failed to load translations")?;
        let state = StateService::new(store.subscribe(), db);
        let store = Arc::new(RwLock::new(store));

        let masterlist_path = config.paths.masterlist_file(&config.language);
        let masterlist = Masterlist::load(&masterlist_path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring cached masterlist: {:#}", e);
            Masterlist::new()
        });

        let extractor: Arc<dyn StringExtractor> = Arc::new(DumpExtractor::new(config.dumps_dir()));
        let scanner = Scanner::new(
            store.clone(),
            extractor.clone(),
            Arc::new(StopwordDetector::new(&config.language)),
            Arc::new(NoProvider),
            &config.language,
        )
        .with_masterlist(masterlist)
        .with_ignore_list(config.ignore_list.clone());

        let database = DatabaseService::new(store.clone(), extractor, &config.language);
        let mods = load_mods(&config.mods_dir())?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            scanner,
            database,
            state,
            mods,
        })
    }

    /// Run a basic (and optionally online) scan and apply it to the loaded mods
    pub async fn scan(&mut self, online: bool, progress: &dyn ProgressSink) -> ScanResult {
        if online {
            tracing::warn!(
                "No online translation source is configured; only masterlist routes are checked"
            );
        }
        let result = self.scanner.run_scan(&self.mods, online, progress).await;
        StateService::apply_scan_result(&mut self.mods, &result);
        result
    }

    /// Run a deep scan and apply it to the loaded mods
    pub async fn deep_scan(&mut self, progress: &dyn ProgressSink) -> ScanResult {
        let result = self.scanner.deep_scan(&self.mods, progress).await;
        StateService::apply_scan_result(&mut self.mods, &result);
        result
    }

    /// Apply pending store events to the loaded mods
    pub fn sync_state(&mut self) -> usize {
        self.state.process_events(&mut self.mods)
    }

    /// Fetch the masterlist for the configured language and use it for scans
    pub async fn update_masterlist(&mut self) -> Result<usize> {
        let (url, language, cache_path) = {
            let config = self.config.read().await;
            let Some(url) = config.masterlist_url.clone() else {
                anyhow::bail!("No masterlist URL configured. Set masterlist_url in config.toml.");
            };
            (
                url,
                config.language.clone(),
                config.paths.masterlist_file(&config.language),
            )
        };

        let client = MasterlistClient::new(&url)?;
        let masterlist = client.fetch(&language, &cache_path).await?;
        let count = masterlist.len();
        self.scanner.set_masterlist(masterlist);
        Ok(count)
    }

    /// Find a loaded mod by name (exact, then case-insensitive)
    pub fn find_mod(&self, name: &str) -> Option<&Mod> {
        self.mods
            .iter()
            .find(|m| m.name == name)
            .or_else(|| self.mods.iter().find(|m| m.name.eq_ignore_ascii_case(name)))
    }
}
