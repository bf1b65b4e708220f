use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::domain::config::{config_path, parse_config_content};
use crate::domain::{AppError, ForgeConfig};
use crate::ports::DocumentStore;
use crate::services::{
    ContextIntegrator, ContextTemplateEngine, PromptCache, StatementManager, SystemPromptParser,
};

/// Engine wired to the fragment store and prompt catalog of one context.
pub type ForgeEngine<'a, D> = ContextTemplateEngine<StatementManager<&'a D>, SystemPromptParser<&'a D>>;

/// Application context holding the working root, its configuration and the
/// document store every service reads through.
pub struct AppContext<D: DocumentStore> {
    root: PathBuf,
    store: D,
    config: ForgeConfig,
    cache: Arc<PromptCache>,
}

impl<D: DocumentStore> AppContext<D> {
    /// Create a context rooted at `root`, loading `.context-forge/config.toml`
    /// when present.
    pub fn new(root: impl Into<PathBuf>, store: D) -> Result<Self, AppError> {
        let root = root.into();
        let path = config_path(&root);
        let config = if store.exists(&path) {
            debug!(path = %path.display(), "Loading configuration");
            parse_config_content(&store.read(&path)?)?
        } else {
            ForgeConfig::default()
        };
        Ok(Self::with_config(root, store, config))
    }

    pub fn with_config(root: impl Into<PathBuf>, store: D, config: ForgeConfig) -> Self {
        Self { root: root.into(), store, config, cache: PromptCache::global() }
    }

    /// Use a private prompt cache instead of the process-wide one.
    pub fn with_cache(mut self, cache: Arc<PromptCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Fragment document path resolved against the root.
    pub fn statements_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.statements)
    }

    /// System prompt document path resolved against the root.
    pub fn system_prompts_path(&self) -> PathBuf {
        self.root.join(&self.config.paths.system_prompts)
    }

    /// A fragment store with its document already loaded.
    pub fn statement_manager(&self) -> StatementManager<&D> {
        let mut manager = StatementManager::new(&self.store, self.statements_path());
        manager.load();
        manager
    }

    pub fn prompt_parser(&self) -> SystemPromptParser<&D> {
        SystemPromptParser::with_cache(&self.store, self.system_prompts_path(), Arc::clone(&self.cache))
    }

    /// Section engine, enabled per `[engine] enabled`.
    pub fn engine(&self) -> ForgeEngine<'_, D> {
        let mut engine = ContextTemplateEngine::new(self.statement_manager(), self.prompt_parser());
        engine.set_enabled(self.config.engine.enabled);
        engine
    }

    pub fn integrator(&self) -> ContextIntegrator {
        ContextIntegrator::new().with_template_version(self.config.engine.template_version.as_str())
    }
}
