//! Process-wide cache of parsed system prompt files.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::{Duration, Instant, SystemTime};

use crate::domain::{PromptFileMetadata, SystemPrompt};

/// Entries older than this are re-read regardless of modify-time.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
/// Maximum number of files held; the oldest entry is evicted first.
pub const DEFAULT_CAPACITY: usize = 10;

/// Parsed content of one prompt file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPrompts {
    pub prompts: Vec<SystemPrompt>,
    pub metadata: PromptFileMetadata,
}

struct CacheEntry {
    value: CachedPrompts,
    modified: SystemTime,
    cached_at: Instant,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<PathBuf, CacheEntry>,
    order: VecDeque<PathBuf>,
}

impl CacheState {
    fn remove(&mut self, path: &Path) {
        if self.entries.remove(path).is_some() {
            self.order.retain(|entry| entry != path);
        }
    }
}

/// Parsed prompt files keyed by absolute path.
///
/// An entry is valid while the file's modify-time matches the one recorded
/// at insertion and it is younger than the TTL.
pub struct PromptCache {
    ttl: Duration,
    capacity: usize,
    state: Mutex<CacheState>,
}

static GLOBAL: OnceLock<Arc<PromptCache>> = OnceLock::new();

impl Default for PromptCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptCache {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TTL, DEFAULT_CAPACITY)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_limits(ttl, DEFAULT_CAPACITY)
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self { ttl, capacity: capacity.max(1), state: Mutex::new(CacheState::default()) }
    }

    /// The shared cache used by parsers that were not given their own.
    pub fn global() -> Arc<PromptCache> {
        GLOBAL.get_or_init(|| Arc::new(PromptCache::new())).clone()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached prompts for `path` if still valid for `modified`.
    ///
    /// Stale entries are dropped.
    pub fn get(&self, path: &Path, modified: SystemTime) -> Option<CachedPrompts> {
        let mut state = self.lock();
        let entry = state.entries.get(path)?;
        if entry.modified == modified && entry.cached_at.elapsed() < self.ttl {
            return Some(entry.value.clone());
        }
        state.remove(path);
        None
    }

    pub fn insert(&self, path: &Path, modified: SystemTime, value: CachedPrompts) {
        let mut state = self.lock();
        state.remove(path);
        state
            .entries
            .insert(path.to_path_buf(), CacheEntry { value, modified, cached_at: Instant::now() });
        state.order.push_back(path.to_path_buf());

        while state.order.len() > self.capacity {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
            }
        }
    }

    pub fn remove(&self, path: &Path) {
        self.lock().remove(path);
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
