use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::entities::post::Post;
use crate::interfaces::content_api::ContentApiInterface;
use crate::middleware::error::AppResult;

pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

#[derive(Debug, Clone)]
struct CachedPost {
    post: Arc<Post>,
    expires_at: Instant,
}

impl CachedPost {
    #[inline]
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Cache state of one post id. `generation` is bumped on every invalidation.
#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    cached: Option<CachedPost>,
}

impl Slot {
    fn live_post(&self) -> Option<Arc<Post>> {
        self.cached
            .as_ref()
            .filter(|cached| !cached.is_expired())
            .map(|cached| cached.post.clone())
    }

    fn is_stale(&self) -> bool {
        self.cached.as_ref().map_or(true, CachedPost::is_expired)
    }
}

/// Taken before a read starts; the result is only stored if nothing
/// invalidated the post in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReadStamp {
    evictions: u64,
    generation: u64,
}

/// Post read results keyed by post id.
///
/// Only resolved posts are stored; absent posts and failed reads always go
/// back to the content API on the next request. Once `max_entries` slots are
/// held, expired ones are swept and then the first tenth is evicted.
#[derive(Debug)]
pub struct PostQueryCache {
    slots: DashMap<String, Slot>,
    ttl: Duration,
    max_entries: usize,
    /// Bumped whenever a slot carrying an invalidation is dropped, so reads
    /// stamped before that can no longer be stored.
    evictions: AtomicU64,
}

impl PostQueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_limits(ttl, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_limits(ttl: Duration, max_entries: usize) -> Self {
        debug!(ttl_secs = ttl.as_secs(), max_entries, "initializing post query cache");
        Self {
            slots: DashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn get(&self, post_id: &str) -> Option<Arc<Post>> {
        self.slots.get(post_id)?.live_post()
    }

    pub fn invalidate(&self, post_id: &str) {
        let mut slot = self.slots.entry(post_id.to_string()).or_default();
        slot.generation += 1;
        slot.cached = None;
        debug!(post_id, generation = slot.generation, "post cache invalidated");
    }

    pub async fn get_or_fetch(
        &self,
        post_id: &str,
        api: &(dyn ContentApiInterface + Send + Sync),
    ) -> AppResult<Option<Arc<Post>>> {
        if let Some(post) = self.get(post_id) {
            debug!(post_id, "post cache hit");
            return Ok(Some(post));
        }
        debug!(post_id, "post cache miss");
        let stamp = self.stamp(post_id);
        let post = api.get_post_by_post_id(post_id).await?;
        Ok(post.map(|post| self.store(post_id, post, stamp)))
    }

    /// Drops the cached read and executes it again.
    pub async fn refetch(
        &self,
        post_id: &str,
        api: &(dyn ContentApiInterface + Send + Sync),
    ) -> AppResult<Option<Arc<Post>>> {
        self.invalidate(post_id);
        self.get_or_fetch(post_id, api).await
    }

    /// Number of posts currently stored, expired ones included.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.cached.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stamp(&self, post_id: &str) -> ReadStamp {
        let evictions = self.evictions.load(Ordering::SeqCst);
        let generation = self.slots.get(post_id).map_or(0, |slot| slot.generation);
        ReadStamp {
            evictions,
            generation,
        }
    }

    fn store(&self, post_id: &str, post: Post, stamp: ReadStamp) -> Arc<Post> {
        let post = Arc::new(post);
        self.enforce_limits();

        let entry = self.slots.entry(post_id.to_string());
        let generation = match &entry {
            Entry::Occupied(slot) => slot.get().generation,
            Entry::Vacant(_) => 0,
        };
        let current = ReadStamp {
            evictions: self.evictions.load(Ordering::SeqCst),
            generation,
        };
        if current != stamp {
            debug!(post_id, "post read overtaken by an invalidation, not cached");
            return post;
        }

        entry.or_default().cached = Some(CachedPost {
            post: post.clone(),
            expires_at: Instant::now() + self.ttl,
        });
        debug!(post_id, ttl_secs = self.ttl.as_secs(), "post cache store");
        post
    }

    fn enforce_limits(&self) {
        if self.slots.len() < self.max_entries {
            return;
        }

        self.slots.retain(|_, slot| {
            let keep = !slot.is_stale();
            if !keep && slot.generation > 0 {
                self.evictions.fetch_add(1, Ordering::SeqCst);
            }
            keep
        });

        if self.slots.len() < self.max_entries {
            return;
        }

        let evict_count = (self.slots.len() / 10).max(1);
        warn!(
            current_entries = self.slots.len(),
            evict_count, "post cache limit exceeded, evicting entries"
        );
        let keys_to_evict: Vec<String> = self
            .slots
            .iter()
            .take(evict_count)
            .map(|slot| slot.key().clone())
            .collect();
        for key in keys_to_evict {
            self.evict(&key);
        }
    }

    fn evict(&self, post_id: &str) {
        let removed = self.slots.remove_if(post_id, |_, slot| {
            if slot.generation > 0 {
                self.evictions.fetch_add(1, Ordering::SeqCst);
            }
            true
        });
        if removed.is_some() {
            debug!(post_id, "post cache evict");
        }
    }
}
