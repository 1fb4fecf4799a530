//! Caller-owned catalog cache.

use kiosk_commerce::CatalogItem;
use tracing::debug;

use crate::error::CatalogError;
use crate::source::CatalogSource;

/// Fetch-once wrapper around a [`CatalogSource`].
///
/// The first [`ensure_loaded`](CatalogCache::ensure_loaded) fetches and
/// keeps the snapshot; later calls hand back the cached one. A failed
/// fetch caches nothing, so the next call tries again. The handle is
/// plain owned state with no interior sharing; whoever owns it decides
/// its lifetime.
#[derive(Debug)]
pub struct CatalogCache<S> {
    source: S,
    items: Option<Vec<CatalogItem>>,
}

impl<S: CatalogSource> CatalogCache<S> {
    /// Wrap `source` with an empty cache.
    pub fn new(source: S) -> Self {
        Self {
            source,
            items: None,
        }
    }

    /// The cached snapshot, fetching it first if none is held.
    pub async fn ensure_loaded(&mut self) -> Result<&[CatalogItem], CatalogError> {
        if self.items.is_none() {
            let items = self.source.fetch().await?;
            debug!(count = items.len(), "catalog cached");
            self.items = Some(items);
        }
        Ok(self.items.as_deref().unwrap_or_default())
    }

    /// The cached snapshot without fetching, if one is held.
    pub fn cached(&self) -> Option<&[CatalogItem]> {
        self.items.as_deref()
    }

    /// Drop the cached snapshot so the next call fetches fresh.
    pub fn invalidate(&mut self) {
        self.items = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogSource for &CountingSource {
        async fn fetch(&self) -> Result<Vec<CatalogItem>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CatalogError::Connection("refused".to_string()));
            }
            Ok(vec![CatalogItem::new(1u64, "Morning Flow", 45)])
        }
    }

    #[tokio::test]
    async fn test_cache_fetches_once() {
        let source = CountingSource::new(false);
        let mut cache = CatalogCache::new(&source);

        assert!(cache.cached().is_none());
        assert_eq!(cache.ensure_loaded().await.unwrap().len(), 1);
        assert_eq!(cache.ensure_loaded().await.unwrap().len(), 1);
        assert_eq!(source.calls(), 1);
        assert!(cache.cached().is_some());
    }

    #[tokio::test]
    async fn test_invalidate_refetches() {
        let source = CountingSource::new(false);
        let mut cache = CatalogCache::new(&source);

        cache.ensure_loaded().await.unwrap();
        cache.invalidate();
        assert!(cache.cached().is_none());
        cache.ensure_loaded().await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let source = CountingSource::new(true);
        let mut cache = CatalogCache::new(&source);

        assert!(cache.ensure_loaded().await.is_err());
        assert!(cache.cached().is_none());
        assert!(cache.ensure_loaded().await.is_err());
        assert_eq!(source.calls(), 2);
    }
}
