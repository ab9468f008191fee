//! The recency cache between paginated-fetch call sites and the transport:
//! repeated page loads hit the cache, cold pages go to the network, and the
//! working set stays bounded.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use async_trait::async_trait;
use bytes::Bytes;
use rstest::*;
use syrinx::{Headers, Net, NetError, RecencyCache};
use url::Url;

struct PageServer {
    fetches: AtomicU32,
}

#[async_trait]
impl Net for PageServer {
    async fn get_bytes(&self, url: Url, _headers: Option<Headers>) -> Result<Bytes, NetError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(Bytes::from(format!("payload:{}", url.query().unwrap_or(""))))
    }

    async fn head(&self, _url: Url, _headers: Option<Headers>) -> Result<Headers, NetError> {
        Ok(Headers::new())
    }
}

async fn fetch_page<N: Net>(
    net: &N,
    cache: &RecencyCache<u32, Bytes>,
    page: u32,
) -> Result<Bytes, NetError> {
    if let Some(cached) = cache.get(&page) {
        return Ok(cached);
    }
    let url = Url::parse(&format!("https://media.example.com/comments?page={page}")).unwrap();
    let bytes = net.get_bytes(url, None).await?;
    cache.put(page, bytes.clone());
    Ok(bytes)
}

#[rstest]
#[tokio::test]
async fn repeated_pages_are_served_from_cache() {
    let net = Arc::new(PageServer {
        fetches: AtomicU32::new(0),
    });
    let cache = RecencyCache::new(4).unwrap();

    for page in [1, 2, 1, 1, 2] {
        fetch_page(net.as_ref(), &cache, page).await.unwrap();
    }
    assert_eq!(net.fetches.load(Ordering::SeqCst), 2);
}

#[rstest]
#[tokio::test]
async fn cold_pages_evict_the_least_recently_used_one() {
    let net = Arc::new(PageServer {
        fetches: AtomicU32::new(0),
    });
    let cache = RecencyCache::new(4).unwrap();

    for page in 1..=5 {
        fetch_page(net.as_ref(), &cache, page).await.unwrap();
    }
    assert_eq!(cache.len(), 4);
    assert_eq!(net.fetches.load(Ordering::SeqCst), 5);

    // Page 1 was evicted and refetches; page 5 is still warm.
    fetch_page(net.as_ref(), &cache, 5).await.unwrap();
    fetch_page(net.as_ref(), &cache, 1).await.unwrap();
    assert_eq!(net.fetches.load(Ordering::SeqCst), 6);
}
