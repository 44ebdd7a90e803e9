//! CacheRegistry: lazy creation, idempotent open, delete, cross-cache lookup

use std::sync::Arc;
use std::time::Duration;

use swcache_engine::prelude::*;

const TPL_URL: &str = "https://en.wikipedia.org/wiki/Test";

#[tokio::test]
async fn test_open_is_idempotent() {
    let registry = CacheRegistry::default();
    let first = registry.open("my-site-cache-v1");
    let second = registry.open("my-site-cache-v1");

    assert!(first.ptr_eq(&second));

    first.put(TPL_URL, HttpResponse::new("template")).await.unwrap();
    let hit = second.match_request(TPL_URL).unwrap().unwrap();
    assert_eq!(hit.text().await.unwrap(), "template");
}

#[tokio::test]
async fn test_caches_are_isolated_by_name() {
    let registry = CacheRegistry::default();
    registry.open("a").put(TPL_URL, HttpResponse::new("a")).await.unwrap();

    assert!(registry.open("b").match_request(TPL_URL).unwrap().is_none());
    assert_eq!(registry.keys(), ["a", "b"]);
}

#[tokio::test]
async fn test_delete_starts_fresh() {
    let registry = CacheRegistry::default();
    let old = registry.open("v1");
    old.put(TPL_URL, HttpResponse::new("stale")).await.unwrap();

    assert!(registry.has("v1"));
    assert!(registry.delete("v1"));
    assert!(!registry.has("v1"));
    assert!(!registry.delete("v1"));

    let fresh = registry.open("v1");
    assert!(!fresh.ptr_eq(&old));
    assert!(fresh.is_empty());
    assert!(fresh.match_request(TPL_URL).unwrap().is_none());
}

#[tokio::test]
async fn test_opened_caches_share_registry_config() {
    let config = CacheConfig::default()
        .with_default_ttl(Duration::from_secs(42))
        .with_origin(Url::parse("https://en.wikipedia.org").unwrap());
    let registry = CacheRegistry::new(config.clone());

    let cache = registry.open("configured");
    assert_eq!(cache.config(), &config);
    assert_eq!(cache.name(), "configured");

    cache.put("/wiki/Test", HttpResponse::new("tpl")).await.unwrap();
    assert!(cache.match_request(TPL_URL).unwrap().is_some());
}

#[tokio::test]
async fn test_registry_match_searches_all_caches() {
    let registry = CacheRegistry::default();
    registry.open("b").put(TPL_URL, HttpResponse::new("from b")).await.unwrap();
    registry.open("c").put(TPL_URL, HttpResponse::new("from c")).await.unwrap();
    registry.open("a");

    let hit = registry.match_request(TPL_URL).unwrap().unwrap();
    assert_eq!(hit.text().await.unwrap(), "from b");

    assert!(registry.match_request("https://en.wikipedia.org/wiki/None").unwrap().is_none());
}

#[tokio::test]
async fn test_registry_fetcher_is_shared() {
    let fetcher: Arc<dyn Fetch> = Arc::new(|request: HttpRequest| async move {
        Ok::<_, BoxError>(HttpResponse::new(format!("fetched {}", request.url())))
    });
    let registry = CacheRegistry::with_fetcher(CacheConfig::default(), fetcher);

    registry.open("one").add(TPL_URL).await.unwrap();
    registry.open("two").add(TPL_URL).await.unwrap();

    let hit = registry.open("two").match_request(TPL_URL).unwrap().unwrap();
    assert_eq!(hit.text().await.unwrap(), format!("fetched {TPL_URL}"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_open_yields_one_cache() {
    let registry = Arc::new(CacheRegistry::default());

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let registry = registry.clone();
            tokio::spawn(async move { registry.open("contended") })
        })
        .collect();

    let mut caches = Vec::new();
    for task in tasks {
        caches.push(task.await.unwrap());
    }

    assert!(caches.iter().all(|cache| cache.ptr_eq(&caches[0])));
    assert_eq!(registry.keys(), ["contended"]);
}
