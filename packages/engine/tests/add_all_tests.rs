//! add / add_all: validation, scheme checks, fan-out and all-or-nothing commit

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use swcache_engine::prelude::*;

type FetchResult = std::result::Result<HttpResponse, BoxError>;

/// Fetcher that echoes the request path as the body.
fn echo() -> Arc<dyn Fetch> {
    Arc::new(|request: HttpRequest| async move {
        let body = request.url().path().to_string();
        Ok::<_, BoxError>(HttpResponse::new(body).with_url(request.url().clone()))
    })
}

/// Fetcher that counts calls and fails for any path containing "broken".
fn counting(calls: Arc<AtomicUsize>) -> Arc<dyn Fetch> {
    Arc::new(move |request: HttpRequest| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if request.url().path().contains("broken") {
                let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
                return Err(Box::new(err) as BoxError);
            }
            Ok(HttpResponse::new(request.url().path().to_string()))
        }
    })
}

fn cache_with(fetcher: Arc<dyn Fetch>) -> Cache {
    Cache::new("batch", CacheConfig::default(), fetcher)
}

async fn body_of(cache: &Cache, url: &str) -> Option<String> {
    let response = cache.match_request(url).unwrap()?;
    Some(response.text().await.unwrap())
}

#[tokio::test]
async fn test_add_all_stores_every_response() {
    let cache = cache_with(echo());

    cache
        .add_all(["https://x/a", "https://x/b", "http://x/c"])
        .await
        .unwrap();

    assert_eq!(body_of(&cache, "https://x/a").await.as_deref(), Some("/a"));
    assert_eq!(body_of(&cache, "https://x/b").await.as_deref(), Some("/b"));
    assert_eq!(body_of(&cache, "http://x/c").await.as_deref(), Some("/c"));
    assert_eq!(cache.keys().len(), 3);
}

#[tokio::test]
async fn test_add_single_request() {
    let cache = cache_with(echo());
    let request = HttpRequest::parse("https://x/single")
        .unwrap()
        .with_header("accept", "text/html")
        .unwrap();

    cache.add(request.clone()).await.unwrap();

    let hit = cache.match_request(&request).unwrap().unwrap();
    assert_eq!(hit.text().await.unwrap(), "/single");
}

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = cache_with(counting(calls.clone()));

    let err = cache.add_all(Vec::<String>::new()).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_element_rejects_batch_before_fetching() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = cache_with(counting(calls.clone()));

    let err = cache
        .add_all(["https://x/a", "ftp://x/b", "definitely not a url"])
        .await
        .unwrap_err();

    // malformed input wins over the scheme problem, and nothing was fetched
    assert!(err.is_validation());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(cache.keys().is_empty());
}

#[tokio::test]
async fn test_bad_scheme_rejects_whole_batch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = cache_with(counting(calls.clone()));

    let err = cache.add_all(["https://x/a", "ftp://x/b"]).await.unwrap_err();

    assert!(err.is_network_scheme());
    assert_eq!(err.code(), Some(19));
    assert_eq!(err.message(), Some("Network error"));
    assert_eq!(err.url().map(Url::as_str), Some("ftp://x/b"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(cache.match_request("https://x/a").unwrap().is_none());
    assert!(cache.match_request("ftp://x/b").unwrap().is_none());
}

#[tokio::test]
async fn test_relative_url_without_origin_is_network_scheme_error() {
    let cache = cache_with(echo());
    let err = cache.add_all(["/wiki/Test"]).await.unwrap_err();
    assert!(err.is_network_scheme());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_relative_url_is_rewritten_against_origin() {
    let config = CacheConfig::default().with_origin(Url::parse("https://en.wikipedia.org").unwrap());
    let cache = Cache::new("origin", config, echo());

    cache.add_all(["/wiki/Test", "//upload.wikimedia.org/logo.png"]).await.unwrap();

    assert_eq!(
        body_of(&cache, "https://en.wikipedia.org/wiki/Test").await.as_deref(),
        Some("/wiki/Test")
    );
    assert_eq!(
        body_of(&cache, "https://upload.wikimedia.org/logo.png").await.as_deref(),
        Some("/logo.png")
    );
}

#[tokio::test]
async fn test_transport_failure_stores_nothing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = cache_with(counting(calls.clone()));

    let err = cache
        .add_all(["https://x/a", "https://x/broken", "https://x/c"])
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.url().map(Url::as_str), Some("https://x/broken"));
    // every fetch was issued and allowed to settle
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(cache.keys().is_empty());

    let source = err.into_source().unwrap();
    let io = source.downcast::<std::io::Error>().unwrap();
    assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
}

#[tokio::test]
async fn test_failed_batch_leaves_existing_entries_untouched() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = cache_with(counting(calls));
    cache.put("https://x/a", HttpResponse::new("original")).await.unwrap();

    cache
        .add_all(["https://x/a", "https://x/broken"])
        .await
        .unwrap_err();

    assert_eq!(body_of(&cache, "https://x/a").await.as_deref(), Some("original"));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_body_failure_stores_nothing() {
    let fetcher: Arc<dyn Fetch> = Arc::new(|request: HttpRequest| async move {
        if request.url().path() == "/stream" {
            let chunks: Vec<std::result::Result<bytes::Bytes, BoxError>> =
                vec![Ok(bytes::Bytes::from_static(b"par")), Err("truncated".into())];
            return Ok(HttpResponse::from_stream(futures::stream::iter(chunks)));
        }
        Ok::<_, BoxError>(HttpResponse::new("fine"))
    });
    let cache = cache_with(fetcher);

    let err = cache.add_all(["https://x/ok", "https://x/stream"]).await.unwrap_err();

    assert!(err.is_body());
    assert!(cache.keys().is_empty());
}

#[tokio::test]
async fn test_no_network_fetcher_fails_with_transport_error() {
    let cache = Cache::new("offline", CacheConfig::default(), Arc::new(NoNetwork));

    let err = cache.add("https://x/a").await.unwrap_err();

    assert!(err.is_transport());
    let source = err.into_source().unwrap();
    assert!(source.downcast_ref::<Offline>().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_out_of_order_completion_keeps_positional_pairing() {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let completed = order.clone();
    let fetcher: Arc<dyn Fetch> = Arc::new(move |request: HttpRequest| {
        let completed = completed.clone();
        async move {
            // earlier requests finish later
            let delay = match request.url().path() {
                "/first" => 300,
                "/second" => 200,
                _ => 100,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            completed.lock().unwrap().push(request.url().path().to_string());
            Ok::<_, BoxError>(HttpResponse::new(format!("body of {}", request.url().path())))
        }
    });
    let cache = cache_with(fetcher);

    cache
        .add_all(["https://x/first", "https://x/second", "https://x/third"])
        .await
        .unwrap();

    assert_eq!(*order.lock().unwrap(), ["/third", "/second", "/first"]);
    for path in ["first", "second", "third"] {
        let body = body_of(&cache, &format!("https://x/{path}")).await;
        assert_eq!(body, Some(format!("body of /{path}")));
    }
}

#[tokio::test]
async fn test_fetched_vary_uses_batch_request_headers() {
    let fetcher: Arc<dyn Fetch> = Arc::new(|request: HttpRequest| async move {
        let lang = request
            .header("accept-language")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none")
            .to_string();
        let response = HttpResponse::new(lang).with_header("vary", "Accept-Language")?;
        FetchResult::Ok(response)
    });
    let cache = cache_with(fetcher);
    let en = HttpRequest::parse("https://x/page")
        .unwrap()
        .with_header("accept-language", "en")
        .unwrap();
    let de = HttpRequest::parse("https://x/page")
        .unwrap()
        .with_header("accept-language", "de")
        .unwrap();

    cache.add_all([en.clone(), de.clone()]).await.unwrap();

    assert_eq!(cache.len(), 2);
    let hit = cache.match_request(&de).unwrap().unwrap();
    assert_eq!(hit.text().await.unwrap(), "de");
    let hit = cache.match_request(&en).unwrap().unwrap();
    assert_eq!(hit.text().await.unwrap(), "en");
}
