#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo};
use qr_shortlink::application::services::ShortenService;
use qr_shortlink::domain::entities::ShortenedUrl;
use qr_shortlink::domain::shortener::{ShortenerError, UrlShortener};
use qr_shortlink::infrastructure::rate_limit::FixedWindowLimiter;
use qr_shortlink::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::Layer;

/// Shortener returning a fixed outcome and counting calls.
pub struct StubShortener {
    outcome: Result<String, ShortenerError>,
    calls: AtomicUsize,
}

impl StubShortener {
    pub fn succeeding(short_url: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(short_url.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(error: ShortenerError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlShortener for StubShortener {
    async fn shorten(&self, long_url: &str) -> Result<ShortenedUrl, ShortenerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
            .clone()
            .map(|short_url| ShortenedUrl::new(long_url, short_url))
    }
}

pub fn limiter(max_requests: u32) -> FixedWindowLimiter {
    FixedWindowLimiter::new(max_requests, Duration::from_secs(60), 500)
}

/// State trusting proxy headers, so tests can pick client keys.
pub fn create_test_state(shortener: Option<Arc<dyn UrlShortener>>) -> AppState {
    AppState::new(Arc::new(ShortenService::new(shortener)), limiter(10)).with_behind_proxy(true)
}

pub fn fallback_state() -> AppState {
    create_test_state(None)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

/// Inserts a fixed peer address, as `into_make_service_with_connect_info` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer(pub SocketAddr);

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.0,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}
