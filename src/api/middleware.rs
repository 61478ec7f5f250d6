//! CORS and chat rate limiting.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::handlers::ApiError;
use crate::config::Config;

/// HTTP-facing settings derived from [`Config`].
#[derive(Clone, Debug, Default)]
pub struct SecurityConfig {
    /// Allowed CORS origins; `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    /// Applied to `POST /api/chat` only.
    pub rate_limiter: Option<RateLimiter>,
}

impl SecurityConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cors_origins: config.cors_origins.clone(),
            rate_limiter: config.chat_rate_limit.map(|limit| {
                RateLimiter::new(limit, Duration::from_secs(60))
                    .with_trusted_proxy(config.trust_proxy)
            }),
        }
    }

    /// No rate limit, any origin.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_cors_origins(origins: Vec<String>) -> Self {
        Self {
            cors_origins: Some(origins),
            rate_limiter: None,
        }
    }

    /// Limit chat requests per client per minute.
    pub fn with_rate_limit(max_requests: u32) -> Self {
        Self {
            cors_origins: None,
            rate_limiter: Some(RateLimiter::new(max_requests, Duration::from_secs(60))),
        }
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let Some(origins) = &self.cors_origins else {
            return CorsLayer::permissive();
        };

        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Simple in-memory rate limiter using a sliding window.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    /// Maximum requests allowed per window
    max_requests: u32,
    window: Duration,
    /// Key on `X-Forwarded-For` / `X-Real-IP` instead of the socket peer.
    trust_proxy: bool,
    clients: Arc<Mutex<Clients>>,
}

#[derive(Debug)]
struct Clients {
    /// Request instants per IP
    requests: HashMap<IpAddr, Vec<Instant>>,
    last_sweep: Instant,
}

impl Clients {
    fn sweep(&mut self, now: Instant, window: Duration) {
        self.requests.retain(|_, timestamps| {
            timestamps.retain(|&t| now.duration_since(t) < window);
            !timestamps.is_empty()
        });
        self.last_sweep = now;
    }
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            trust_proxy: false,
            clients: Arc::new(Mutex::new(Clients {
                requests: HashMap::new(),
                last_sweep: Instant::now(),
            })),
        }
    }

    /// Only enable behind a proxy that overwrites the forwarding headers.
    pub fn with_trusted_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }

    /// Record a request from `ip`. Returns false when it is over the limit.
    ///
    /// Clients idle for a whole window are dropped at most once per window.
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();

        let mut clients = self.clients.lock().expect("rate limiter lock poisoned");
        if now.duration_since(clients.last_sweep) >= self.window {
            clients.sweep(now, self.window);
        }

        let entry = clients.requests.entry(ip).or_default();
        entry.retain(|&t| now.duration_since(t) < self.window);

        if entry.len() < self.max_requests as usize {
            entry.push(now);
            true
        } else {
            if entry.is_empty() {
                clients.requests.remove(&ip);
            }
            false
        }
    }

    /// Drop clients with no requests inside the window.
    pub fn cleanup(&self) {
        self.clients
            .lock()
            .expect("rate limiter lock poisoned")
            .sweep(Instant::now(), self.window);
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.clients
            .lock()
            .expect("rate limiter lock poisoned")
            .requests
            .len()
    }
}

/// Rejects chat requests over the per-IP limit with 429.
pub async fn rate_limit_middleware(
    State(rate_limiter): State<RateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = extract_client_ip(&request, rate_limiter.trust_proxy);

    if rate_limiter.check(ip) {
        next.run(request).await
    } else {
        tracing::warn!("Rate limit exceeded for IP: {}", ip);
        ApiError::new(StatusCode::TOO_MANY_REQUESTS, "Too many requests").into_response()
    }
}

/// Client IP from the socket peer, or from proxy headers when trusted.
/// Falls back to localhost.
fn extract_client_ip(request: &Request<Body>, trust_proxy: bool) -> IpAddr {
    let header_ip = |name: &str| {
        request
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    };
    let peer_ip = || {
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
    };

    let ip = if trust_proxy {
        header_ip("X-Forwarded-For")
            .or_else(|| header_ip("X-Real-IP"))
            .or_else(peer_ip)
    } else {
        peer_ip()
    };
    ip.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limiter_allows_requests_under_limit() {
        let limiter = RateLimiter::new(5, Duration::from_secs(60));
        let ip: IpAddr = "192.168.1.1".parse().unwrap();

        for _ in 0..5 {
            assert!(limiter.check(ip));
        }
    }

    #[test]
    fn rate_limiter_blocks_requests_over_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let ip: IpAddr = "192.168.1.1".parse().unwrap();

        assert!(limiter.check(ip));
        assert!(limiter.check(ip));
        assert!(limiter.check(ip));

        assert!(!limiter.check(ip));
    }

    #[test]
    fn rate_limiter_tracks_ips_independently() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let ip1: IpAddr = "192.168.1.1".parse().unwrap();
        let ip2: IpAddr = "192.168.1.2".parse().unwrap();

        assert!(limiter.check(ip1));
        assert!(limiter.check(ip1));
        assert!(!limiter.check(ip1));

        assert!(limiter.check(ip2));
        assert!(limiter.check(ip2));
        assert!(!limiter.check(ip2));
    }

    #[test]
    fn rate_limiter_forgets_requests_outside_window() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        let ip: IpAddr = "10.0.0.1".parse().unwrap();

        assert!(limiter.check(ip));
        assert!(!limiter.check(ip));
        std::thread::sleep(Duration::from_millis(30));
        limiter.cleanup();
        assert_eq!(limiter.tracked_clients(), 0);
        assert!(limiter.check(ip));
    }

    #[test]
    fn rate_limiter_drops_idle_clients_on_check() {
        let limiter = RateLimiter::new(5, Duration::from_millis(200));
        for i in 0..1000u32 {
            assert!(limiter.check(IpAddr::V4(Ipv4Addr::from(0x0a00_0000 + i))));
        }
        assert_eq!(limiter.tracked_clients(), 1000);

        std::thread::sleep(Duration::from_millis(250));
        assert!(limiter.check("192.168.1.1".parse().unwrap()));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn rate_limiter_does_not_track_refused_clients() {
        let limiter = RateLimiter::new(0, Duration::from_secs(60));
        assert!(!limiter.check("192.168.1.1".parse().unwrap()));
        assert_eq!(limiter.tracked_clients(), 0);
    }

    fn forwarded_request(peer: &str) -> Request<Body> {
        let mut request = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(peer.parse::<SocketAddr>().unwrap()));
        request
    }

    #[test]
    fn client_ip_ignores_forwarded_header_by_default() {
        let request = forwarded_request("198.51.100.2:50000");
        assert_eq!(
            extract_client_ip(&request, false),
            "198.51.100.2".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn client_ip_reads_forwarded_header_behind_trusted_proxy() {
        let request = forwarded_request("198.51.100.2:50000");
        assert_eq!(
            extract_client_ip(&request, true),
            "203.0.113.7".parse::<IpAddr>().unwrap()
        );

        let request = Request::builder()
            .header("X-Real-IP", "203.0.113.9")
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            extract_client_ip(&request, true),
            "203.0.113.9".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn client_ip_defaults_to_localhost() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(extract_client_ip(&request, false), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(extract_client_ip(&request, true), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn security_config_follows_app_config() {
        let config = Config {
            chat_rate_limit: Some(5),
            trust_proxy: true,
            cors_origins: Some(vec!["http://localhost:3000".to_string()]),
            ..Config::default()
        };
        let security = SecurityConfig::from_config(&config);
        assert!(security.rate_limiter.as_ref().is_some_and(|l| l.trust_proxy));
        assert_eq!(
            security.cors_origins,
            Some(vec!["http://localhost:3000".to_string()])
        );

        let disabled = SecurityConfig::disabled();
        assert!(disabled.rate_limiter.is_none());
        assert!(disabled.cors_origins.is_none());
    }
}
