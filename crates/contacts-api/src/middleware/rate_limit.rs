//! Token bucket rate limiter middleware.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::Mutex;

use contacts_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::ClientIp;
use crate::state::AppState;

/// Bucket count above which idle buckets are swept on the next check.
const PRUNE_THRESHOLD: usize = 10_000;

/// Simple in-memory token bucket rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Client key → bucket state.
    buckets: Arc<Mutex<HashMap<String, TokenBucket>>>,
    /// Maximum tokens per bucket.
    max_tokens: u32,
    /// Token refill rate per second.
    refill_rate: f64,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Creates a new rate limiter.
    pub fn new(max_tokens: u32, refill_rate: f64) -> Self {
        Self {
            buckets: Arc::new(Mutex::new(HashMap::new())),
            max_tokens: max_tokens.max(1),
            refill_rate,
        }
    }

    /// Attempts to consume a token for the given key.
    pub async fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();

        if buckets.len() > PRUNE_THRESHOLD {
            let idle = self.full_after();
            buckets.retain(|_, b| now.duration_since(b.last_refill) < idle);
        }

        let bucket = buckets.entry(key.to_string()).or_insert(TokenBucket {
            tokens: f64::from(self.max_tokens),
            last_refill: now,
        });

        // Refill tokens
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_rate).min(f64::from(self.max_tokens));
        bucket.last_refill = now;

        // Try to consume
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Number of tracked clients.
    pub async fn tracked(&self) -> usize {
        self.buckets.lock().await.len()
    }

    /// Drop buckets that have been idle long enough to be full again.
    pub async fn prune(&self) {
        let idle = self.full_after();
        let now = Instant::now();
        self.buckets
            .lock()
            .await
            .retain(|_, b| now.duration_since(b.last_refill) < idle);
    }

    /// Time for an empty bucket to refill completely. Saturates when the
    /// rate is too small for the result to fit a `Duration`.
    fn full_after(&self) -> Duration {
        if self.refill_rate <= 0.0 {
            return Duration::MAX;
        }
        Duration::try_from_secs_f64(f64::from(self.max_tokens) / self.refill_rate)
            .unwrap_or(Duration::MAX)
    }
}

/// Rejects a request with 429 once its (client IP, route group) bucket is empty.
///
/// The group is the first path segment below `/api`, so every contact
/// route shares one budget per client.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.rate_limit.enabled {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let ClientIp(ip) = ClientIp::from_parts(&parts);
    let group = route_group(parts.uri.path());
    let key = format!("{ip}:{group}");

    if !state.rate_limiter.check(&key).await {
        tracing::warn!(client = %ip, group, "Rate limit exceeded");
        return Err(AppError::rate_limited("Too many requests").into());
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

fn route_group(path: &str) -> &str {
    path.trim_start_matches('/')
        .trim_start_matches("api/")
        .split('/')
        .next()
        .unwrap_or_default()
}
