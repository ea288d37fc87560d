//! Authenticated session pool.
//!
//! One session is opened per credential token. Each session is a reqwest
//! client carrying the token cookie and a stable device id, impersonating a
//! browser profile. The pool hands sessions out round-robin; interleaving
//! of requests across sessions is the platform's business, not ours.

use crate::config::TokenSet;
use crate::platform::PlatformError;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Client;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Settle delay after establishing sessions. The platform rejects requests
/// made immediately after session creation, so this is a correctness
/// requirement, not a tunable.
pub const SESSION_SETTLE: Duration = Duration::from_secs(3);

/// Browser profile a session impersonates when talking to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientProfile {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl ClientProfile {
    /// Case-insensitive lookup by profile name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "chromium" => Some(Self::Chromium),
            "firefox" => Some(Self::Firefox),
            "webkit" => Some(Self::Webkit),
            _ => None,
        }
    }

    fn user_agent(self) -> &'static str {
        match self {
            Self::Chromium => {
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
            }
            Self::Firefox => {
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) \
                 Gecko/20100101 Firefox/121.0"
            }
            Self::Webkit => {
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                 AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15"
            }
        }
    }
}

impl std::str::FromStr for ClientProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!("unknown client profile: {s} (expected chromium, firefox, or webkit)")
        })
    }
}

/// A live authenticated handle bound to one credential token.
pub struct Session {
    token: String,
    device_id: String,
    client: Client,
}

impl Session {
    fn open(token: &str, profile: ClientProfile) -> Result<Self, PlatformError> {
        let device_id = generate_device_id();

        let mut headers = HeaderMap::new();
        let cookie = format!("msToken={token}");
        headers.insert(COOKIE, HeaderValue::from_str(&cookie)?);

        let client = Client::builder()
            .user_agent(profile.user_agent())
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            token: token.to_string(),
            device_id,
            client,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// One authenticated session per credential token.
///
/// Sessions live exactly as long as the pool; dropping it tears them down
/// on every exit path, including errors during fetching.
pub struct SessionPool {
    sessions: Vec<Session>,
    next: AtomicUsize,
}

impl SessionPool {
    /// Opens one session per token, then waits out `settle` before the pool
    /// is handed to callers.
    pub async fn open(
        tokens: &TokenSet,
        profile: ClientProfile,
        settle: Duration,
    ) -> Result<Self, PlatformError> {
        let mut sessions = Vec::with_capacity(tokens.len());
        for token in tokens.iter() {
            sessions.push(Session::open(token, profile)?);
        }

        tracing::info!(
            "Opened {} session(s), settling for {:?}",
            sessions.len(),
            settle
        );
        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }

        Ok(Self {
            sessions,
            next: AtomicUsize::new(0),
        })
    }

    /// Hands out sessions round-robin.
    ///
    /// The pool is never empty: it is built from a [`TokenSet`], which
    /// guarantees at least one token.
    pub fn checkout(&self) -> &Session {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.sessions.len();
        &self.sessions[index]
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Generates a plausible numeric device id, unique within the process.
fn generate_device_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    let salt = COUNTER
        .fetch_add(1, Ordering::Relaxed)
        .wrapping_mul(0x9e37_79b9_7f4a_7c15);

    // Platform device ids are 19 digits starting with 7.
    format!("7{:018}", (nanos ^ salt) % 1_000_000_000_000_000_000)
}
