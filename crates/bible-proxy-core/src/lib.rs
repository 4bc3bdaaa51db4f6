//! Bible text proxy core
//!
//! Insulates reading clients from the upstream scripture provider's
//! document-tree format and from ever seeing the upstream credential.
//!
//! The provider returns chapters as a nested node tree (paragraph and
//! text-run nodes, with per-verse ids on the text runs). Clients want a
//! flat, verse-indexed list. This crate owns that translation:
//!
//! ```text
//! Reading client → HTTP service → UpstreamClient (this crate) → provider
//!                                       ↓
//!                              ChapterPayload::from_body
//!                                       ↓
//!                              flatten_content → [VerseRecord]
//! ```
//!
//! The transform is stateless and idempotent: one invocation, one outbound
//! call, no retries, no caching. Responses whose body does not carry the
//! expected `data.content` tree are passed through unchanged so that flat
//! endpoints (search, already-flat providers) keep working.

pub mod content;
pub mod upstream;

pub use content::{flatten_content, reshape_body, verse_number, ChapterPayload, ContentNode};
pub use upstream::{UpstreamClient, UpstreamError, UpstreamResponse};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default upstream REST base URL.
pub const DEFAULT_UPSTREAM_BASE: &str = "https://rest.api.bible/v1";

/// Configuration for the proxy.
///
/// The credential is an explicit field rather than an ambient env read so
/// the dependency on a secret is visible at construction time and mockable
/// in tests. [`UpstreamClient::new`] fails closed when it is absent.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Upstream REST base, e.g. "https://rest.api.bible/v1"
    pub upstream_base: String,

    /// Upstream API credential. `None` means requests must abort before
    /// any network call is made.
    pub api_key: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            upstream_base: DEFAULT_UPSTREAM_BASE.to_string(),
            api_key: None,
        }
    }
}

impl ProxyConfig {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self {
            upstream_base: std::env::var("BIBLE_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE.to_string()),
            api_key: std::env::var("BIBLE_API_KEY").ok(),
        }
    }

    /// Config with an explicit credential (for tests and embedding).
    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            ..Self::default()
        }
    }
}
