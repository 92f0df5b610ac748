//! Factorial OAuth provider: validated configuration plus the HTTP client used for token calls.
//!
//! [`OAuthProvider`] is the entry point for the authorization-code grant. The grant operations
//! themselves live in [`crate::flows`].

pub mod config;

pub use config::*;

// self
use crate::{_prelude::*, http::ReqwestHttpClient};

/// OAuth client bound to one Factorial application.
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone, Debug)]
pub struct OAuthProvider {
	config: Arc<ProviderConfig>,
	http: ReqwestHttpClient,
}
impl OAuthProvider {
	/// Builds a provider whose token calls honor `config.timeout`.
	pub fn new(config: ProviderConfig) -> Result<Self> {
		let http = ReqwestHttpClient::with_timeout(config.timeout)?;

		Ok(Self::with_http_client(config, http))
	}

	/// Builds a provider that reuses an existing HTTP client.
	pub fn with_http_client(config: ProviderConfig, http: ReqwestHttpClient) -> Self {
		Self { config: Arc::new(config), http }
	}

	/// Validated configuration backing this provider.
	pub fn config(&self) -> &ProviderConfig {
		&self.config
	}

	/// HTTP client used for token endpoint calls.
	pub fn http_client(&self) -> &ReqwestHttpClient {
		&self.http
	}
}
