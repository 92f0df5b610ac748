//! HTTP transport shared by the resource client and the token endpoint calls.
//!
//! Every request carries `Accept: application/json` and `Content-Type: application/json`,
//! including bodiless `GET` and `DELETE` calls, because the Factorial API keys content
//! negotiation off those headers. The transport never retries and never judges status codes;
//! callers decide which statuses count as success.

// std
use std::{ops::Deref, time::Duration as StdDuration};
// crates.io
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
// self
use crate::{_prelude::*, error::{ConfigError, TransportError}, obs};

/// Default outbound timeout applied to every request.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds a client whose requests fail once `timeout` elapses.
	pub fn with_timeout(timeout: StdDuration) -> Result<Self, ConfigError> {
		ReqwestClient::builder()
			.timeout(timeout)
			.build()
			.map(Self)
			.map_err(ConfigError::http_client_build)
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Sends one request and buffers the response body.
	///
	/// `bearer` becomes the `Authorization: Bearer` header when present.
	pub async fn send(
		&self,
		method: Method,
		url: &Url,
		bearer: Option<&str>,
		body: Option<Vec<u8>>,
	) -> Result<ApiResponse, TransportError> {
		let mut request = self
			.0
			.request(method.clone(), url.clone())
			.header(ACCEPT, HeaderValue::from_static("application/json"))
			.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		if let Some(token) = bearer {
			request = request.header(AUTHORIZATION, format!("Bearer {token}"));
		}
		if let Some(bytes) = body {
			request = request.body(bytes);
		}

		let response =
			request.send().await.map_err(|e| TransportError::from_reqwest(url, e))?;
		let status = response.status();
		let body = response.bytes().await.map_err(|e| TransportError::from_reqwest(url, e))?;

		obs::record_http_exchange(&method, url.path(), status.as_u16());

		Ok(ApiResponse { status, body: body.to_vec() })
	}
}
impl Default for ReqwestHttpClient {
	fn default() -> Self {
		Self(ReqwestClient::new())
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Buffered response returned by [`ReqwestHttpClient::send`].
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// Status line of the response.
	pub status: StatusCode,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Canonical reason phrase for the status, or an empty string for unknown codes.
	pub fn reason(&self) -> &'static str {
		self.status.canonical_reason().unwrap_or_default()
	}

	/// Converts the response into [`Error::HttpStatus`] unless its status is listed in `accepted`.
	pub fn require(self, accepted: &[StatusCode]) -> Result<Self> {
		if accepted.contains(&self.status) {
			Ok(self)
		} else {
			Err(Error::HttpStatus { status: self.status.as_u16(), reason: self.reason().into() })
		}
	}
}
