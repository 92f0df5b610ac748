//! Crate-level error types shared by the client, OAuth flows, and repositories.

// self
use crate::{_prelude::*, auth::OwnerId, repository::RepositoryError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Every failure is surfaced as-is; nothing in the crate retries or swallows errors, so callers
/// decide whether a failure is transient.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded into the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Token storage failure.
	#[error("{0}")]
	Repository(
		#[from]
		#[source]
		RepositoryError,
	),

	/// The API answered with a status the endpoint does not treat as success.
	#[error("Factorial API responded with {status} {reason}.")]
	HttpStatus {
		/// Raw HTTP status code.
		status: u16,
		/// Canonical reason phrase for the status, if known.
		reason: String,
	},
	/// Request payload could not be encoded as JSON.
	#[error("Request body could not be encoded.")]
	Encode(#[source] serde_json::Error),
	/// Authorization code exchange was rejected or returned an unusable token.
	#[error("Authorization code exchange failed.")]
	AuthExchange(#[source] TokenEndpointError),
	/// Refresh token exchange was rejected or returned an unusable token.
	#[error("Token refresh failed.")]
	Refresh(#[source] TokenEndpointError),
	/// No token is stored for the requested owner.
	#[error("No token is stored for owner `{owner}`.")]
	NotFound {
		/// Owner whose token was requested.
		owner: OwnerId,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Provider configuration failed validation.
	#[error(transparent)]
	Provider(#[from] crate::provider::ProviderConfigError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// Target URL without query parameters.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The outbound timeout elapsed before a response arrived.
	#[error("Request to {url} timed out.")]
	Timeout {
		/// Target URL without query parameters.
		url: String,
	},
}
impl TransportError {
	/// Classifies a reqwest failure for the given target.
	pub fn from_reqwest(url: &Url, err: ReqwestError) -> Self {
		let url = redact_query(url);

		if err.is_timeout() {
			return Self::Timeout { url };
		}

		Self::Network { url, source: Box::new(err) }
	}
}

/// JSON decoding failure annotated with the path of the offending field.
#[derive(Debug, ThisError)]
#[error("Response body could not be decoded at `{}`.", .source.path())]
pub struct DecodeError {
	/// Structured parsing failure.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
	/// HTTP status of the response that carried the body.
	pub status: u16,
}
impl DecodeError {
	/// Decodes `body` into `T`, recording the JSON path on failure.
	pub fn decode<T>(body: &[u8], status: u16) -> Result<T, Self>
	where
		T: serde::de::DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut de).map_err(|source| Self { source, status })
	}
}

/// Failures raised while talking to the OAuth token endpoint.
#[derive(Debug, ThisError)]
pub enum TokenEndpointError {
	/// Transport failure while calling the token endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint response was not valid JSON of the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint responded with {status}{}.", oauth_suffix(.oauth_error))]
	Status {
		/// Raw HTTP status code.
		status: u16,
		/// OAuth `error` code from the response body, if any.
		oauth_error: Option<String>,
		/// OAuth `error_description` from the response body, if any.
		description: Option<String>,
	},
	/// Token request payload could not be encoded.
	#[error("Token request could not be encoded.")]
	Encode(#[source] serde_json::Error),
	/// Token endpoint response omitted `expires_in`.
	#[error("Token endpoint response is missing expires_in.")]
	MissingExpiresIn,
	/// Token endpoint returned a non-positive duration.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
	/// The stored token carries no refresh token.
	#[error("Stored token is missing a refresh token.")]
	MissingRefreshToken,
}

fn oauth_suffix(oauth_error: &Option<String>) -> String {
	oauth_error.as_deref().map(|e| format!(" ({e})")).unwrap_or_default()
}

fn redact_query(url: &Url) -> String {
	let mut url = url.clone();

	url.set_query(None);

	url.to_string()
}
