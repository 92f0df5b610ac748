//! Validated OAuth provider configuration and its builder.

// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	auth::{ClientId, IdentifierError, ScopeSet, ScopeValidationError, Secret},
	http::DEFAULT_TIMEOUT,
};

/// Production Factorial API origin.
pub const FACTORIAL_API_URL: &str = "https://api.factorialhr.com";
/// Authorization endpoint path relative to the API origin.
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";
/// Token endpoint path relative to the API origin.
pub const TOKEN_PATH: &str = "/oauth/token";

/// Errors raised while constructing or validating a [`ProviderConfig`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderConfigError {
	/// No client identifier was supplied.
	#[error("Missing client id.")]
	MissingClientId,
	/// No client secret was supplied.
	#[error("Missing client secret.")]
	MissingClientSecret,
	/// No redirect URL was supplied.
	#[error("Missing redirect URL.")]
	MissingRedirectUrl,
	/// Client identifier failed validation.
	#[error(transparent)]
	InvalidClientId(#[from] IdentifierError),
	/// Requested scopes failed validation.
	#[error(transparent)]
	InvalidScope(#[from] ScopeValidationError),
	/// A URL field could not be parsed.
	#[error("The {field} URL is invalid.")]
	InvalidUrl {
		/// Which field failed to parse.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A URL field uses a scheme other than `http`/`https` or cannot carry a path.
	#[error("The {field} URL must be an http(s) base URL: {url}.")]
	UnsupportedUrl {
		/// Which field failed validation.
		field: &'static str,
		/// URL that failed validation.
		url: String,
	},
	/// Timeout must be non-zero.
	#[error("Outbound timeout must be greater than zero.")]
	ZeroTimeout,
}

/// Authorization and token endpoints derived from the API origin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint users are redirected to.
	pub authorization: Url,
	/// Token endpoint used for code exchanges and refreshes.
	pub token: Url,
}

/// Immutable provider configuration consumed by [`OAuthProvider`](crate::provider::OAuthProvider).
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
	/// OAuth client identifier.
	pub client_id: ClientId,
	/// OAuth client secret.
	pub client_secret: Secret,
	/// Redirect URL registered with the Factorial application.
	pub redirect_url: Url,
	/// Scopes requested during authorization.
	pub scopes: ScopeSet,
	/// API origin; overridable for tests and sandboxes.
	pub api_url: Url,
	/// Endpoints derived from [`api_url`](Self::api_url).
	pub endpoints: ProviderEndpoints,
	/// Outbound timeout for token endpoint calls.
	pub timeout: StdDuration,
}
impl ProviderConfig {
	/// Creates a new builder with Factorial defaults.
	pub fn builder() -> ProviderConfigBuilder {
		ProviderConfigBuilder::default()
	}
}
impl Debug for ProviderConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("redirect_url", &self.redirect_url.as_str())
			.field("scopes", &self.scopes)
			.field("endpoints", &self.endpoints)
			.field("timeout", &self.timeout)
			.finish()
	}
}

/// Builder for [`ProviderConfig`] values.
#[derive(Clone, Debug)]
pub struct ProviderConfigBuilder {
	client_id: Option<String>,
	client_secret: Option<Secret>,
	redirect_url: Option<String>,
	scopes: Vec<String>,
	api_url: String,
	timeout: StdDuration,
}
impl ProviderConfigBuilder {
	/// Sets the OAuth client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the OAuth client secret.
	pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(Secret::new(secret));

		self
	}

	/// Sets the redirect URL registered with Factorial.
	pub fn redirect_url(mut self, url: impl Into<String>) -> Self {
		self.redirect_url = Some(url.into());

		self
	}

	/// Adds a single requested scope.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scopes.push(scope.into());

		self
	}

	/// Adds several requested scopes.
	pub fn scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes.extend(scopes.into_iter().map(Into::into));

		self
	}

	/// Overrides the API origin (defaults to [`FACTORIAL_API_URL`]).
	pub fn api_url(mut self, url: impl Into<String>) -> Self {
		self.api_url = url.into();

		self
	}

	/// Overrides the outbound timeout (defaults to 30 seconds).
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ProviderConfig, ProviderConfigError> {
		let client_id = ClientId::new(self.client_id.ok_or(ProviderConfigError::MissingClientId)?)?;
		let client_secret = self
			.client_secret
			.filter(|secret| !secret.expose().is_empty())
			.ok_or(ProviderConfigError::MissingClientSecret)?;
		let redirect_url = parse_url(
			"redirect",
			&self.redirect_url.ok_or(ProviderConfigError::MissingRedirectUrl)?,
		)?;
		let api_url = parse_url("api", &self.api_url)?;
		let scopes = ScopeSet::new(self.scopes)?;

		if self.timeout.is_zero() {
			return Err(ProviderConfigError::ZeroTimeout);
		}

		let endpoints = ProviderEndpoints {
			authorization: join_path(&api_url, AUTHORIZE_PATH),
			token: join_path(&api_url, TOKEN_PATH),
		};

		Ok(ProviderConfig {
			client_id,
			client_secret,
			redirect_url,
			scopes,
			api_url,
			endpoints,
			timeout: self.timeout,
		})
	}
}
impl Default for ProviderConfigBuilder {
	fn default() -> Self {
		Self {
			client_id: None,
			client_secret: None,
			redirect_url: None,
			scopes: Vec::new(),
			api_url: FACTORIAL_API_URL.into(),
			timeout: DEFAULT_TIMEOUT,
		}
	}
}

/// Appends `path` to the path of `base`, keeping exactly one slash between them.
///
/// Unlike [`Url::join`], an origin mounted under a prefix (`https://host/sandbox`) keeps its
/// prefix.
pub fn join_path(base: &Url, path: &str) -> Url {
	let mut url = base.clone();
	let joined =
		format!("{}/{}", base.path().trim_end_matches('/'), path.trim_start_matches('/'));

	url.set_path(&joined);

	url
}

pub(crate) fn parse_url(field: &'static str, raw: &str) -> Result<Url, ProviderConfigError> {
	let url = Url::parse(raw).map_err(|source| ProviderConfigError::InvalidUrl { field, source })?;

	validate_base(field, url)
}

pub(crate) fn validate_base(field: &'static str, url: Url) -> Result<Url, ProviderConfigError> {
	if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
		return Err(ProviderConfigError::UnsupportedUrl { field, url: url.to_string() });
	}

	Ok(url)
}
