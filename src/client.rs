//! Typed client for the Factorial `/api/v1` resources.
//!
//! Each resource lives in its own submodule as an `impl Client` block; every public call maps to
//! exactly one HTTP request. `GET`, `POST` and `PUT` succeed on `200` only, bodiless `DELETE`s on
//! `200` or `204`.

pub mod company_holidays;
pub mod documents;
pub mod employees;
pub mod folders;
pub mod hiring_versions;
pub mod leaves;
pub mod locations;
pub mod payslips;
pub mod shifts;
pub mod teams;
pub mod webhooks;

pub use company_holidays::*;
pub use documents::*;
pub use employees::*;
pub use folders::*;
pub use hiring_versions::*;
pub use leaves::*;
pub use locations::*;
pub use payslips::*;
pub use shifts::*;
pub use teams::*;
pub use webhooks::*;

// std
use std::time::Duration as StdDuration;
// crates.io
use serde::{Deserializer, de::DeserializeOwned};
// self
use crate::{
	_prelude::*,
	auth::{OwnerId, Secret},
	error::{ConfigError, DecodeError},
	flows::TokenSource,
	http::{ApiResponse, DEFAULT_TIMEOUT, ReqwestHttpClient},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{self, FACTORIAL_API_URL, ProviderConfigError},
};

const OK: &[StatusCode] = &[StatusCode::OK];
const OK_OR_NO_CONTENT: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// How the client authenticates its requests.
#[derive(Clone)]
pub enum Credentials {
	/// Static access token sent as-is on every request.
	Bearer(Secret),
	/// Token obtained from a [`TokenSource`] before every request, refreshed when expired.
	Managed {
		/// Source handing out valid tokens.
		source: TokenSource,
		/// Owner whose token authenticates the requests.
		owner: OwnerId,
	},
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Credentials::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
			Credentials::Managed { owner, .. } =>
				f.debug_struct("Managed").field("owner", owner).finish_non_exhaustive(),
		}
	}
}

/// Factorial API client.
///
/// Cheap to clone; clones share the connection pool and credentials.
#[derive(Clone, Debug)]
pub struct Client {
	http: ReqwestHttpClient,
	api_url: Url,
	credentials: Credentials,
}
impl Client {
	/// Starts a builder for a client authenticated with `credentials`.
	pub fn builder(credentials: Credentials) -> ClientBuilder {
		ClientBuilder::new(credentials)
	}

	/// Builds a client with default settings authenticated by a static access token.
	pub fn with_bearer(access_token: impl Into<String>) -> Result<Self> {
		Self::builder(Credentials::Bearer(Secret::new(access_token))).build()
	}

	/// Builds a client with default settings whose tokens come from `source` for `owner`.
	pub fn with_token_source(source: TokenSource, owner: OwnerId) -> Result<Self> {
		Self::builder(Credentials::Managed { source, owner }).build()
	}

	/// API origin requests are sent to.
	pub fn api_url(&self) -> &Url {
		&self.api_url
	}

	/// Credentials attached to every request.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	pub(crate) async fn get<T>(&self, path: &str, query: Option<&Query>) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.execute(Method::GET, self.endpoint(path, query), None, OK).await?;

		decode(&response)
	}

	pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let body = encode(body)?;
		let response =
			self.execute(Method::POST, self.endpoint(path, None), Some(body), OK).await?;

		decode(&response)
	}

	pub(crate) async fn post_empty<T>(&self, path: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.execute(Method::POST, self.endpoint(path, None), None, OK).await?;

		decode(&response)
	}

	pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let body = encode(body)?;
		let response = self.execute(Method::PUT, self.endpoint(path, None), Some(body), OK).await?;

		decode(&response)
	}

	pub(crate) async fn delete(&self, path: &str) -> Result<()> {
		self.execute(Method::DELETE, self.endpoint(path, None), None, OK_OR_NO_CONTENT).await?;

		Ok(())
	}

	pub(crate) async fn delete_with_body<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let body = encode(body)?;
		let response =
			self.execute(Method::DELETE, self.endpoint(path, None), Some(body), OK).await?;

		decode(&response)
	}

	fn endpoint(&self, path: &str, query: Option<&Query>) -> Url {
		let mut url = provider::config::join_path(&self.api_url, path);

		if let Some(query) = query.filter(|query| !query.is_empty()) {
			url.query_pairs_mut().extend_pairs(query.iter());
		}

		url
	}

	async fn bearer(&self) -> Result<Secret> {
		match &self.credentials {
			Credentials::Bearer(secret) => Ok(secret.clone()),
			Credentials::Managed { source, owner } => Ok(source.token(owner).await?.access_token),
		}
	}

	async fn execute(
		&self,
		method: Method,
		url: Url,
		body: Option<Vec<u8>>,
		accepted: &[StatusCode],
	) -> Result<ApiResponse> {
		const KIND: FlowKind = FlowKind::Api;

		let span = FlowSpan::new(KIND, "request");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let bearer = self.bearer().await?;
				let response = self.http.send(method, &url, Some(bearer.expose()), body).await?;

				response.require(accepted)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}

/// Builder for [`Client`] values.
#[derive(Clone, Debug)]
pub struct ClientBuilder {
	credentials: Credentials,
	api_url: String,
	timeout: StdDuration,
	http: Option<ReqwestHttpClient>,
}
impl ClientBuilder {
	/// Creates a builder pointing at the production API with a 30 second timeout.
	pub fn new(credentials: Credentials) -> Self {
		Self {
			credentials,
			api_url: FACTORIAL_API_URL.into(),
			timeout: DEFAULT_TIMEOUT,
			http: None,
		}
	}

	/// Overrides the API origin, e.g. to target a sandbox or a mock server.
	pub fn api_url(mut self, url: impl Into<String>) -> Self {
		self.api_url = url.into();

		self
	}

	/// Overrides the outbound timeout. Ignored when a custom HTTP client is supplied.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Reuses a caller-built HTTP client.
	pub fn http_client(mut self, http: ReqwestHttpClient) -> Self {
		self.http = Some(http);

		self
	}

	/// Validates the settings and builds the client.
	pub fn build(self) -> Result<Client> {
		let api_url =
			provider::config::parse_url("api", &self.api_url).map_err(ConfigError::from)?;
		let http = match self.http {
			Some(http) => http,
			None => {
				if self.timeout.is_zero() {
					return Err(ConfigError::from(ProviderConfigError::ZeroTimeout).into());
				}

				ReqwestHttpClient::with_timeout(self.timeout)?
			},
		};

		Ok(Client { http, api_url, credentials: self.credentials })
	}
}

/// Query parameters used to filter list endpoints.
///
/// ```
/// use factorial_client::client::Query;
///
/// let filter = Query::new().with("employee_id", 42).with("folder_id", 7);
///
/// assert_eq!(filter.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);
impl Query {
	/// Creates an empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `key=value`.
	pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
		self.0.push((key.into(), value.to_string()));

		self
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no parameter is set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over the `(key, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}
}

fn encode<B>(body: &B) -> Result<Vec<u8>>
where
	B: ?Sized + Serialize,
{
	serde_json::to_vec(body).map_err(Error::Encode)
}

fn decode<T>(response: &ApiResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	Ok(DecodeError::decode(&response.body, response.status.as_u16())?)
}

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn client(api_url: &str) -> Client {
		Client::builder(Credentials::Bearer(Secret::new("token")))
			.api_url(api_url)
			.build()
			.expect("Client fixture should build.")
	}

	#[test]
	fn endpoint_joins_path_and_query() {
		let client = client("http://127.0.0.1:4010/");
		let url = client.endpoint(
			"/api/v1/documents",
			Some(&Query::new().with("employee_id", 3).with("folder_id", 9)),
		);

		assert_eq!(url.as_str(), "http://127.0.0.1:4010/api/v1/documents?employee_id=3&folder_id=9");
	}

	#[test]
	fn empty_query_adds_no_question_mark() {
		let client = client("http://127.0.0.1:4010");
		let url = client.endpoint("/api/v1/teams", Some(&Query::new()));

		assert_eq!(url.as_str(), "http://127.0.0.1:4010/api/v1/teams");
	}

	#[test]
	fn builder_rejects_bad_settings() {
		let credentials = Credentials::Bearer(Secret::new("token"));

		assert!(matches!(
			Client::builder(credentials.clone()).api_url("mailto:hr@example.com").build(),
			Err(Error::Config(ConfigError::Provider(ProviderConfigError::UnsupportedUrl { .. })))
		));
		assert!(matches!(
			Client::builder(credentials).timeout(StdDuration::ZERO).build(),
			Err(Error::Config(ConfigError::Provider(ProviderConfigError::ZeroTimeout)))
		));
	}

	#[test]
	fn credentials_debug_is_redacted() {
		let client = Client::with_bearer("very-secret").expect("Default client should build.");

		assert!(!format!("{client:?}").contains("very-secret"));
		assert_eq!(client.api_url().as_str(), "https://api.factorialhr.com/");
	}

	#[test]
	fn null_fields_decode_to_defaults() {
		#[derive(Deserialize)]
		struct Sample {
			#[serde(default, deserialize_with = "null_as_default")]
			ids: Vec<u64>,
			#[serde(default, deserialize_with = "null_as_default")]
			flag: bool,
		}

		let sample: Sample =
			serde_json::from_str(r#"{"ids":null}"#).expect("Null list should decode.");

		assert!(sample.ids.is_empty());
		assert!(!sample.flag);
	}
}
