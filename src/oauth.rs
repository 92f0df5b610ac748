//! Wire format of the Factorial OAuth endpoints.
//!
//! The authorize URL is rendered through the `oauth2` crate. Token calls are plain JSON
//! `POST`s because Factorial's token endpoint takes a JSON document rather than the form
//! encoding `oauth2` speaks.

pub use oauth2;

// crates.io
use oauth2::{AuthUrl, CsrfToken, RedirectUrl, Scope, basic::BasicClient};
// self
use crate::{
	_prelude::*,
	auth::{Secret, Token},
	error::{DecodeError, TokenEndpointError},
	http::ReqwestHttpClient,
	provider::ProviderConfig,
};

/// OAuth grant types spoken by the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization code exchange.
	AuthorizationCode,
	/// Refresh token exchange.
	RefreshToken,
}
impl GrantType {
	/// Wire value of the `grant_type` field.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// JSON document posted to the token endpoint.
#[derive(Clone, Serialize)]
pub struct TokenRequest<'a> {
	/// OAuth client identifier.
	pub client_id: &'a str,
	/// OAuth client secret.
	pub client_secret: &'a str,
	/// Grant being exercised.
	pub grant_type: GrantType,
	/// Authorization code (code exchange only).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub code: Option<&'a str>,
	/// Redirect URL registered with the application (code exchange only).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub redirect_uri: Option<&'a str>,
	/// Refresh token (refresh only).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<&'a str>,
}
impl<'a> TokenRequest<'a> {
	/// Builds the body of an authorization code exchange.
	pub fn authorization_code(config: &'a ProviderConfig, code: &'a str) -> Self {
		Self {
			client_id: &config.client_id,
			client_secret: config.client_secret.expose(),
			grant_type: GrantType::AuthorizationCode,
			code: Some(code),
			redirect_uri: Some(config.redirect_url.as_str()),
			refresh_token: None,
		}
	}

	/// Builds the body of a refresh token exchange.
	pub fn refresh_token(config: &'a ProviderConfig, refresh_token: &'a Secret) -> Self {
		Self {
			client_id: &config.client_id,
			client_secret: config.client_secret.expose(),
			grant_type: GrantType::RefreshToken,
			code: None,
			redirect_uri: None,
			refresh_token: Some(refresh_token.expose()),
		}
	}
}
impl Debug for TokenRequest<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRequest")
			.field("client_id", &self.client_id)
			.field("grant_type", &self.grant_type)
			.field("redirect_uri", &self.redirect_uri)
			.finish_non_exhaustive()
	}
}

/// Successful token endpoint response.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
	/// Newly issued access token.
	pub access_token: String,
	/// Token type, usually `Bearer`.
	#[serde(default)]
	pub token_type: Option<String>,
	/// Newly issued refresh token, if rotated.
	#[serde(default)]
	pub refresh_token: Option<String>,
	/// Lifetime of the access token in seconds.
	#[serde(default)]
	pub expires_in: Option<i64>,
}
impl TokenResponse {
	/// Converts the response into a [`Token`] whose expiry is measured from `received_at`.
	///
	/// `previous_refresh` is carried over when the response does not rotate the refresh token.
	pub fn into_token(
		self,
		received_at: OffsetDateTime,
		previous_refresh: Option<&Secret>,
	) -> Result<Token, TokenEndpointError> {
		let expires_in = self.expires_in.ok_or(TokenEndpointError::MissingExpiresIn)?;

		if expires_in <= 0 {
			return Err(TokenEndpointError::NonPositiveExpiresIn);
		}

		let refresh_token = self
			.refresh_token
			.filter(|refresh| !refresh.is_empty())
			.map(Secret::new)
			.or_else(|| previous_refresh.cloned());

		Ok(Token {
			access_token: Secret::new(self.access_token),
			token_type: self
				.token_type
				.filter(|kind| !kind.is_empty())
				.unwrap_or_else(|| Token::DEFAULT_TOKEN_TYPE.into()),
			refresh_token,
			expires_at: received_at + Duration::seconds(expires_in),
		})
	}
}
impl Debug for TokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenResponse")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("expires_in", &self.expires_in)
			.finish()
	}
}

/// RFC 6749 error document returned alongside non-success statuses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OAuthErrorBody {
	/// OAuth error code such as `invalid_grant`.
	#[serde(default)]
	pub error: Option<String>,
	/// Human-readable explanation.
	#[serde(default)]
	pub error_description: Option<String>,
}

/// Renders the authorize URL for `config` carrying the opaque `state` value.
pub fn authorize_url(config: &ProviderConfig, state: &str) -> Url {
	let state = state.to_owned();
	let client = BasicClient::new(oauth2::ClientId::new(config.client_id.to_string()))
		.set_auth_uri(AuthUrl::from_url(config.endpoints.authorization.clone()))
		.set_redirect_uri(RedirectUrl::from_url(config.redirect_url.clone()));
	let (url, _) = client
		.authorize_url(move || CsrfToken::new(state))
		.add_scopes(config.scopes.iter().map(|scope| Scope::new(scope.to_owned())))
		.url();

	url
}

/// Posts `request` to the token endpoint and converts a `200` answer into a [`Token`].
pub async fn request_token(
	http: &ReqwestHttpClient,
	token_url: &Url,
	request: &TokenRequest<'_>,
	previous_refresh: Option<&Secret>,
) -> Result<Token, TokenEndpointError> {
	let body = serde_json::to_vec(request).map_err(TokenEndpointError::Encode)?;
	let response = http.send(Method::POST, token_url, None, Some(body)).await?;
	let received_at = OffsetDateTime::now_utc();
	let status = response.status.as_u16();

	if response.status != StatusCode::OK {
		let OAuthErrorBody { error, error_description } =
			serde_json::from_slice(&response.body).unwrap_or_default();

		return Err(TokenEndpointError::Status {
			status,
			oauth_error: error,
			description: error_description,
		});
	}

	DecodeError::decode::<TokenResponse>(&response.body, status)?
		.into_token(received_at, previous_refresh)
}
