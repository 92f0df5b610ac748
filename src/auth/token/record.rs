//! Immutable token record, validity checks, and builder.

// self
use crate::{_prelude::*, auth::token::secret::Secret};

/// Validity of a token judged at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenState {
	/// Token can be attached to requests.
	Valid,
	/// Token reached its expiry (minus skew) and must be refreshed.
	Expired,
}

/// Errors produced by [`TokenBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum TokenBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
	/// Issued when no expiry (absolute or relative) was configured.
	#[error("Expiry must be supplied via expires_at or expires_in.")]
	MissingExpiry,
}

/// OAuth token issued by Factorial.
///
/// Tokens are never mutated in place; a refresh produces a brand new value that replaces the
/// stored one wholesale.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
	/// Access token secret; callers must avoid logging it.
	pub access_token: Secret,
	/// Token type reported by the provider, usually `Bearer`.
	pub token_type: String,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<Secret>,
	/// Instant after which the access token is no longer accepted.
	pub expires_at: OffsetDateTime,
}
impl Token {
	/// Token type assumed when the provider omits one.
	pub const DEFAULT_TOKEN_TYPE: &'static str = "Bearer";

	/// Returns a builder for constructing tokens.
	pub fn builder() -> TokenBuilder {
		TokenBuilder::default()
	}

	/// Judges the token at `instant`, treating it as expired `skew` ahead of its real expiry.
	pub fn state_at(&self, instant: OffsetDateTime, skew: Duration) -> TokenState {
		if self.expires_at <= instant + skew { TokenState::Expired } else { TokenState::Valid }
	}

	/// Returns `true` if the token is still usable against the current clock, without skew.
	pub fn is_valid(&self) -> bool {
		matches!(self.state_at(OffsetDateTime::now_utc(), Duration::ZERO), TokenState::Valid)
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Builder for [`Token`].
#[derive(Clone, Debug, Default)]
pub struct TokenBuilder {
	access_token: Option<Secret>,
	token_type: Option<String>,
	refresh_token: Option<Secret>,
	issued_at: Option<OffsetDateTime>,
	expires_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
}
impl TokenBuilder {
	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(Secret::new(token));

		self
	}

	/// Overrides the token type (defaults to `Bearer`).
	pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(Secret::new(token));

		self
	}

	/// Sets the instant `expires_in` is measured from; defaults to now.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets an absolute expiry instant.
	pub fn expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.expires_at = Some(instant);

		self
	}

	/// Sets a relative expiry duration from the issued instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Consumes the builder and produces a [`Token`].
	pub fn build(self) -> Result<Token, TokenBuilderError> {
		let access_token = self.access_token.ok_or(TokenBuilderError::MissingAccessToken)?;
		let expires_at = match (self.expires_at, self.expires_in) {
			(Some(instant), _) => instant,
			(None, Some(delta)) => self.issued_at.unwrap_or_else(OffsetDateTime::now_utc) + delta,
			(None, None) => return Err(TokenBuilderError::MissingExpiry),
		};

		Ok(Token {
			access_token,
			token_type: self.token_type.unwrap_or_else(|| Token::DEFAULT_TOKEN_TYPE.into()),
			refresh_token: self.refresh_token,
			expires_at,
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn token_expiring_at(instant: OffsetDateTime) -> Token {
		Token::builder()
			.access_token("access")
			.refresh_token("refresh")
			.expires_at(instant)
			.build()
			.expect("Token builder should succeed for state checks.")
	}

	#[test]
	fn state_honors_skew_boundary() {
		let expiry = macros::datetime!(2025-01-01 01:00 UTC);
		let token = token_expiring_at(expiry);
		let skew = Duration::seconds(10);

		assert_eq!(token.state_at(macros::datetime!(2025-01-01 00:59:49 UTC), skew), TokenState::Valid);
		assert_eq!(
			token.state_at(macros::datetime!(2025-01-01 00:59:50 UTC), skew),
			TokenState::Expired
		);
		assert_eq!(token.state_at(expiry, Duration::ZERO), TokenState::Expired);
		assert_eq!(token.state_at(expiry - Duration::seconds(1), Duration::ZERO), TokenState::Valid);
	}

	#[test]
	fn builder_handles_relative_expiry_and_defaults() {
		let token = Token::builder()
			.access_token("secret")
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expires_in(Duration::minutes(30))
			.build()
			.expect("Token builder should support relative expiry calculations.");

		assert_eq!(token.expires_at, macros::datetime!(2025-01-01 00:30 UTC));
		assert_eq!(token.token_type, "Bearer");
		assert!(token.refresh_token.is_none());
	}

	#[test]
	fn builder_requires_access_token_and_expiry() {
		assert_eq!(
			Token::builder().expires_in(Duration::minutes(1)).build(),
			Err(TokenBuilderError::MissingAccessToken)
		);
		assert_eq!(
			Token::builder().access_token("a").build(),
			Err(TokenBuilderError::MissingExpiry)
		);
	}

	#[test]
	fn debug_redacts_secrets() {
		let rendered = format!("{:?}", token_expiring_at(macros::datetime!(2025-01-01 00:00 UTC)));

		assert!(!rendered.contains("access\""));
		assert!(!rendered.contains("refresh\""));
		assert!(rendered.contains("<redacted>"));
	}

	#[test]
	fn serde_round_trip_preserves_fields() {
		let token = token_expiring_at(macros::datetime!(2025-06-01 12:00 UTC));
		let payload = serde_json::to_vec(&token).expect("Token should serialize.");
		let back: Token = serde_json::from_slice(&payload).expect("Token should deserialize.");

		assert_eq!(back, token);
	}
}
