//! Refresh token exchange and the [`TokenRefresher`] seam used by the token source.

// self
use crate::{
	_prelude::*,
	auth::Token,
	error::TokenEndpointError,
	oauth::{self, TokenRequest},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::OAuthProvider,
};

/// Boxed future returned by [`TokenRefresher::refresh`].
pub type RefreshFuture<'a> = Pin<Box<dyn Future<Output = Result<Token>> + 'a + Send>>;

/// Anything able to trade an expired token for a fresh one.
///
/// [`OAuthProvider`] is the production implementation; tests substitute their own.
pub trait TokenRefresher
where
	Self: Send + Sync,
{
	/// Returns a new token derived from `token`'s refresh token.
	fn refresh<'a>(&'a self, token: &'a Token) -> RefreshFuture<'a>;
}

impl OAuthProvider {
	/// Exchanges the refresh token carried by `token` for a new token.
	///
	/// Fails with [`Error::Refresh`] without touching the network when `token` has no refresh
	/// token. When the response does not rotate the refresh token the old one is kept.
	pub async fn refresh(&self, token: &Token) -> Result<Token> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let refresh_token = token
					.refresh_token
					.as_ref()
					.ok_or(Error::Refresh(TokenEndpointError::MissingRefreshToken))?;
				let config = self.config();
				let request = TokenRequest::refresh_token(config, refresh_token);

				oauth::request_token(
					self.http_client(),
					&config.endpoints.token,
					&request,
					Some(refresh_token),
				)
				.await
				.map_err(Error::Refresh)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
impl TokenRefresher for OAuthProvider {
	fn refresh<'a>(&'a self, token: &'a Token) -> RefreshFuture<'a> {
		Box::pin(OAuthProvider::refresh(self, token))
	}
}
