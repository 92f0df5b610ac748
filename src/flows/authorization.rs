//! Authorization-code grant: authorize URL rendering and code exchange.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	auth::Token,
	oauth::{self, TokenRequest},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::OAuthProvider,
};

const STATE_LEN: usize = 32;

impl OAuthProvider {
	/// Builds the URL users are redirected to in order to grant access.
	///
	/// The URL carries `response_type=code`, the client id, the redirect URL, the configured
	/// scopes and `state` verbatim. No I/O is performed.
	pub fn auth_url(&self, state: &str) -> Url {
		let _guard = FlowSpan::new(FlowKind::AuthorizationCode, "auth_url").entered();

		oauth::authorize_url(self.config(), state)
	}

	/// Exchanges an authorization `code` received on the redirect URL for a token.
	pub async fn exchange_code(&self, code: &str) -> Result<Token> {
		const KIND: FlowKind = FlowKind::AuthorizationCode;

		let span = FlowSpan::new(KIND, "exchange_code");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let config = self.config();
				let request = TokenRequest::authorization_code(config, code);

				oauth::request_token(self.http_client(), &config.endpoints.token, &request, None)
					.await
					.map_err(Error::AuthExchange)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}

/// Generates an unguessable alphanumeric `state` value for [`OAuthProvider::auth_url`].
pub fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn random_state_is_alphanumeric_and_unique() {
		let first = random_state();
		let second = random_state();

		assert_eq!(first.len(), STATE_LEN);
		assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(first, second);
	}
}
