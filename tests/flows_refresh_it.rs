// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::{Duration, OffsetDateTime};
// self
use factorial_client::{
	auth::Token,
	error::{Error, TokenEndpointError},
	flows::TokenRefresher,
	provider::{OAuthProvider, ProviderConfig},
};

const CLIENT_ID: &str = "client-refresh";
const CLIENT_SECRET: &str = "secret-refresh";

fn build_provider(server: &MockServer) -> OAuthProvider {
	let config = ProviderConfig::builder()
		.client_id(CLIENT_ID)
		.client_secret(CLIENT_SECRET)
		.redirect_url("http://localhost:8080/callback")
		.api_url(server.base_url())
		.build()
		.expect("Provider configuration should build.");

	OAuthProvider::new(config).expect("Provider should build.")
}

fn expired_token() -> Token {
	Token::builder()
		.access_token("access-old")
		.refresh_token("refresh-old")
		.expires_at(OffsetDateTime::now_utc() - Duration::seconds(10))
		.build()
		.expect("Expired token fixture should build.")
}

#[tokio::test]
async fn refresh_posts_refresh_grant_and_rotates_tokens() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").json_body(json!({
				"client_id": CLIENT_ID,
				"client_secret": CLIENT_SECRET,
				"grant_type": "refresh_token",
				"refresh_token": "refresh-old",
			}));
			then.status(200).header("content-type", "application/json").body(
				r#"{"access_token":"access-new","refresh_token":"refresh-new","token_type":"Bearer","expires_in":3600}"#,
			);
		})
		.await;
	let token = provider.refresh(&expired_token()).await.expect("Refresh should succeed.");

	mock.assert_async().await;

	assert_eq!(token.access_token.expose(), "access-new");
	assert_eq!(token.refresh_token.as_ref().map(|secret| secret.expose()), Some("refresh-new"));
	assert!(token.is_valid());
}

#[tokio::test]
async fn refresh_keeps_previous_refresh_token_when_not_rotated() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"access-new","token_type":"Bearer","expires_in":3600}"#);
		})
		.await;
	let refresher: &dyn TokenRefresher = &provider;
	let token = refresher.refresh(&expired_token()).await.expect("Refresh should succeed.");

	assert_eq!(token.access_token.expose(), "access-new");
	assert_eq!(token.refresh_token.as_ref().map(|secret| secret.expose()), Some("refresh-old"));
}

#[tokio::test]
async fn refresh_failure_carries_status_and_oauth_error() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(400)
				.header("content-type", "application/json")
				.body(r#"{"error":"invalid_grant"}"#);
		})
		.await;
	let err = provider.refresh(&expired_token()).await.expect_err("Refresh must fail on 400.");

	mock.assert_calls_async(1).await;

	assert!(matches!(
		err,
		Error::Refresh(TokenEndpointError::Status { status: 400, ref oauth_error, .. })
			if oauth_error.as_deref() == Some("invalid_grant")
	));
	assert_eq!(err.to_string(), "Token refresh failed.");
}

#[tokio::test]
async fn refresh_rejects_missing_expiry() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"access-new"}"#);
		})
		.await;
	let err = provider.refresh(&expired_token()).await.expect_err("Missing expiry must fail.");

	assert!(matches!(err, Error::Refresh(TokenEndpointError::MissingExpiresIn)));
}
