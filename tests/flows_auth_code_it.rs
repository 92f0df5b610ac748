// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use factorial_client::{
	error::{Error, TokenEndpointError},
	provider::{OAuthProvider, ProviderConfig},
	url::Url,
};

const CLIENT_ID: &str = "client-auth-code";
const CLIENT_SECRET: &str = "secret-auth-code";
const REDIRECT_URL: &str = "http://localhost:8080/auth/factorial/callback";

fn build_provider(api_url: &str) -> OAuthProvider {
	let config = ProviderConfig::builder()
		.client_id(CLIENT_ID)
		.client_secret(CLIENT_SECRET)
		.redirect_url(REDIRECT_URL)
		.scopes(["read", "write"])
		.api_url(api_url)
		.build()
		.expect("Provider configuration should build.");

	OAuthProvider::new(config).expect("Provider should build.")
}

#[test]
fn auth_url_is_pure_and_carries_parameters() {
	let provider = build_provider("https://api.factorialhr.com");
	let url = provider.auth_url("state with spaces & symbols");
	let again = provider.auth_url("state with spaces & symbols");

	assert_eq!(url, again);
	assert_eq!(
		url.origin(),
		Url::parse("https://api.factorialhr.com").expect("Origin should parse.").origin()
	);
	assert_eq!(url.path(), "/oauth/authorize");

	let pairs = url.query_pairs().into_owned().collect::<Vec<_>>();
	let value = |key: &str| {
		pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str()).unwrap_or_default()
	};

	assert_eq!(value("response_type"), "code");
	assert_eq!(value("client_id"), CLIENT_ID);
	assert_eq!(value("redirect_uri"), REDIRECT_URL);
	assert_eq!(value("scope"), "read write");
	assert_eq!(value("state"), "state with spaces & symbols");
}

#[tokio::test]
async fn exchange_code_posts_json_and_builds_token() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/token")
				.header("content-type", "application/json")
				.header("accept", "application/json")
				.json_body(json!({
					"client_id": CLIENT_ID,
					"client_secret": CLIENT_SECRET,
					"code": "code-123",
					"grant_type": "authorization_code",
					"redirect_uri": REDIRECT_URL,
				}));
			then.status(200).header("content-type", "application/json").body(
				r#"{"access_token":"access-1","refresh_token":"refresh-1","token_type":"Bearer","expires_in":7200}"#,
			);
		})
		.await;
	let before = time::OffsetDateTime::now_utc();
	let token = provider.exchange_code("code-123").await.expect("Code exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(token.access_token.expose(), "access-1");
	assert_eq!(token.refresh_token.as_ref().map(|secret| secret.expose()), Some("refresh-1"));
	assert_eq!(token.token_type, "Bearer");
	assert!(token.expires_at >= before + time::Duration::seconds(7200));
	assert!(token.is_valid());
}

#[tokio::test]
async fn exchange_code_surfaces_oauth_error() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(401).header("content-type", "application/json").body(
				r#"{"error":"invalid_client","error_description":"Client authentication failed."}"#,
			);
		})
		.await;
	let err = provider.exchange_code("code-123").await.expect_err("Rejected exchange must fail.");

	mock.assert_calls_async(1).await;

	match err {
		Error::AuthExchange(TokenEndpointError::Status { status, oauth_error, description }) => {
			assert_eq!(status, 401);
			assert_eq!(oauth_error.as_deref(), Some("invalid_client"));
			assert_eq!(description.as_deref(), Some("Client authentication failed."));
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}

#[tokio::test]
async fn exchange_code_rejects_malformed_body() {
	let server = MockServer::start_async().await;
	let provider = build_provider(&server.base_url());
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":42,"expires_in":60}"#);
		})
		.await;
	let err = provider.exchange_code("code-123").await.expect_err("Malformed body must fail.");

	match err {
		Error::AuthExchange(TokenEndpointError::Decode(decode)) => {
			assert_eq!(decode.source.path().to_string(), "access_token");
			assert_eq!(decode.status, 200);
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}
