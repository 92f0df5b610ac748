// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::{Duration, OffsetDateTime};
// self
use factorial_client::{
	auth::{OwnerId, Token},
	error::{Error, TokenEndpointError},
	flows::TokenSource,
	provider::{OAuthProvider, ProviderConfig},
	repository::{MemoryRepository, TokenRepository},
};

const TOKEN_BODY: &str =
	r#"{"access_token":"A2","refresh_token":"R2","token_type":"Bearer","expires_in":3600}"#;

struct Harness {
	server: MockServer,
	repository: Arc<MemoryRepository>,
	source: TokenSource,
	owner: OwnerId,
}

async fn harness() -> Harness {
	let server = MockServer::start_async().await;
	let config = ProviderConfig::builder()
		.client_id("client-source")
		.client_secret("secret-source")
		.redirect_url("http://localhost:8080/callback")
		.api_url(server.base_url())
		.build()
		.expect("Provider configuration should build.");
	let provider = OAuthProvider::new(config).expect("Provider should build.");
	let repository = Arc::new(MemoryRepository::default());
	let source = TokenSource::new(repository.clone(), Arc::new(provider));
	let owner = OwnerId::new("session-1").expect("Owner fixture should be valid.");

	Harness { server, repository, source, owner }
}

fn token(access: &str, refresh: &str, expires_at: OffsetDateTime) -> Token {
	Token::builder()
		.access_token(access)
		.refresh_token(refresh)
		.expires_at(expires_at)
		.build()
		.expect("Token fixture should build.")
}

#[tokio::test]
async fn valid_token_is_served_without_network_or_writes() {
	let h = harness().await;
	let mock = h
		.server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let stored = token("A1", "R1", OffsetDateTime::now_utc() + Duration::hours(1));

	h.source.save(&h.owner, stored.clone()).await.expect("Seeding should succeed.");

	for _ in 0..3 {
		let served = h.source.token(&h.owner).await.expect("Valid token should be served.");

		assert_eq!(served, stored);
	}

	mock.assert_calls_async(0).await;

	assert_eq!(h.source.metrics().attempts(), 3);
	assert_eq!(h.source.metrics().refreshes(), 0);
}

#[tokio::test]
async fn expired_token_is_refreshed_once_and_written_back() {
	let h = harness().await;
	let mock = h
		.server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").json_body(json!({
				"client_id": "client-source",
				"client_secret": "secret-source",
				"grant_type": "refresh_token",
				"refresh_token": "R1",
			}));
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;

	h.source
		.save(&h.owner, token("A1", "R1", OffsetDateTime::now_utc() - Duration::seconds(10)))
		.await
		.expect("Seeding should succeed.");

	let served = h.source.token(&h.owner).await.expect("Expired token should be refreshed.");

	mock.assert_calls_async(1).await;

	assert_eq!(served.access_token.expose(), "A2");
	assert_eq!(served.refresh_token.as_ref().map(|secret| secret.expose()), Some("R2"));
	assert!(served.expires_at > OffsetDateTime::now_utc() + Duration::minutes(59));

	let persisted = h
		.repository
		.get(&h.owner)
		.await
		.expect("Repository read should succeed.")
		.expect("Refreshed token should be stored.");

	assert_eq!(persisted, served);
	assert_eq!(h.source.metrics().refreshes(), 1);

	let again = h.source.token(&h.owner).await.expect("Refreshed token should be served.");

	assert_eq!(again, served);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn unknown_owner_fails_without_network() {
	let h = harness().await;
	let mock = h
		.server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let err = h.source.token(&h.owner).await.expect_err("Unknown owner must fail.");

	assert!(matches!(err, Error::NotFound { ref owner } if owner == &h.owner));

	mock.assert_calls_async(0).await;

	assert_eq!(h.source.metrics().failures(), 1);
}

#[tokio::test]
async fn failed_refresh_leaves_repository_untouched() {
	let h = harness().await;
	let _mock = h
		.server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(400)
				.header("content-type", "application/json")
				.body(r#"{"error":"invalid_grant"}"#);
		})
		.await;
	let stale = token("A1", "R1", OffsetDateTime::now_utc() - Duration::seconds(10));

	h.source.save(&h.owner, stale.clone()).await.expect("Seeding should succeed.");

	let err = h.source.token(&h.owner).await.expect_err("Refresh failure must propagate.");

	assert!(matches!(err, Error::Refresh(TokenEndpointError::Status { status: 400, .. })));
	assert_eq!(
		h.repository.get(&h.owner).await.expect("Repository read should succeed."),
		Some(stale)
	);
}

#[tokio::test]
async fn token_written_elsewhere_is_picked_up() {
	let h = harness().await;
	let first = token("A1", "R1", OffsetDateTime::now_utc() + Duration::hours(1));
	let second = token("B1", "S1", OffsetDateTime::now_utc() + Duration::hours(2));

	h.source.save(&h.owner, first.clone()).await.expect("Seeding should succeed.");

	assert_eq!(h.source.token(&h.owner).await.expect("First token should be served."), first);

	h.repository.update(&h.owner, second.clone()).await.expect("External update should succeed.");

	assert_eq!(h.source.token(&h.owner).await.expect("Second token should be served."), second);
}
