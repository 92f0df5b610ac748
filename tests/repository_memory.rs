// std
use std::sync::Arc;
// crates.io
use time::{Duration, macros};
// self
use factorial_client::{
	auth::{OwnerId, Token},
	repository::{MemoryRepository, RepositoryError, TokenRepository},
};

fn owner(value: &str) -> OwnerId {
	OwnerId::new(value).expect("Failed to build owner identifier for memory repository tests.")
}

fn build_token(access: &str) -> Token {
	let issued = macros::datetime!(2025-11-10 12:00 UTC);

	Token::builder()
		.access_token(access)
		.refresh_token(format!("{access}-refresh"))
		.issued_at(issued)
		.expires_in(Duration::hours(1))
		.build()
		.expect("Token fixture should build successfully.")
}

#[tokio::test]
async fn save_and_get_round_trip() {
	let repository = MemoryRepository::default();
	let token = build_token("access-1");

	repository
		.save(&owner("owner-a"), token.clone())
		.await
		.expect("Saving token fixture into memory repository should succeed.");

	let fetched = repository
		.get(&owner("owner-a"))
		.await
		.expect("Fetching from memory repository should succeed.")
		.expect("Stored token should remain present.");

	assert_eq!(fetched, token);
	assert_eq!(repository.len(), 1);
	assert!(
		repository
			.get(&owner("owner-b"))
			.await
			.expect("Fetching an unknown owner should succeed.")
			.is_none()
	);
}

#[tokio::test]
async fn save_replaces_and_update_requires_existing_owner() {
	let repository = MemoryRepository::default();
	let a = owner("owner-a");

	let err = repository
		.update(&a, build_token("early"))
		.await
		.expect_err("Updating before saving must fail.");

	assert_eq!(err, RepositoryError::Missing { owner: a.clone() });
	assert!(repository.is_empty());

	repository.save(&a, build_token("first")).await.expect("First save should succeed.");
	repository.save(&a, build_token("second")).await.expect("Second save should succeed.");
	repository.update(&a, build_token("third")).await.expect("Update should succeed.");

	let current = repository
		.get(&a)
		.await
		.expect("Fetching from memory repository should succeed.")
		.expect("Token should be present.");

	assert_eq!(current.access_token.expose(), "third");
	assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn owners_are_isolated_and_clones_share_state() {
	let repository = MemoryRepository::default();
	let shared: Arc<dyn TokenRepository> = Arc::new(repository.clone());

	shared.save(&owner("owner-a"), build_token("a")).await.expect("Save should succeed.");
	shared.save(&owner("owner-b"), build_token("b")).await.expect("Save should succeed.");

	assert_eq!(repository.len(), 2);

	let b = repository
		.get(&owner("owner-b"))
		.await
		.expect("Fetching from memory repository should succeed.")
		.expect("Token should be present.");

	assert_eq!(b.access_token.expose(), "b");
}
