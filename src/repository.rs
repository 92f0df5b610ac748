//! Token persistence contract and built-in repository implementations.
//!
//! The crate never assumes a storage technology: [`TokenSource`](crate::flows::TokenSource)
//! only talks to a [`TokenRepository`] trait object. The repository is the single source of
//! truth for which token is current for an [`OwnerId`].

pub mod file;
pub mod memory;

pub use file::FileRepository;
pub use memory::MemoryRepository;

// self
use crate::{_prelude::*, auth::{OwnerId, Token}};

/// Boxed future returned by [`TokenRepository`] operations.
pub type RepositoryFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + 'a + Send>>;

/// Keyed token store implemented by callers (or the built-in backends).
pub trait TokenRepository
where
	Self: Send + Sync,
{
	/// Stores the first token obtained for `owner`, replacing any previous value.
	fn save<'a>(&'a self, owner: &'a OwnerId, token: Token) -> RepositoryFuture<'a, ()>;

	/// Replaces the current token for `owner` after a refresh.
	fn update<'a>(&'a self, owner: &'a OwnerId, token: Token) -> RepositoryFuture<'a, ()>;

	/// Fetches the current token for `owner`, if one is stored.
	fn get<'a>(&'a self, owner: &'a OwnerId) -> RepositoryFuture<'a, Option<Token>>;
}

/// Error type produced by [`TokenRepository`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum RepositoryError {
	/// An update targeted an owner with no stored token.
	#[error("No token is stored for owner `{owner}`.")]
	Missing {
		/// Owner the update targeted.
		owner: OwnerId,
	},
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn repository_error_converts_into_error_with_source() {
		let repository_error = RepositoryError::Backend { message: "database unreachable".into() };
		let error: Error = repository_error.clone().into();

		assert!(matches!(error, Error::Repository(_)));
		assert!(error.to_string().contains("database unreachable"));

		let source = StdError::source(&error)
			.expect("Crate error should expose the original repository error as its source.");

		assert_eq!(source.to_string(), repository_error.to_string());
	}

	#[test]
	fn missing_error_names_owner() {
		let owner = OwnerId::new("session-9").expect("Owner fixture should be valid.");

		assert_eq!(
			RepositoryError::Missing { owner }.to_string(),
			"No token is stored for owner `session-9`."
		);
	}
}
