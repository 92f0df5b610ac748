//! Thread-safe in-memory [`TokenRepository`] for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{OwnerId, Token},
	repository::{RepositoryError, RepositoryFuture, TokenRepository},
};

type TokenMap = Arc<RwLock<HashMap<OwnerId, Token>>>;

/// Repository that keeps tokens in-process; contents vanish with the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository(TokenMap);
impl MemoryRepository {
	/// Number of owners with a stored token.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when no tokens are stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn save_now(map: TokenMap, owner: OwnerId, token: Token) {
		map.write().insert(owner, token);
	}

	fn update_now(map: TokenMap, owner: OwnerId, token: Token) -> Result<(), RepositoryError> {
		let mut guard = map.write();

		match guard.get_mut(&owner) {
			Some(current) => {
				*current = token;

				Ok(())
			},
			None => Err(RepositoryError::Missing { owner }),
		}
	}

	fn get_now(map: TokenMap, owner: &OwnerId) -> Option<Token> {
		map.read().get(owner).cloned()
	}
}
impl TokenRepository for MemoryRepository {
	fn save<'a>(&'a self, owner: &'a OwnerId, token: Token) -> RepositoryFuture<'a, ()> {
		let map = self.0.clone();
		let owner = owner.to_owned();

		Box::pin(async move {
			Self::save_now(map, owner, token);

			Ok(())
		})
	}

	fn update<'a>(&'a self, owner: &'a OwnerId, token: Token) -> RepositoryFuture<'a, ()> {
		let map = self.0.clone();
		let owner = owner.to_owned();

		Box::pin(async move { Self::update_now(map, owner, token) })
	}

	fn get<'a>(&'a self, owner: &'a OwnerId) -> RepositoryFuture<'a, Option<Token>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::get_now(map, owner)) })
	}
}
