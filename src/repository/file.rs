//! Simple file-backed [`TokenRepository`] for single-host deployments and scripts.

// std
use std::{
	fs::{self, File},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
};
// crates.io
use parking_lot::Mutex;
// self
use crate::{
	_prelude::*,
	auth::{OwnerId, Token},
	repository::{RepositoryError, RepositoryFuture, TokenRepository},
};

type TokenMap = HashMap<OwnerId, Token>;

/// Keeps tokens in a JSON file that is the only copy of the data.
///
/// Every call re-reads the file, so handles opened elsewhere (including other processes) see
/// each other's writes. Mutations load the current snapshot, change it, and replace the file
/// through a synced sibling `.tmp` file; a failed write leaves the previous snapshot in place.
/// Writers in one process are serialized; writers in separate processes are last-writer-wins.
#[derive(Clone, Debug)]
pub struct FileRepository {
	path: PathBuf,
	write_lock: Arc<Mutex<()>>,
}
impl FileRepository {
	/// Opens (or creates) a repository at the provided path, validating any existing snapshot.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;
		Self::load_snapshot(&path)?;

		Ok(Self { path, write_lock: Default::default() })
	}

	/// Location of the JSON snapshot.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<TokenMap, RepositoryError> {
		let bytes = match fs::read(path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TokenMap::new()),
			Err(e) =>
				return Err(RepositoryError::Backend {
					message: format!("Failed to read {}: {e}", path.display()),
				}),
		};

		if bytes.is_empty() {
			return Ok(TokenMap::new());
		}

		serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), RepositoryError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| RepositoryError::Backend {
				message: format!("Failed to create repository directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn mutate<F>(&self, change: F) -> Result<(), RepositoryError>
	where
		F: FnOnce(&mut TokenMap) -> Result<(), RepositoryError>,
	{
		let _guard = self.write_lock.lock();
		let mut snapshot = Self::load_snapshot(&self.path)?;

		change(&mut snapshot)?;

		self.persist(&snapshot)
	}

	fn persist(&self, contents: &TokenMap) -> Result<(), RepositoryError> {
		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| RepositoryError::Serialization {
				message: format!("Failed to serialize repository snapshot: {e}"),
			})?;
		let tmp_path = self.tmp_path();

		{
			let mut file = File::create(&tmp_path).map_err(|e| RepositoryError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| RepositoryError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| RepositoryError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| RepositoryError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}

	fn tmp_path(&self) -> PathBuf {
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		tmp_path
	}
}
impl TokenRepository for FileRepository {
	fn save<'a>(&'a self, owner: &'a OwnerId, token: Token) -> RepositoryFuture<'a, ()> {
		Box::pin(async move {
			self.mutate(|snapshot| {
				snapshot.insert(owner.to_owned(), token);

				Ok(())
			})
		})
	}

	fn update<'a>(&'a self, owner: &'a OwnerId, token: Token) -> RepositoryFuture<'a, ()> {
		Box::pin(async move {
			self.mutate(|snapshot| match snapshot.get_mut(owner) {
				Some(current) => {
					*current = token;

					Ok(())
				},
				None => Err(RepositoryError::Missing { owner: owner.to_owned() }),
			})
		})
	}

	fn get<'a>(&'a self, owner: &'a OwnerId) -> RepositoryFuture<'a, Option<Token>> {
		Box::pin(async move { Ok(Self::load_snapshot(&self.path)?.remove(owner)) })
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	fn temp_path() -> PathBuf {
		let unique = format!(
			"factorial_client_file_repository_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	fn build_token(access: &str) -> Token {
		Token::builder()
			.access_token(access)
			.refresh_token("refresh-token")
			.expires_in(Duration::hours(1))
			.build()
			.expect("Failed to build file-repository test token.")
	}

	#[test]
	fn save_update_and_reload_round_trip() {
		let path = temp_path();
		let repository = FileRepository::open(&path).expect("Failed to open file repository.");
		let owner = OwnerId::new("owner-file").expect("Failed to build owner fixture.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file repository test.");

		rt.block_on(repository.save(&owner, build_token("access-1")))
			.expect("Failed to save fixture token to file repository.");
		rt.block_on(repository.update(&owner, build_token("access-2")))
			.expect("Failed to update fixture token in file repository.");
		drop(repository);

		let reopened = FileRepository::open(&path).expect("Failed to reopen file repository.");
		let fetched = rt
			.block_on(reopened.get(&owner))
			.expect("Failed to fetch fixture token from file repository.")
			.expect("File repository lost token after reopen.");

		assert_eq!(fetched.access_token.expose(), "access-2");

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary repository snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn update_without_saved_token_is_rejected() {
		let path = temp_path();
		let repository = FileRepository::open(&path).expect("Failed to open file repository.");
		let owner = OwnerId::new("owner-missing").expect("Failed to build owner fixture.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file repository test.");
		let err = rt
			.block_on(repository.update(&owner, build_token("access")))
			.expect_err("Updating an unknown owner should fail.");

		assert_eq!(err, RepositoryError::Missing { owner });
		assert!(!path.exists(), "A rejected update must not create the snapshot.");
	}

	#[test]
	fn handles_on_one_path_share_writes() {
		let path = temp_path();
		let first = FileRepository::open(&path).expect("Failed to open first handle.");
		let second = FileRepository::open(&path).expect("Failed to open second handle.");
		let owner_1 = OwnerId::new("owner-1").expect("Failed to build owner fixture.");
		let owner_2 = OwnerId::new("owner-2").expect("Failed to build owner fixture.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file repository test.");

		rt.block_on(first.save(&owner_1, build_token("A1")))
			.expect("Failed to save through the first handle.");
		rt.block_on(second.save(&owner_2, build_token("B1")))
			.expect("Failed to save through the second handle.");
		rt.block_on(first.update(&owner_1, build_token("A2")))
			.expect("Failed to update through the first handle.");

		let seen_by_second = rt
			.block_on(second.get(&owner_1))
			.expect("Failed to read through the second handle.")
			.expect("Second handle must see the first handle's token.");

		assert_eq!(seen_by_second.access_token.expose(), "A2");

		let reopened = FileRepository::open(&path).expect("Failed to reopen file repository.");

		for (owner, access) in [(&owner_1, "A2"), (&owner_2, "B1")] {
			let token = rt
				.block_on(reopened.get(owner))
				.expect("Failed to read reopened repository.")
				.expect("Reopened repository lost a token.");

			assert_eq!(token.access_token.expose(), access);
		}

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary repository snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn failed_write_keeps_previous_snapshot() {
		let path = temp_path();
		let repository = FileRepository::open(&path).expect("Failed to open file repository.");
		let owner = OwnerId::new("owner-write-fail").expect("Failed to build owner fixture.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file repository test.");
		let tmp_path = repository.tmp_path();

		rt.block_on(repository.save(&owner, build_token("A1")))
			.expect("Failed to save fixture token to file repository.");
		// A directory in place of the temp file makes `File::create` fail.
		fs::create_dir(&tmp_path).expect("Failed to block the temporary snapshot path.");

		let err = rt
			.block_on(repository.update(&owner, build_token("A2")))
			.expect_err("Update must fail when the snapshot cannot be written.");

		assert!(matches!(err, RepositoryError::Backend { .. }));

		let fetched = rt
			.block_on(repository.get(&owner))
			.expect("Failed to read file repository.")
			.expect("Previous token must survive a failed write.");

		assert_eq!(fetched.access_token.expose(), "A1");

		let unsaved = OwnerId::new("owner-unsaved").expect("Failed to build owner fixture.");

		assert!(rt.block_on(repository.save(&unsaved, build_token("U1"))).is_err());
		assert_eq!(
			rt.block_on(repository.get(&unsaved)).expect("Failed to read file repository."),
			None
		);

		fs::remove_dir(&tmp_path).expect("Failed to remove the blocking directory.");
		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary repository snapshot {}: {e}", path.display())
		});
	}
}
