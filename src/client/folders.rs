//! Document folders.

// self
use crate::{
	_prelude::*,
	client::{Client, Query, null_as_default},
};

const FOLDERS: &str = "/api/v1/folders";

/// Folder grouping documents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
	/// Folder identifier.
	pub id: u64,
	/// Owning company.
	#[serde(default)]
	pub company_id: Option<u64>,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Folder kind (`company` or `employee`).
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	/// Whether the folder is active.
	#[serde(default, deserialize_with = "null_as_default")]
	pub active: bool,
	/// Creation timestamp.
	#[serde(default)]
	pub created_at: Option<String>,
	/// Last update timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
}

/// Payload for [`Client::create_folder`] and [`Client::update_folder`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FolderRequest {
	/// Display name.
	pub name: String,
	/// Whether the folder is active.
	pub active: bool,
}

impl Client {
	/// Lists folders, optionally filtered by `name` and `active`.
	pub async fn list_folders(&self, filter: &Query) -> Result<Vec<Folder>> {
		self.get(FOLDERS, Some(filter)).await
	}

	/// Fetches one folder.
	pub async fn get_folder(&self, id: u64) -> Result<Folder> {
		self.get(&format!("{FOLDERS}/{id}"), None).await
	}

	/// Creates a folder.
	pub async fn create_folder(&self, request: &FolderRequest) -> Result<Folder> {
		self.post(FOLDERS, request).await
	}

	/// Renames or (de)activates a folder.
	pub async fn update_folder(&self, id: u64, request: &FolderRequest) -> Result<Folder> {
		self.put(&format!("{FOLDERS}/{id}"), request).await
	}
}
