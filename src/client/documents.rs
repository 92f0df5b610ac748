//! Employee and company documents.

// self
use crate::{
	_prelude::*,
	client::{Client, Query, null_as_default},
};

const DOCUMENTS: &str = "/api/v1/documents";

/// Document stored in Factorial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
	/// Document identifier.
	pub id: u64,
	/// Owning employee, if any.
	#[serde(default)]
	pub employee_id: Option<u64>,
	/// Owning company.
	#[serde(default)]
	pub company_id: Option<u64>,
	/// Containing folder.
	#[serde(default)]
	pub folder_id: Option<u64>,
	/// Download URL of the file.
	#[serde(default)]
	pub file: Option<String>,
	/// Original file name.
	#[serde(default)]
	pub filename: Option<String>,
	/// Whether the employee can see the document.
	#[serde(default, deserialize_with = "null_as_default")]
	pub public: bool,
	/// Creation timestamp.
	#[serde(default)]
	pub created_at: Option<String>,
	/// Last update timestamp.
	#[serde(default)]
	pub updated_at: Option<String>,
}

/// Payload for [`Client::create_document`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CreateDocumentRequest {
	/// Whether the employee can see the document.
	pub public: bool,
	/// Owning employee.
	pub employee_id: u64,
	/// File contents, encoded as the API expects.
	pub file: String,
	/// File name.
	pub filename: String,
	/// Containing folder.
	pub folder_id: u64,
	/// Whether to request an e-signature.
	pub request_esignature: bool,
	/// Employees asked to sign.
	pub signees: Vec<u64>,
}

/// Payload for [`Client::update_document`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UpdateDocumentRequest {
	/// Whether the employee can see the document.
	pub public: bool,
	/// Owning employee.
	pub employee_id: u64,
	/// Containing folder.
	pub folder_id: u64,
	/// Whether to request an e-signature.
	pub request_esignature: bool,
	/// Employees asked to sign.
	pub signees: Vec<u64>,
}

impl Client {
	/// Lists documents, optionally filtered by `employee_id` and `folder_id`.
	pub async fn list_documents(&self, filter: &Query) -> Result<Vec<Document>> {
		self.get(DOCUMENTS, Some(filter)).await
	}

	/// Fetches one document.
	pub async fn get_document(&self, id: u64) -> Result<Document> {
		self.get(&format!("{DOCUMENTS}/{id}"), None).await
	}

	/// Uploads a document.
	pub async fn create_document(&self, request: &CreateDocumentRequest) -> Result<Document> {
		self.post(DOCUMENTS, request).await
	}

	/// Updates a document's metadata.
	pub async fn update_document(
		&self,
		id: u64,
		request: &UpdateDocumentRequest,
	) -> Result<Document> {
		self.put(&format!("{DOCUMENTS}/{id}"), request).await
	}

	/// Deletes a document.
	pub async fn delete_document(&self, id: u64) -> Result<()> {
		self.delete(&format!("{DOCUMENTS}/{id}")).await
	}
}
