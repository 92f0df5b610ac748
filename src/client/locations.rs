//! Work locations.

// self
use crate::{
	_prelude::*,
	client::{Client, null_as_default},
};

const LOCATIONS: &str = "/api/v1/locations";

/// Office or other work location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
	/// Location identifier.
	pub id: u64,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Country code, e.g. `es`.
	#[serde(default)]
	pub country: Option<String>,
	/// Phone number.
	#[serde(default)]
	pub phone_number: Option<String>,
	/// State or province code, e.g. `ct`.
	#[serde(default)]
	pub state: Option<String>,
	/// City name.
	#[serde(default)]
	pub city: Option<String>,
	/// First address line.
	#[serde(default)]
	pub address_line_1: Option<String>,
	/// Second address line.
	#[serde(default)]
	pub address_line_2: Option<String>,
	/// Postal code.
	#[serde(default)]
	pub postal_code: Option<String>,
	/// Holidays observed at this location.
	#[serde(default, deserialize_with = "null_as_default")]
	pub company_holidays_ids: Vec<u64>,
}

impl Client {
	/// Lists work locations.
	pub async fn list_locations(&self) -> Result<Vec<Location>> {
		self.get(LOCATIONS, None).await
	}

	/// Fetches one work location.
	pub async fn get_location(&self, id: u64) -> Result<Location> {
		self.get(&format!("{LOCATIONS}/{id}"), None).await
	}
}
