//! Company holidays.

// self
use crate::{_prelude::*, client::Client};

const COMPANY_HOLIDAYS: &str = "/api/v1/company_holidays";

/// Holiday observed by the company or one of its locations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyHoliday {
	/// Holiday identifier.
	pub id: u64,
	/// Short title.
	#[serde(default)]
	pub summary: Option<String>,
	/// Longer description.
	#[serde(default)]
	pub description: Option<String>,
	/// Date (`YYYY-MM-DD`).
	#[serde(default)]
	pub date: Option<String>,
	/// Half-day marker.
	#[serde(default)]
	pub half_day: Option<String>,
	/// Location observing the holiday.
	#[serde(default)]
	pub location_id: Option<u64>,
}

impl Client {
	/// Lists company holidays.
	pub async fn list_company_holidays(&self) -> Result<Vec<CompanyHoliday>> {
		self.get(COMPANY_HOLIDAYS, None).await
	}

	/// Fetches one company holiday.
	pub async fn get_company_holiday(&self, id: u64) -> Result<CompanyHoliday> {
		self.get(&format!("{COMPANY_HOLIDAYS}/{id}"), None).await
	}
}
