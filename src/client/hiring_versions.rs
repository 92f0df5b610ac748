//! Contract history (hiring versions).

// self
use crate::{
	_prelude::*,
	client::{Client, Query},
};

const HIRING_VERSIONS: &str = "/api/v1/hiring_versions";

/// One version of an employee's contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiringVersion {
	/// Hiring version identifier.
	pub id: u64,
	/// Date from which this version applies.
	#[serde(default)]
	pub effective_on: Option<String>,
	/// Employee the contract belongs to.
	#[serde(default)]
	pub employee_id: Option<u64>,
	/// Gross salary in cents.
	#[serde(default)]
	pub base_compensation_amount_in_cents: Option<i64>,
	/// Salary recurrence.
	#[serde(default)]
	pub base_compensation_type: Option<String>,
	/// Employee start date.
	#[serde(default)]
	pub start_date: Option<String>,
	/// Employee end date.
	#[serde(default)]
	pub end_date: Option<String>,
	/// Job title.
	#[serde(default)]
	pub job_title: Option<String>,
	/// Working hours in hundredths of an hour.
	#[serde(default)]
	pub working_hours_in_cents: Option<i64>,
	/// Recurrence of the working hours.
	#[serde(default)]
	pub working_period_unit: Option<String>,
}

impl Client {
	/// Lists hiring versions, optionally filtered by `employee_id`.
	pub async fn list_hiring_versions(&self, filter: &Query) -> Result<Vec<HiringVersion>> {
		self.get(HIRING_VERSIONS, Some(filter)).await
	}
}
