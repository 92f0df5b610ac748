//! Attendance shifts and clocking.

// self
use crate::{
	_prelude::*,
	client::{Client, Query},
};

const SHIFTS: &str = "/api/v1/shifts";

/// Worked shift of an employee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
	/// Shift identifier.
	pub id: u64,
	/// Day of month.
	#[serde(default)]
	pub day: Option<u8>,
	/// Month (1-12).
	#[serde(default)]
	pub month: Option<u8>,
	/// Year.
	#[serde(default)]
	pub year: Option<i32>,
	/// Clock-in time (`HH:MM`).
	#[serde(default)]
	pub clock_in: Option<String>,
	/// Clock-out time (`HH:MM`), absent while the shift is open.
	#[serde(default)]
	pub clock_out: Option<String>,
	/// Employee who worked the shift.
	#[serde(default)]
	pub employee_id: Option<u64>,
	/// Free-form notes.
	#[serde(default)]
	pub observations: Option<String>,
}

/// Payload for [`Client::clock_in`] and [`Client::clock_out`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClockRequest {
	/// Timestamp of the clocking (ISO 8601).
	pub now: String,
	/// Employee clocking in or out.
	pub employee_id: u64,
}

/// Payload for [`Client::update_shift`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UpdateShiftRequest {
	/// Clock-in time (`HH:MM`).
	pub clock_in: String,
	/// Clock-out time (`HH:MM`).
	pub clock_out: String,
	/// Free-form notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub observations: Option<String>,
}

impl Client {
	/// Lists shifts, optionally filtered by `employee_id`, `year` and `month`.
	pub async fn list_shifts(&self, filter: &Query) -> Result<Vec<Shift>> {
		self.get(SHIFTS, Some(filter)).await
	}

	/// Edits a shift's times or notes.
	pub async fn update_shift(&self, id: u64, request: &UpdateShiftRequest) -> Result<Shift> {
		self.put(&format!("{SHIFTS}/{id}"), request).await
	}

	/// Deletes a shift.
	pub async fn delete_shift(&self, id: u64) -> Result<()> {
		self.delete(&format!("{SHIFTS}/{id}")).await
	}

	/// Opens a shift for an employee.
	pub async fn clock_in(&self, request: &ClockRequest) -> Result<Shift> {
		self.post(&format!("{SHIFTS}/clock_in"), request).await
	}

	/// Closes the employee's open shift.
	pub async fn clock_out(&self, request: &ClockRequest) -> Result<Shift> {
		self.post(&format!("{SHIFTS}/clock_out"), request).await
	}
}
