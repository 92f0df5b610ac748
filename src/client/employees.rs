//! Employees and their hiring details.

// self
use crate::{_prelude::*, client::{Client, null_as_default}};

const EMPLOYEES: &str = "/api/v1/employees";

/// Employee record as returned by the API.
///
/// Regular (non-admin) users receive a restricted payload, so most fields are optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
	/// Employee identifier.
	pub id: u64,
	/// Birthday (`YYYY-MM-DD`).
	#[serde(default)]
	pub birthday_on: Option<String>,
	/// Start date (`YYYY-MM-DD`).
	#[serde(default)]
	pub start_date: Option<String>,
	/// Work email.
	#[serde(default)]
	pub email: Option<String>,
	/// Display name.
	#[serde(default)]
	pub full_name: Option<String>,
	/// Given name.
	#[serde(default)]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(default)]
	pub last_name: Option<String>,
	/// Direct manager.
	#[serde(default)]
	pub manager_id: Option<u64>,
	/// Role within the company (`basic`, `admin`, ...).
	#[serde(default)]
	pub role: Option<String>,
	/// Employee approving this employee's time off.
	#[serde(default)]
	pub timeoff_manager_id: Option<u64>,
	/// Termination date, if terminated.
	#[serde(default)]
	pub terminated_on: Option<String>,
	/// Phone number.
	#[serde(default)]
	pub phone_number: Option<String>,
	/// Gender.
	#[serde(default)]
	pub gender: Option<String>,
	/// Nationality.
	#[serde(default)]
	pub nationality: Option<String>,
	/// Bank account number.
	#[serde(default)]
	pub bank_number: Option<String>,
	/// Country of residence.
	#[serde(default)]
	pub country: Option<String>,
	/// City of residence.
	#[serde(default)]
	pub city: Option<String>,
	/// State or province.
	#[serde(default)]
	pub state: Option<String>,
	/// Postal code.
	#[serde(default)]
	pub postal_code: Option<String>,
	/// First address line.
	#[serde(default)]
	pub address_line_1: Option<String>,
	/// Second address line.
	#[serde(default)]
	pub address_line_2: Option<String>,
	/// Social security number.
	#[serde(default)]
	pub social_security_number: Option<String>,
	/// Company holidays applying to this employee.
	#[serde(default, deserialize_with = "null_as_default")]
	pub company_holiday_ids: Vec<u64>,
	/// National identification number.
	#[serde(default)]
	pub identifier: Option<String>,
	/// Kind of national identification: `dni`, `nie` or `passport`.
	#[serde(default)]
	pub identifier_type: Option<String>,
	/// Current hiring details.
	#[serde(default)]
	pub hiring: Option<Hiring>,
	/// Work location.
	#[serde(default)]
	pub location_id: Option<u64>,
	/// Teams the employee belongs to.
	#[serde(default, deserialize_with = "null_as_default")]
	pub team_ids: Vec<u64>,
}

/// Compensation part of an employee's hiring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hiring {
	/// Gross base compensation in cents.
	#[serde(default)]
	pub base_compensation_amount_in_cents: Option<i64>,
	/// Compensation recurrence: `hourly`, `monthly` or `yearly`.
	#[serde(default)]
	pub base_compensation_type: Option<String>,
}

/// Payload for [`Client::create_employee`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CreateEmployeeRequest {
	/// Work email.
	pub email: String,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Birthday (`YYYY-MM-DD`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub birthday_on: Option<String>,
	/// Start date (`YYYY-MM-DD`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub start_date: Option<String>,
	/// Direct manager.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub manager_id: Option<u64>,
	/// Role within the company.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	/// Time off approver.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeoff_manager_id: Option<u64>,
	/// Termination date.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub terminated_on: Option<String>,
	/// Termination reason.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub terminated_reason: Option<String>,
}

/// Payload for [`Client::update_employee`]; unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UpdateEmployeeRequest {
	/// Birthday (`YYYY-MM-DD`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub birthday_on: Option<String>,
	/// Given name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// Direct manager.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub manager_id: Option<u64>,
	/// Role within the company.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	/// Time off approver.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeoff_manager_id: Option<u64>,
}

#[derive(Serialize)]
struct Termination<'a> {
	terminated_on: &'a str,
	terminated_reason: &'a str,
}

impl Client {
	/// Lists every employee of the company.
	pub async fn list_employees(&self) -> Result<Vec<Employee>> {
		self.get(EMPLOYEES, None).await
	}

	/// Fetches one employee.
	pub async fn get_employee(&self, id: u64) -> Result<Employee> {
		self.get(&format!("{EMPLOYEES}/{id}"), None).await
	}

	/// Creates an employee. Admin only.
	pub async fn create_employee(&self, request: &CreateEmployeeRequest) -> Result<Employee> {
		self.post(EMPLOYEES, request).await
	}

	/// Updates an employee.
	pub async fn update_employee(
		&self,
		id: u64,
		request: &UpdateEmployeeRequest,
	) -> Result<Employee> {
		self.put(&format!("{EMPLOYEES}/{id}"), request).await
	}

	/// Flags an employee as terminated on `terminated_on` (`YYYY-MM-DD`). Admin only.
	pub async fn terminate_employee(
		&self,
		id: u64,
		terminated_on: &str,
		reason: &str,
	) -> Result<Employee> {
		let body = Termination { terminated_on, terminated_reason: reason };

		self.post(&format!("{EMPLOYEES}/{id}/terminate"), &body).await
	}

	/// Clears an employee's termination. Admin only.
	pub async fn unterminate_employee(&self, id: u64) -> Result<Employee> {
		self.post_empty(&format!("{EMPLOYEES}/{id}/unterminate")).await
	}
}
