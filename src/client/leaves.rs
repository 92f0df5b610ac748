//! Leave types and leaves (time off).

// self
use crate::{_prelude::*, client::{Client, null_as_default}};

const LEAVE_TYPES: &str = "/api/v1/leave_types";
const LEAVES: &str = "/api/v1/leaves";

/// Category of leave configured for the company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
	/// Leave type identifier.
	pub id: u64,
	/// Whether leaves of this type accrue holidays.
	#[serde(default, deserialize_with = "null_as_default")]
	pub accrues: bool,
	/// Whether leaves of this type can be created.
	#[serde(default, deserialize_with = "null_as_default")]
	pub active: bool,
	/// Whether leaves of this type need a time off manager's approval.
	#[serde(default, deserialize_with = "null_as_default")]
	pub approval_required: bool,
	/// Whether leaves of this type accept attachments.
	#[serde(default, deserialize_with = "null_as_default")]
	pub attachment: bool,
	/// Display color.
	#[serde(default)]
	pub color: Option<String>,
	/// Slug of the type; only `custom` types can be created or modified through the API.
	#[serde(default)]
	pub identifier: Option<String>,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Whether regular employees can see this type.
	#[serde(default, deserialize_with = "null_as_default")]
	pub visibility: bool,
	/// Whether leaves of this type count as working days.
	#[serde(default, deserialize_with = "null_as_default")]
	pub workable: bool,
}

/// Payload for [`Client::create_leave_type`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CreateLeaveTypeRequest {
	/// Display name.
	pub name: String,
	/// Display color.
	pub color: String,
	/// Whether leaves of this type accrue holidays.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub accrues: Option<bool>,
	/// Whether leaves of this type can be created.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub active: Option<bool>,
	/// Whether leaves of this type need approval.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub approval_required: Option<bool>,
	/// Whether leaves of this type accept attachments.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub attachment: Option<bool>,
	/// Whether regular employees can see this type.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub visibility: Option<bool>,
	/// Whether leaves of this type count as working days.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub workable: Option<bool>,
}

/// Payload for [`Client::update_leave_type`]; unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UpdateLeaveTypeRequest {
	/// Display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Display color.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	/// Whether leaves of this type accrue holidays.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub accrues: Option<bool>,
	/// Whether leaves of this type can be created.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub active: Option<bool>,
	/// Whether leaves of this type need approval.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub approval_required: Option<bool>,
	/// Whether leaves of this type accept attachments.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub attachment: Option<bool>,
	/// Whether regular employees can see this type.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub visibility: Option<bool>,
	/// Whether leaves of this type count as working days.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub workable: Option<bool>,
}

/// A period of leave taken by an employee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
	/// Leave identifier.
	pub id: u64,
	/// Free-form description.
	#[serde(default)]
	pub description: Option<String>,
	/// Employee on leave.
	#[serde(default)]
	pub employee_id: Option<u64>,
	/// Last day of the leave (`YYYY-MM-DD`).
	#[serde(default)]
	pub finish_on: Option<String>,
	/// Half-day marker (`beginning_of_day` or `end_of_day`).
	#[serde(default)]
	pub half_day: Option<String>,
	/// Leave type.
	#[serde(default)]
	pub leave_type_id: Option<u64>,
	/// First day of the leave (`YYYY-MM-DD`).
	#[serde(default)]
	pub start_on: Option<String>,
}

/// Payload for [`Client::create_leave`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CreateLeaveRequest {
	/// Employee on leave.
	pub employee_id: u64,
	/// Leave type.
	pub leave_type_id: u64,
	/// First day (`YYYY-MM-DD`).
	pub start_on: String,
	/// Last day (`YYYY-MM-DD`).
	pub finish_on: String,
	/// Free-form description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Half-day marker.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub half_day: Option<String>,
}

/// Payload for [`Client::update_leave`]; unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UpdateLeaveRequest {
	/// Employee on leave.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub employee_id: Option<u64>,
	/// Leave type.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub leave_type_id: Option<u64>,
	/// First day (`YYYY-MM-DD`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub start_on: Option<String>,
	/// Last day (`YYYY-MM-DD`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub finish_on: Option<String>,
	/// Free-form description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Half-day marker.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub half_day: Option<String>,
}

impl Client {
	/// Lists the company's leave types.
	pub async fn list_leave_types(&self) -> Result<Vec<LeaveType>> {
		self.get(LEAVE_TYPES, None).await
	}

	/// Creates a custom leave type. Admin only.
	pub async fn create_leave_type(&self, request: &CreateLeaveTypeRequest) -> Result<LeaveType> {
		self.post(LEAVE_TYPES, request).await
	}

	/// Updates a custom leave type. Admin only.
	pub async fn update_leave_type(
		&self,
		id: u64,
		request: &UpdateLeaveTypeRequest,
	) -> Result<LeaveType> {
		self.put(&format!("{LEAVE_TYPES}/{id}"), request).await
	}

	/// Lists every leave visible to the caller.
	pub async fn list_leaves(&self) -> Result<Vec<Leave>> {
		self.get(LEAVES, None).await
	}

	/// Creates a leave for the caller or someone they manage.
	pub async fn create_leave(&self, request: &CreateLeaveRequest) -> Result<Leave> {
		self.post(LEAVES, request).await
	}

	/// Updates a leave. Restrictions apply once the leave has started.
	pub async fn update_leave(&self, id: u64, request: &UpdateLeaveRequest) -> Result<Leave> {
		self.put(&format!("{LEAVES}/{id}"), request).await
	}

	/// Deletes a leave. Restrictions apply once the leave has started.
	pub async fn delete_leave(&self, id: u64) -> Result<()> {
		self.delete(&format!("{LEAVES}/{id}")).await
	}
}
