//! Payslips.

// self
use crate::{
	_prelude::*,
	client::{Client, Query, null_as_default},
};

const PAYSLIPS: &str = "/api/v1/payslips";

/// Payslip issued to an employee.
///
/// Factorial reports the salary amounts as strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
	/// Payslip identifier.
	pub id: u64,
	/// Social security contribution base in cents.
	#[serde(default)]
	pub base_cotization_in_cents: Option<i64>,
	/// Income tax base in cents.
	#[serde(default)]
	pub base_irpf_in_cents: Option<i64>,
	/// Gross salary in cents.
	#[serde(default)]
	pub gross_salary_in_cents: Option<String>,
	/// Net salary in cents.
	#[serde(default)]
	pub net_salary_in_cents: Option<String>,
	/// Income tax withheld in cents.
	#[serde(default)]
	pub irpf_in_cents: Option<i64>,
	/// Income tax percentage.
	#[serde(default)]
	pub irpf_percentage: Option<String>,
	/// Whether this is the employee's latest payslip.
	#[serde(default, deserialize_with = "null_as_default")]
	pub is_last_payslip: bool,
	/// Period start (`YYYY-MM-DD`).
	#[serde(default)]
	pub start_date: Option<String>,
	/// Period end (`YYYY-MM-DD`).
	#[serde(default)]
	pub end_date: Option<String>,
	/// Employee the payslip belongs to.
	#[serde(default)]
	pub employee_id: Option<u64>,
	/// Publication status.
	#[serde(default)]
	pub status: Option<String>,
}

impl Client {
	/// Lists payslips, optionally filtered by `employee_id`.
	pub async fn list_payslips(&self, filter: &Query) -> Result<Vec<Payslip>> {
		self.get(PAYSLIPS, Some(filter)).await
	}
}
