//! Teams.

// self
use crate::{
	_prelude::*,
	client::{Client, null_as_default},
};

const TEAMS: &str = "/api/v1/teams";

/// Group of employees with optional leads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
	/// Team identifier.
	pub id: u64,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Members.
	#[serde(default, deserialize_with = "null_as_default")]
	pub employee_ids: Vec<u64>,
	/// Team leads.
	#[serde(default, deserialize_with = "null_as_default")]
	pub lead_ids: Vec<u64>,
}

impl Client {
	/// Lists teams.
	pub async fn list_teams(&self) -> Result<Vec<Team>> {
		self.get(TEAMS, None).await
	}

	/// Fetches one team.
	pub async fn get_team(&self, id: u64) -> Result<Team> {
		self.get(&format!("{TEAMS}/{id}"), None).await
	}
}
