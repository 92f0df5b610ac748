//! Validated identifiers for token owners and OAuth clients.
//!
//! Both are opaque strings: no whitespace, not empty, at most [`IDENTIFIER_MAX_LEN`] bytes. They
//! serialize as plain JSON strings and are re-validated on the way back in, so a tampered
//! repository file cannot smuggle in an identifier the constructors would reject.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Longest identifier accepted, in bytes.
pub const IDENTIFIER_MAX_LEN: usize = 128;

/// Which identifier failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IdKind {
	/// [`OwnerId`].
	Owner,
	/// [`ClientId`].
	Client,
}
impl IdKind {
	/// Label used in error messages and `Debug` output.
	pub const fn as_str(self) -> &'static str {
		match self {
			IdKind::Owner => "Owner",
			IdKind::Client => "Client",
		}
	}
}
impl Display for IdKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// Nothing was supplied.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Rejected identifier kind.
		kind: IdKind,
	},
	/// Whitespace (including non-ASCII spaces) appeared anywhere in the value.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Rejected identifier kind.
		kind: IdKind,
	},
	/// Value is longer than [`IDENTIFIER_MAX_LEN`].
	#[error("{kind} identifier exceeds {max} bytes.")]
	TooLong {
		/// Rejected identifier kind.
		kind: IdKind,
		/// Byte limit.
		max: usize,
	},
}

macro_rules! identifier {
	($(#[$meta:meta])* $name:ident => $kind:expr) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Validates `value` and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				check($kind, &value)?;

				Ok(Self(value))
			}

			/// Borrows the raw identifier.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl From<$name> for String {
			fn from(id: $name) -> Self {
				id.0
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "{}({})", $kind, self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

identifier! {
	/// Key a caller picks to scope one token inside a repository: a user, a browser session or a
	/// whole company.
	OwnerId => IdKind::Owner
}
identifier! {
	/// OAuth client identifier of a Factorial application.
	ClientId => IdKind::Client
}

fn check(kind: IdKind, value: &str) -> Result<(), IdentifierError> {
	match value {
		"" => Err(IdentifierError::Empty { kind }),
		v if v.len() > IDENTIFIER_MAX_LEN =>
			Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN }),
		v if v.chars().any(char::is_whitespace) => Err(IdentifierError::ContainsWhitespace { kind }),
		_ => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn owner_ids_reject_blank_and_padded_values() {
		assert_eq!(OwnerId::new(""), Err(IdentifierError::Empty { kind: IdKind::Owner }));
		assert_eq!(
			OwnerId::new("session-1 "),
			Err(IdentifierError::ContainsWhitespace { kind: IdKind::Owner })
		);
		assert!(OwnerId::new(format!("session{}1", '\u{00A0}')).is_err());

		let owner = OwnerId::new("session-1").expect("Owner fixture should be valid.");

		assert_eq!(owner.as_str(), "session-1");
		assert_eq!(format!("{owner:?}"), "Owner(session-1)");
		assert_eq!(owner.to_string(), "session-1");
	}

	#[test]
	fn client_ids_report_their_kind() {
		let err = ClientId::new("two words").expect_err("Whitespace must be rejected.");

		assert_eq!(err.to_string(), "Client identifier contains whitespace.");
	}

	#[test]
	fn length_limit_is_inclusive() {
		OwnerId::new("a".repeat(IDENTIFIER_MAX_LEN)).expect("Limit-sized owner should be valid.");

		assert_eq!(
			OwnerId::new("a".repeat(IDENTIFIER_MAX_LEN + 1)),
			Err(IdentifierError::TooLong { kind: IdKind::Owner, max: IDENTIFIER_MAX_LEN })
		);
	}

	#[test]
	fn deserialization_revalidates() {
		let owner: OwnerId =
			serde_json::from_str("\"company-7\"").expect("Owner should deserialize.");

		assert_eq!(serde_json::to_string(&owner).expect("Owner should serialize."), "\"company-7\"");
		assert!(serde_json::from_str::<OwnerId>("\"company 7\"").is_err());
	}

	#[test]
	fn repositories_can_look_up_by_str() {
		let owner = OwnerId::new("owner-123").expect("Owner fixture should be valid.");
		let map = HashMap::from([(owner, 7_u8)]);

		assert_eq!(map.get("owner-123"), Some(&7));
	}
}
