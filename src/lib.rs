//! Async client for the Factorial HR API.
//!
//! The crate covers three concerns:
//!
//! - [`client::Client`] issues typed requests against the `/api/v1` resources (employees, leaves,
//!   documents, payslips, shifts, teams, locations, webhooks and friends).
//! - [`provider::OAuthProvider`] drives the authorization-code grant: it builds the authorize URL,
//!   exchanges codes, and refreshes expired tokens.
//! - [`flows::TokenSource`] hands out valid access tokens on demand, re-reading the caller's
//!   [`repository::TokenRepository`] on every call and refreshing lazily when the stored token
//!   has expired.

#![deny(clippy::all, missing_docs)]

pub mod auth;
pub mod client;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
pub mod repository;

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, Method, StatusCode};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
