//! OAuth flows built on [`OAuthProvider`](crate::provider::OAuthProvider).
//!
//! - [`authorization`] renders the authorize URL and exchanges authorization codes.
//! - [`refresh`] trades a refresh token for a new access token.
//! - [`source`] hands out valid tokens for an owner, refreshing lazily through a
//!   [`TokenRepository`](crate::repository::TokenRepository).

pub mod authorization;
pub mod refresh;
pub mod source;

pub use authorization::*;
pub use refresh::*;
pub use source::*;
