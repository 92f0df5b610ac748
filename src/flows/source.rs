//! Refresh-on-demand token supplier backed by a [`TokenRepository`].
//!
//! [`TokenSource::token`] re-reads the repository on every call, so tokens written by other
//! processes are picked up immediately. An expired token is refreshed once, written back with
//! [`TokenRepository::update`], and returned. Failures propagate untouched: there is no retry
//! and no fallback to the stale token.
//!
//! Two callers racing on the same expired token may both refresh it; the last `update` wins.

mod metrics;

pub use metrics::TokenSourceMetrics;

// self
use crate::{
	_prelude::*,
	auth::{OwnerId, Token, TokenState},
	flows::TokenRefresher,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	repository::TokenRepository,
};

/// Supplies valid tokens per owner, refreshing expired ones lazily.
#[derive(Clone)]
pub struct TokenSource {
	repository: Arc<dyn TokenRepository>,
	refresher: Arc<dyn TokenRefresher>,
	skew: Duration,
	metrics: Arc<TokenSourceMetrics>,
}
impl TokenSource {
	/// Tokens expiring within this window are treated as already expired.
	pub const DEFAULT_SKEW: Duration = Duration::seconds(10);

	/// Creates a source reading from `repository` and refreshing through `refresher`.
	pub fn new(repository: Arc<dyn TokenRepository>, refresher: Arc<dyn TokenRefresher>) -> Self {
		Self { repository, refresher, skew: Self::DEFAULT_SKEW, metrics: Default::default() }
	}

	/// Overrides the expiry skew. Negative values are clamped to zero.
	pub fn with_skew(mut self, skew: Duration) -> Self {
		self.skew = skew.max(Duration::ZERO);

		self
	}

	/// Expiry skew currently applied.
	pub fn skew(&self) -> Duration {
		self.skew
	}

	/// Repository backing this source.
	pub fn repository(&self) -> &Arc<dyn TokenRepository> {
		&self.repository
	}

	/// Lookup counters shared by all clones of this source.
	pub fn metrics(&self) -> &TokenSourceMetrics {
		&self.metrics
	}

	/// Stores the first token obtained for `owner`, typically right after a code exchange.
	pub async fn save(&self, owner: &OwnerId, token: Token) -> Result<()> {
		self.repository.save(owner, token).await.map_err(Error::from)
	}

	/// Returns a valid token for `owner`, refreshing and persisting it when expired.
	pub async fn token(&self, owner: &OwnerId) -> Result<Token> {
		const KIND: FlowKind = FlowKind::TokenSource;

		let span = FlowSpan::new(KIND, "token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);
		self.metrics.record_attempt();

		let result = span.instrument(self.resolve(owner)).await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => {
				self.metrics.record_failure();
				obs::record_flow_outcome(KIND, FlowOutcome::Failure);
			},
		}

		result
	}

	async fn resolve(&self, owner: &OwnerId) -> Result<Token> {
		let current = self
			.repository
			.get(owner)
			.await?
			.ok_or_else(|| Error::NotFound { owner: owner.to_owned() })?;

		if current.state_at(OffsetDateTime::now_utc(), self.skew) == TokenState::Valid {
			return Ok(current);
		}

		let refreshed = self.refresher.refresh(&current).await?;

		self.repository.update(owner, refreshed.clone()).await?;
		self.metrics.record_refresh();

		Ok(refreshed)
	}
}
impl Debug for TokenSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenSource")
			.field("skew", &self.skew)
			.field("metrics", &self.metrics)
			.finish_non_exhaustive()
	}
}
