//! Demo web server walking through the Factorial authorization-code flow.
//!
//! Configure it through `FACTORIAL_*` environment variables (a `.env` file is honored), then
//! open `http://127.0.0.1:3000/` and follow the "Connect" link. Each browser session gets its own
//! owner id stored in a cookie; tokens live in the configured repository and are refreshed on
//! demand by the [`TokenSource`].

// std
use std::{
	collections::HashMap,
	path::PathBuf,
	sync::Arc,
	time::{Duration, Instant},
};
// crates.io
use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{Html, IntoResponse, Redirect, Response},
	routing::get,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use clap::Parser;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
// self
use factorial_client::{
	auth::{OwnerId, ScopeSet},
	client::{self, Client, Credentials},
	error::Error,
	flows::{self, TokenSource},
	http::ReqwestHttpClient,
	provider::{FACTORIAL_API_URL, OAuthProvider, ProviderConfig},
	repository::{FileRepository, MemoryRepository, TokenRepository},
};

const SESSION_COOKIE: &str = "factorial_session";
const STATE_TTL: Duration = Duration::from_secs(10 * 60);
const MAX_PENDING_STATES: usize = 1_024;

#[derive(Debug, Parser)]
#[command(about = "Factorial OAuth demo server")]
struct Cli {
	/// OAuth client id of the Factorial application.
	#[arg(long, env = "FACTORIAL_CLIENT_ID")]
	client_id: String,
	/// OAuth client secret of the Factorial application.
	#[arg(long, env = "FACTORIAL_CLIENT_SECRET", hide_env_values = true)]
	client_secret: String,
	/// Redirect URL registered with the application.
	#[arg(
		long,
		env = "FACTORIAL_REDIRECT_URL",
		default_value = "http://127.0.0.1:3000/auth/factorial/callback"
	)]
	redirect_url: String,
	/// Scopes to request, separated by commas or spaces.
	#[arg(long, env = "FACTORIAL_SCOPES", default_value = "")]
	scopes: ScopeSet,
	/// API origin.
	#[arg(long, env = "FACTORIAL_API_URL", default_value = FACTORIAL_API_URL)]
	api_url: String,
	/// Persist tokens to this JSON file instead of keeping them in memory.
	#[arg(long, env = "FACTORIAL_TOKEN_FILE")]
	token_file: Option<PathBuf>,
	/// Address to listen on.
	#[arg(long, env = "FACTORIAL_LISTEN", default_value = "127.0.0.1:3000")]
	listen: String,
	/// Log filter used when `RUST_LOG` is unset.
	#[arg(long, default_value = "info,factorial_client=debug")]
	log_level: String,
}

#[derive(Clone)]
struct AppState {
	provider: OAuthProvider,
	source: TokenSource,
	http: ReqwestHttpClient,
	api_url: String,
	pending_states: Arc<Mutex<PendingStates>>,
}
impl AppState {
	fn owner(jar: &CookieJar) -> Option<OwnerId> {
		jar.get(SESSION_COOKIE).and_then(|cookie| OwnerId::new(cookie.value()).ok())
	}

	fn client(&self, jar: &CookieJar) -> Result<Client, AppError> {
		let owner = Self::owner(jar).ok_or(AppError::Unauthorized)?;

		Ok(Client::builder(Credentials::Managed { source: self.source.clone(), owner })
			.api_url(&self.api_url)
			.http_client(self.http.clone())
			.build()?)
	}
}

/// OAuth `state` values issued by `/auth/factorial` and not yet redeemed.
///
/// Entries expire after [`STATE_TTL`]; when the set is full the oldest entry is evicted.
#[derive(Debug, Default)]
struct PendingStates(HashMap<String, Instant>);
impl PendingStates {
	fn issue(&mut self, state: String, now: Instant) {
		self.0.retain(|_, issued| now.duration_since(*issued) < STATE_TTL);

		if self.0.len() >= MAX_PENDING_STATES {
			let oldest =
				self.0.iter().min_by_key(|(_, issued)| **issued).map(|(state, _)| state.clone());

			if let Some(oldest) = oldest {
				self.0.remove(&oldest);
			}
		}

		self.0.insert(state, now);
	}

	fn redeem(&mut self, state: &str, now: Instant) -> bool {
		self.0.remove(state).is_some_and(|issued| now.duration_since(issued) < STATE_TTL)
	}
}

enum AppError {
	Unauthorized,
	BadRequest(&'static str),
	Factorial(Error),
}
impl From<Error> for AppError {
	fn from(err: Error) -> Self {
		Self::Factorial(err)
	}
}
impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		let (status, message) = match self {
			AppError::Unauthorized =>
				(StatusCode::UNAUTHORIZED, "Connect your Factorial account first.".to_owned()),
			AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.to_owned()),
			AppError::Factorial(Error::NotFound { .. }) =>
				(StatusCode::UNAUTHORIZED, "Session has no stored token.".to_owned()),
			AppError::Factorial(err @ Error::HttpStatus { .. }) =>
				(StatusCode::BAD_GATEWAY, err.to_string()),
			AppError::Factorial(err) => {
				tracing::error!(error = ?err, "factorial request failed");

				(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
			},
		};

		(status, message).into_response()
	}
}

#[derive(Debug, Deserialize)]
struct CallbackParams {
	code: Option<String>,
	state: Option<String>,
	error: Option<String>,
}

#[derive(Serialize)]
struct SessionView {
	owner: String,
	expires_at: String,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	dotenvy::dotenv().ok();

	let cli = Cli::parse();

	init_tracing(&cli.log_level);

	let config = ProviderConfig::builder()
		.client_id(&cli.client_id)
		.client_secret(&cli.client_secret)
		.redirect_url(&cli.redirect_url)
		.scopes(cli.scopes.iter())
		.api_url(&cli.api_url)
		.build()?;
	let http = ReqwestHttpClient::with_timeout(config.timeout)?;
	let provider = OAuthProvider::with_http_client(config, http.clone());
	let repository: Arc<dyn TokenRepository> = match &cli.token_file {
		Some(path) => Arc::new(FileRepository::open(path)?),
		None => Arc::new(MemoryRepository::default()),
	};
	let source = TokenSource::new(repository, Arc::new(provider.clone()));
	let state = AppState {
		provider,
		source,
		http,
		api_url: cli.api_url.clone(),
		pending_states: Default::default(),
	};
	let app = Router::new()
		.route("/", get(home))
		.route("/session", get(session))
		.route("/auth/factorial", get(start_oauth))
		.route("/auth/factorial/callback", get(oauth_callback))
		.route("/employees", get(employees))
		.route("/teams", get(teams))
		.route("/locations", get(locations))
		.route("/company_holidays", get(company_holidays))
		.route("/leave_types", get(leave_types))
		.route("/leaves", get(leaves))
		.route("/webhooks", get(webhooks))
		.route("/folders", get(folders))
		.route("/documents", get(documents))
		.route("/payslips", get(payslips))
		.route("/hiring_versions", get(hiring_versions))
		.route("/shifts", get(shifts))
		.with_state(state)
		.layer(TraceLayer::new_for_http());
	let listener = tokio::net::TcpListener::bind(&cli.listen).await?;

	tracing::info!(listen = %cli.listen, "factorial demo server listening");

	axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

	Ok(())
}

fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false)).init();
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::warn!(error = %err, "failed to listen for ctrl-c");
	}

	tracing::info!("shutting down");
}

async fn home(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
	let connected = match AppState::owner(&jar) {
		Some(owner) => matches!(state.source.repository().get(&owner).await, Ok(Some(_))),
		None => false,
	};
	let body = if connected {
		"<h1>Connected to Factorial</h1><ul>\
		 <li><a href=\"/session\">session</a></li>\
		 <li><a href=\"/employees\">employees</a></li>\
		 <li><a href=\"/teams\">teams</a></li>\
		 <li><a href=\"/locations\">locations</a></li>\
		 <li><a href=\"/company_holidays\">company holidays</a></li>\
		 <li><a href=\"/leave_types\">leave types</a></li>\
		 <li><a href=\"/leaves\">leaves</a></li>\
		 <li><a href=\"/folders\">folders</a></li>\
		 <li><a href=\"/documents\">documents</a></li>\
		 <li><a href=\"/payslips\">payslips</a></li>\
		 <li><a href=\"/hiring_versions\">hiring versions</a></li>\
		 <li><a href=\"/shifts\">shifts</a></li>\
		 <li><a href=\"/webhooks\">webhooks</a></li></ul>"
	} else {
		"<h1>Factorial demo</h1><a href=\"/auth/factorial\">Connect your Factorial account</a>"
	};

	Html(body.to_owned())
}

async fn session(
	State(state): State<AppState>,
	jar: CookieJar,
) -> Result<Json<SessionView>, AppError> {
	let owner = AppState::owner(&jar).ok_or(AppError::Unauthorized)?;
	let token = state.source.token(&owner).await?;

	Ok(Json(SessionView { owner: owner.to_string(), expires_at: token.expires_at.to_string() }))
}

async fn start_oauth(State(state): State<AppState>) -> Redirect {
	let csrf = flows::random_state();
	let url = state.provider.auth_url(&csrf);

	state.pending_states.lock().issue(csrf, Instant::now());

	Redirect::to(url.as_str())
}

async fn oauth_callback(
	State(state): State<AppState>,
	jar: CookieJar,
	Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect), AppError> {
	if let Some(error) = params.error {
		tracing::warn!(%error, "authorization was denied");

		return Err(AppError::BadRequest("Authorization was denied."));
	}

	let csrf = params.state.ok_or(AppError::BadRequest("Missing state."))?;

	if !state.pending_states.lock().redeem(&csrf, Instant::now()) {
		return Err(AppError::BadRequest("Unknown or reused state."));
	}

	let code = params.code.ok_or(AppError::BadRequest("Missing authorization code."))?;
	let token = state.provider.exchange_code(&code).await?;
	let owner = OwnerId::new(flows::random_state())
		.map_err(|_| AppError::BadRequest("Could not allocate a session."))?;

	state.source.save(&owner, token).await?;
	tracing::info!(%owner, "factorial account connected");

	let cookie = Cookie::build((SESSION_COOKIE, owner.to_string()))
		.path("/")
		.http_only(true)
		.same_site(SameSite::Lax);

	Ok((jar.add(cookie), Redirect::to("/")))
}

fn filter(params: HashMap<String, String>) -> client::Query {
	params.into_iter().fold(client::Query::new(), |query, (key, value)| query.with(key, value))
}

async fn employees(
	State(state): State<AppState>,
	jar: CookieJar,
) -> Result<Json<Vec<client::Employee>>, AppError> {
	Ok(Json(state.client(&jar)?.list_employees().await?))
}

async fn teams(
	State(state): State<AppState>,
	jar: CookieJar,
) -> Result<Json<Vec<client::Team>>, AppError> {
	Ok(Json(state.client(&jar)?.list_teams().await?))
}

async fn locations(
	State(state): State<AppState>,
	jar: CookieJar,
) -> Result<Json<Vec<client::Location>>, AppError> {
	Ok(Json(state.client(&jar)?.list_locations().await?))
}

async fn company_holidays(
	State(state): State<AppState>,
	jar: CookieJar,
) -> Result<Json<Vec<client::CompanyHoliday>>, AppError> {
	Ok(Json(state.client(&jar)?.list_company_holidays().await?))
}

async fn leave_types(
	State(state): State<AppState>,
	jar: CookieJar,
) -> Result<Json<Vec<client::LeaveType>>, AppError> {
	Ok(Json(state.client(&jar)?.list_leave_types().await?))
}

async fn leaves(
	State(state): State<AppState>,
	jar: CookieJar,
) -> Result<Json<Vec<client::Leave>>, AppError> {
	Ok(Json(state.client(&jar)?.list_leaves().await?))
}

async fn webhooks(
	State(state): State<AppState>,
	jar: CookieJar,
) -> Result<Json<Vec<client::Webhook>>, AppError> {
	Ok(Json(state.client(&jar)?.list_webhooks().await?))
}

async fn folders(
	State(state): State<AppState>,
	jar: CookieJar,
	Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<client::Folder>>, AppError> {
	Ok(Json(state.client(&jar)?.list_folders(&filter(params)).await?))
}

async fn documents(
	State(state): State<AppState>,
	jar: CookieJar,
	Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<client::Document>>, AppError> {
	Ok(Json(state.client(&jar)?.list_documents(&filter(params)).await?))
}

async fn payslips(
	State(state): State<AppState>,
	jar: CookieJar,
	Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<client::Payslip>>, AppError> {
	Ok(Json(state.client(&jar)?.list_payslips(&filter(params)).await?))
}

async fn hiring_versions(
	State(state): State<AppState>,
	jar: CookieJar,
	Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<client::HiringVersion>>, AppError> {
	Ok(Json(state.client(&jar)?.list_hiring_versions(&filter(params)).await?))
}

async fn shifts(
	State(state): State<AppState>,
	jar: CookieJar,
	Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<client::Shift>>, AppError> {
	Ok(Json(state.client(&jar)?.list_shifts(&filter(params)).await?))
}
