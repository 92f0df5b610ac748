//! Prints an authorize URL or exchanges an authorization code, optionally persisting the token.
//!
//! ```sh
//! cargo run --example exchange_code -- authorize
//! cargo run --example exchange_code -- exchange <CODE> --token-file tokens.json --owner me
//! ```

// std
use std::{path::PathBuf, sync::Arc};
// crates.io
use clap::{Parser, Subcommand};
// self
use factorial_client::{
	auth::{OwnerId, ScopeSet},
	flows::{self, TokenSource},
	provider::{FACTORIAL_API_URL, OAuthProvider, ProviderConfig},
	repository::FileRepository,
};

#[derive(Debug, Parser)]
#[command(about = "Run the Factorial authorization-code grant from the terminal")]
struct Cli {
	#[arg(long, env = "FACTORIAL_CLIENT_ID")]
	client_id: String,
	#[arg(long, env = "FACTORIAL_CLIENT_SECRET", hide_env_values = true)]
	client_secret: String,
	#[arg(long, env = "FACTORIAL_REDIRECT_URL")]
	redirect_url: String,
	#[arg(long, env = "FACTORIAL_SCOPES", default_value = "")]
	scopes: ScopeSet,
	#[arg(long, env = "FACTORIAL_API_URL", default_value = FACTORIAL_API_URL)]
	api_url: String,
	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Print the URL the user has to visit.
	Authorize {
		/// Opaque state echoed back on the callback; random when omitted.
		#[arg(long)]
		state: Option<String>,
	},
	/// Exchange the code received on the callback.
	Exchange {
		code: String,
		/// Save the token into this JSON repository.
		#[arg(long, requires = "owner")]
		token_file: Option<PathBuf>,
		/// Owner id the token is saved under.
		#[arg(long)]
		owner: Option<String>,
	},
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	dotenvy::dotenv().ok();

	let cli = Cli::parse();
	let config = ProviderConfig::builder()
		.client_id(cli.client_id)
		.client_secret(cli.client_secret)
		.redirect_url(cli.redirect_url)
		.scopes(cli.scopes.iter())
		.api_url(cli.api_url)
		.build()?;
	let provider = OAuthProvider::new(config)?;

	match cli.command {
		Command::Authorize { state } => {
			let state = state.unwrap_or_else(flows::random_state);

			println!("state: {state}");
			println!("{}", provider.auth_url(&state));
		},
		Command::Exchange { code, token_file, owner } => {
			let token = provider.exchange_code(&code).await?;

			println!("{token:?}");
			println!("expires at {}", token.expires_at);

			if let (Some(path), Some(owner)) = (token_file, owner) {
				let owner = OwnerId::new(owner)?;
				let repository = FileRepository::open(&path)?;
				let source = TokenSource::new(Arc::new(repository), Arc::new(provider));

				source.save(&owner, token).await?;
				println!("saved token for `{owner}` to {}", path.display());
			}
		},
	}

	Ok(())
}
