//! Lists the employees visible to an access token.
//!
//! ```sh
//! FACTORIAL_ACCESS_TOKEN=... cargo run --example employees
//! ```

// crates.io
use clap::Parser;
// self
use factorial_client::{
	auth::Secret,
	client::{Client, Credentials},
	provider::FACTORIAL_API_URL,
};

#[derive(Debug, Parser)]
#[command(about = "List Factorial employees with a static access token")]
struct Cli {
	/// Access token sent as the bearer credential.
	#[arg(long, env = "FACTORIAL_ACCESS_TOKEN", hide_env_values = true)]
	access_token: String,
	/// API origin.
	#[arg(long, env = "FACTORIAL_API_URL", default_value = FACTORIAL_API_URL)]
	api_url: String,
	/// Only print employees whose full name contains this text (case-insensitive).
	#[arg(long)]
	name: Option<String>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	dotenvy::dotenv().ok();

	let cli = Cli::parse();
	let client = Client::builder(Credentials::Bearer(Secret::new(cli.access_token)))
		.api_url(cli.api_url)
		.build()?;
	let needle = cli.name.map(|name| name.to_lowercase());
	let employees = client.list_employees().await?;

	for employee in employees.iter().filter(|employee| match &needle {
		Some(needle) => employee
			.full_name
			.as_deref()
			.is_some_and(|full_name| full_name.to_lowercase().contains(needle)),
		None => true,
	}) {
		println!(
			"{:>8}  {:<32}  {}",
			employee.id,
			employee.full_name.as_deref().unwrap_or("-"),
			employee.email.as_deref().unwrap_or("-"),
		);
	}

	Ok(())
}
