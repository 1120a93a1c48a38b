use clap::Parser;
use swagger_embed::runtime::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()>
{
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("WARNING: failed to load `.env` file: {error}");
	}

	swagger_embed::logging::init()?;

	let config = Config::parse();

	tracing::debug!(?config, "parsed configuration");

	swagger_embed::run(config).await
}
