use article2md_cli::{cli::Cli, commands, logging};
use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = commands::dispatch(cli.command).await {
		error!(target = "article2md", error = %format!("{err:#}"), "command failed");
		std::process::exit(1);
	}
}
