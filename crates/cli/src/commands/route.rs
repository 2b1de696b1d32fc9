use anyhow::Result;
use article2md::route_address;
use tracing::info;

use super::read_snippet;
use crate::cli::RouteArgs;

pub fn execute(args: &RouteArgs) -> Result<()> {
	let markdown = read_snippet(args)?;
	let route = route_address(&markdown)?;
	info!(target = "article2md", %route, "route resolved");

	println!("{route}");
	Ok(())
}
