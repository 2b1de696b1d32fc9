//! Log subscriber setup. Logs go to stderr so stdout stays clean for the
//! converted article.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: u8) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

	// A second call (tests, embedding) keeps the first subscriber.
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose > 1)
		.try_init();
}

fn default_directives(verbose: u8) -> String {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	if verbose >= 3 { level.to_string() } else { format!("{level},hyper=warn,h2=warn,reqwest=warn,rustls=warn") }
}
