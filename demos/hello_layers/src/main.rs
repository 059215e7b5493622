//! Print a greeting assembled from command line, environment and files.
//!
//! Set `RUST_LOG=strata_config=debug` to watch each layer resolve.

use std::io::Write;

use hello_layers::load;
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = load()?;
    tracing::debug!(?settings, "resolved settings");
    writeln!(std::io::stdout().lock(), "{}", settings.greeting())?;
    Ok(())
}
