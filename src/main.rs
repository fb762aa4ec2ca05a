//! # calcline Main Entry Point

use anyhow::Result;
use calcline::cmd_args::CommandLineArgs;
use calcline::AppController;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber();

    let cmd_args = CommandLineArgs::parse();
    tracing::debug!("Command line arguments: {:?}", cmd_args);

    let mut app = AppController::new(&cmd_args)?;
    app.run().await
}

fn init_tracing_subscriber() {
    // The calculator owns the terminal; stay silent unless asked to log
    let Ok(mut filter) = EnvFilter::try_from_env(format!(
        "{}_LOG_LEVEL",
        env!("CARGO_PKG_NAME").to_uppercase()
    )) else {
        return;
    };
    for directive in [
        "reqwest=warn",
        "hyper=warn",
        "hyper_util=warn",
        "tokio=warn",
        "rustls=warn",
        "tracing_subscriber=warn",
    ] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring log directive '{directive}': {e}"),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
