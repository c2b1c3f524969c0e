use anyhow::Result;
use ensaluti::cli;

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    let (action, globals) = cli::start()?;

    let result = action.execute(&globals).await;

    // Flush any pending spans before exiting
    cli::telemetry::shutdown_tracer();

    result
}
