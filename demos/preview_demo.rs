use anyhow::Result;
use linkcard::{Config, Previewer, telemetry};

/// Demo program that previews the first link found in its arguments
///
/// cargo run --example preview_demo -- "have a look at https://www.rust-lang.org/"
#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format());

    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        eprintln!("usage: preview_demo <text containing a link>");
        return Ok(());
    }

    let previewer = Previewer::from_config(&config)?;

    match previewer.preview(&text).await {
        Ok(preview) => println!("{}", serde_json::to_string_pretty(&preview)?),
        Err(err) => {
            println!("Preview failed ({:?}): {}", err.kind(), err.description());
        }
    }

    Ok(())
}
