/**
 * Minimal walkthrough of the trak SDK against the live API.
 *
 * Set your project's API key and run:
 *
 *   TRAK_API_KEY=... cargo run -p trak_example
 *   TRAK_API_KEY=... RUST_LOG=trak=debug cargo run -p trak_example   # log requests
 *   TRAK_API_KEY=... cargo run -p trak_example -- --default-client   # use trak::init
 */
use serde_json::json;
use tracing_subscriber::EnvFilter;
use trak::{AnnotateOptions, PageViewOptions, TrackOptions, TrakClient};

fn main() -> Result<(), trak::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let use_default_client = std::env::args().any(|a| a == "--default-client");

    if use_default_client {
        /*
         * The key comes from TRAK_API_KEY because Options::api_key is None.
         */
        trak::init(trak::Options::default())?;

        let response = trak::identify("demo_user", trak::properties_from_value(json!({"name": "Demo"}))?)?;
        println!("[example] identify → {response}");

        let response = trak::track("Ran demo", TrackOptions::new())?;
        println!("[example] track → {response}");
        return Ok(());
    }

    let mut client = TrakClient::new(trak::Options::default())?;
    client.set_channel("demo");

    let response = client.identify(
        "demo_user",
        trak::properties_from_value(json!({"name": "Demo User", "plan": "free"}))?,
    )?;
    println!("[example] identify → {response}");

    let response = client.alias("demo_user", ["demo@example.com"])?;
    println!("[example] alias → {response}");

    let response = client.track("Signed up", TrackOptions::new().property("source", "demo"))?;
    println!("[example] track → {response}");

    let response = client.page_view("/pricing", "Pricing", PageViewOptions::new())?;
    println!("[example] page_view → {response}");

    let response = client.annotate(
        "Deployed demo",
        AnnotateOptions::new().property("version", env!("CARGO_PKG_VERSION")),
    )?;
    println!("[example] annotate → {response}");

    Ok(())
}
