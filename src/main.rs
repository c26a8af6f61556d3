use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use sponsors_function::config;
use sponsors_function::github::{DynSponsorSource, GithubSponsors};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    sponsors_function::set_up_logging();

    info!(
        "Initializing {} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = config::Config::load_from_env()?;
    info!("Loaded configuration: {:?}", config);
    let source: DynSponsorSource = Arc::new(GithubSponsors::new(&config)?);

    run(service_fn(|request: LambdaEvent<Value>| {
        sponsors_function::function_handler(source.clone(), request)
    }))
    .await
}
