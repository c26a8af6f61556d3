use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::github::{DynSponsorSource, SponsorSource};
use crate::model::SponsorsData;
use crate::response::{BuilderResponse, CACHE_TTL_SECONDS};

pub mod config;
pub mod fallback;
pub mod github;
pub mod model;
pub mod overrides;
pub mod response;
pub mod transform;

pub fn set_up_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
}

// on-demand builder handler; the request itself carries nothing we use
pub async fn function_handler(
    source: DynSponsorSource,
    evt: LambdaEvent<Value>,
) -> Result<BuilderResponse, Error> {
    info!("Handling sponsors request");
    debug!("Handling event payload: {:?}", evt.payload);

    let data = load_sponsors(&source).await?;
    let buckets = transform::sponsor_buckets(data);
    info!(
        "Serving {} logo sponsor tiers and {} supporter tiers",
        buckets.logo_sponsors.len(),
        buckets.supporters.len()
    );

    Ok(BuilderResponse::json(&buckets, CACHE_TTL_SECONDS)?)
}

/// Sponsors from the source, or the bundled fixture when the source fails.
///
/// Fetch failures never surface; the only error is a fixture that no longer
/// decodes.
pub async fn load_sponsors(
    source: &DynSponsorSource,
) -> Result<SponsorsData, serde_json::Error> {
    match source.fetch_sponsors().await {
        Ok(data) => Ok(data),
        Err(error) => {
            warn!("Error loading GitHub sponsors, using fallback data instead: {}", error);
            fallback::sponsors()
        }
    }
}
