use crate::config::Config;
use crate::model::SponsorsData;
use async_trait::async_trait;
use http::header::{ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Sponsorships and tiers of one organization. `__typename` drives the
/// decoding of the sponsor entity.
pub const SPONSORS_QUERY: &str = r#"
query Sponsors($login: String!, $first: Int!) {
  organization(login: $login) {
    sponsorshipsAsMaintainer(first: $first) {
      nodes {
        sponsorEntity {
          __typename
          ... on Organization {
            name
            login
            id
            avatarUrl_80: avatarUrl(size: 80)
            avatarUrl_160: avatarUrl(size: 160)
            avatarUrl_240: avatarUrl(size: 240)
            avatarUrl_480: avatarUrl(size: 480)
            avatarUrl_720: avatarUrl(size: 720)
            url
            description
            descriptionHTML
            websiteUrl
          }
          ... on User {
            name
            login
            id
            avatarUrl_80: avatarUrl(size: 80)
            avatarUrl_160: avatarUrl(size: 160)
            avatarUrl_240: avatarUrl(size: 240)
            avatarUrl_480: avatarUrl(size: 480)
            avatarUrl_720: avatarUrl(size: 720)
            url
            websiteUrl
          }
        }
        tier {
          id
        }
        tierSelectedAt
      }
    }
    sponsorsListing {
      tiers(first: $first) {
        nodes {
          id
          name
          monthlyPriceInDollars
          monthlyPriceInCents
          isOneTime
          isCustomAmount
        }
      }
    }
  }
}
"#;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Request to GitHub failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("GitHub responded with HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("GitHub GraphQL errors: {}", .0.join("; "))]
    Graphql(Vec<String>),
    #[error("GitHub response carried no data")]
    MissingData,
    #[error("Failed to decode GitHub response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where sponsors data comes from.
#[async_trait]
pub trait SponsorSource: Send + Sync {
    async fn fetch_sponsors(&self) -> Result<SponsorsData, FetchError>;
}

pub type DynSponsorSource = Arc<dyn SponsorSource>;

// data stays untyped until errors are ruled out; GitHub pairs errors with
// partial data such as `{"organization": null}`
#[derive(Deserialize, Debug)]
struct GraphqlResponse {
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize, Debug)]
struct GraphqlError {
    message: String,
}

#[derive(Serialize, Debug)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

/// Sponsors of an organization, read from the GitHub GraphQL API.
#[derive(Clone)]
pub struct GithubSponsors {
    http: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
    organization: String,
    page_size: u32,
}

impl GithubSponsors {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(GithubSponsors {
            http,
            endpoint: config.graphql_endpoint.clone(),
            token: config.github_token.clone(),
            organization: config.organization.clone(),
            page_size: config.page_size,
        })
    }

    fn request_body(&self) -> GraphqlRequest<'static> {
        GraphqlRequest {
            query: SPONSORS_QUERY,
            variables: json!({
                "login": self.organization,
                "first": self.page_size,
            }),
        }
    }

    async fn query(&self) -> Result<SponsorsData, FetchError> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(&self.request_body());
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("bearer {}", token));
        } else {
            debug!("No GitHub token configured, querying unauthenticated");
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let response: GraphqlResponse = serde_json::from_slice(&body)?;
        if !response.errors.is_empty() {
            return Err(FetchError::Graphql(
                response.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        match response.data {
            Some(data) if !data.is_null() => Ok(serde_json::from_value(data)?),
            _ => Err(FetchError::MissingData),
        }
    }
}

#[async_trait]
impl SponsorSource for GithubSponsors {
    async fn fetch_sponsors(&self) -> Result<SponsorsData, FetchError> {
        let start_time = Instant::now();
        let result = self.query().await;
        match &result {
            Ok(data) => info!(
                "Fetched {} sponsorships and {} tiers of {} from GitHub in {}ms",
                data.organization.sponsorships_as_maintainer.nodes.len(),
                data.organization.sponsors_listing.tiers.nodes.len(),
                self.organization,
                start_time.elapsed().as_millis()
            ),
            Err(error) => error!(?error, "Failed to fetch sponsors of {}", self.organization),
        }
        result
    }
}
