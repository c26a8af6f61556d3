use reqwest::Url;
use std::env;
use std::string::String;

pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";
pub const DEFAULT_ORGANIZATION: &str = "Virtual-Coffee";
// GitHub rejects connection pages larger than 100
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub graphql_endpoint: Url,
    pub organization: String,
    pub page_size: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("graphql_endpoint", &self.graphql_endpoint.as_str())
            .field("organization", &self.organization)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl Config {
    pub fn load_from_env() -> Result<Config, String> {
        let graphql_endpoint = env::var("GITHUB_GRAPHQL_ENDPOINT")
            .unwrap_or(DEFAULT_GRAPHQL_ENDPOINT.to_string());

        let conf = Config {
            github_token: env::var("GITHUB_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            graphql_endpoint: Url::parse(&graphql_endpoint).map_err(|e| {
                format!(
                    "Error parsing GITHUB_GRAPHQL_ENDPOINT {} - {}",
                    graphql_endpoint, e
                )
            })?,
            organization: env::var("SPONSORS_ORGANIZATION")
                .ok()
                .filter(|org| !org.trim().is_empty())
                .unwrap_or(DEFAULT_ORGANIZATION.to_string()),
            page_size: env::var("SPONSORS_PAGE_SIZE")
                .unwrap_or(MAX_PAGE_SIZE.to_string())
                .parse::<u32>()
                .map_err(|e| format!("Error parsing SPONSORS_PAGE_SIZE to u32 - {}", e))
                .and_then(|size| match size {
                    1..=MAX_PAGE_SIZE => Ok(size),
                    other => Err(format!(
                        "SPONSORS_PAGE_SIZE must be between 1 and {}, got {}",
                        MAX_PAGE_SIZE, other
                    )),
                })?,
        };

        Ok(conf)
    }
}
