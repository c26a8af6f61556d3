use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How long the platform may serve a cached response before invoking the
/// function again: 60 × 24 seconds.
pub const CACHE_TTL_SECONDS: u64 = 60 * 24;

const BUILDER_METADATA_VERSION: u32 = 1;

/// Response of an on-demand builder function: a regular function response
/// plus the `ttl` hint and the metadata block that marks it as a builder.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuilderResponse {
    pub status_code: u16,
    pub ttl: u64,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub metadata: BuilderMetadata,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BuilderMetadata {
    pub version: u32,
    pub builder_function: bool,
    pub ttl: u64,
}

impl BuilderResponse {
    pub fn json<T: Serialize>(payload: &T, ttl: u64) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(payload)?;
        let headers = BTreeMap::from([(
            "Content-Type".to_owned(),
            "application/json".to_owned(),
        )]);
        Ok(BuilderResponse {
            status_code: StatusCode::OK.as_u16(),
            ttl,
            headers,
            body,
            metadata: BuilderMetadata {
                version: BUILDER_METADATA_VERSION,
                builder_function: true,
                ttl,
            },
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_response_wire_format() {
        let response = BuilderResponse::json(&json!({"hello": "world"}), CACHE_TTL_SECONDS).unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "statusCode": 200,
                "ttl": 1440,
                "headers": {"Content-Type": "application/json"},
                "body": "{\"hello\":\"world\"}",
                "metadata": {"version": 1, "builder_function": true, "ttl": 1440}
            })
        );
    }
}
