use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload of the sponsors query: `data` of the GraphQL response, and the
/// shape of the fallback fixture.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SponsorsData {
    pub organization: Organization,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub sponsorships_as_maintainer: Connection<Sponsorship>,
    pub sponsors_listing: SponsorsListing,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SponsorsListing {
    pub tiers: Connection<Tier>,
}

/// A GraphQL connection page. Only `nodes` is requested.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sponsorship {
    pub sponsor_entity: SponsorEntity,
    pub tier: TierRef,
    // nullable upstream and never rendered
    #[serde(default)]
    pub tier_selected_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TierRef {
    pub id: String,
}

/// The sponsoring account, discriminated by its GraphQL `__typename`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "__typename")]
pub enum SponsorEntity {
    Organization(OrganizationSponsor),
    User(SponsorProfile),
}

impl SponsorEntity {
    pub fn profile(&self) -> &SponsorProfile {
        match self {
            SponsorEntity::Organization(org) => &org.profile,
            SponsorEntity::User(profile) => profile,
        }
    }

    pub fn id(&self) -> &str {
        &self.profile().id
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrganizationSponsor {
    #[serde(flatten)]
    pub profile: SponsorProfile,
    #[serde(flatten)]
    pub details: OrganizationDetails,
}

/// Fields only organizations expose. Both may be null upstream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct OrganizationDetails {
    pub description: Option<String>,
    #[serde(rename = "descriptionHTML")]
    pub description_html: Option<String>,
}

/// Fields shared by every sponsor entity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SponsorProfile {
    pub name: Option<String>,
    pub login: String,
    pub id: String,
    #[serde(rename = "avatarUrl_80")]
    pub avatar_url_80: String,
    #[serde(rename = "avatarUrl_160")]
    pub avatar_url_160: String,
    #[serde(rename = "avatarUrl_240")]
    pub avatar_url_240: String,
    #[serde(rename = "avatarUrl_480")]
    pub avatar_url_480: String,
    #[serde(rename = "avatarUrl_720")]
    pub avatar_url_720: String,
    pub url: String,
    pub website_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub id: String,
    pub name: String,
    pub monthly_price_in_dollars: u32,
    pub monthly_price_in_cents: u32,
    pub is_one_time: bool,
    pub is_custom_amount: bool,
}

/// A sponsor as rendered by the website: the upstream profile after
/// overrides, plus the organization-only fields when the sponsor is one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sponsor {
    #[serde(flatten)]
    pub profile: SponsorProfile,
    #[serde(flatten)]
    pub organization: Option<OrganizationDetails>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TierWithSponsors {
    #[serde(flatten)]
    pub tier: Tier,
    pub sponsors: Vec<Sponsor>,
}

/// The response body served to the website.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SponsorBuckets {
    pub logo_sponsors: Vec<TierWithSponsors>,
    pub supporters: Vec<TierWithSponsors>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sponsor_entity_variants() {
        let org = r#"{
            "__typename": "Organization",
            "name": "Whimser",
            "login": "whimser",
            "id": "MDEyOk9yZ2FuaXphdGlvbjcxNDc2MTY2",
            "avatarUrl_80": "https://avatars.githubusercontent.com/u/71476166?s=80&v=4",
            "avatarUrl_160": "https://avatars.githubusercontent.com/u/71476166?s=160&v=4",
            "avatarUrl_240": "https://avatars.githubusercontent.com/u/71476166?s=240&v=4",
            "avatarUrl_480": "https://avatars.githubusercontent.com/u/71476166?s=480&v=4",
            "avatarUrl_720": "https://avatars.githubusercontent.com/u/71476166?s=720&v=4",
            "url": "https://github.com/whimser",
            "description": "Tools for playful teams",
            "descriptionHTML": "<div>Tools for playful teams</div>",
            "websiteUrl": "https://whimser.io"
        }"#;
        let entity: SponsorEntity = serde_json::from_str(org).unwrap();
        match &entity {
            SponsorEntity::Organization(org) => {
                assert_eq!(org.profile.login, "whimser");
                assert_eq!(
                    org.details.description_html.as_deref(),
                    Some("<div>Tools for playful teams</div>")
                );
            }
            other => panic!("expected organization, got {:?}", other),
        }
        assert_eq!(entity.id(), "MDEyOk9yZ2FuaXphdGlvbjcxNDc2MTY2");

        let user = r#"{
            "__typename": "User",
            "name": null,
            "login": "octocat",
            "id": "MDQ6VXNlcjU4MzIzMQ==",
            "avatarUrl_80": "a80",
            "avatarUrl_160": "a160",
            "avatarUrl_240": "a240",
            "avatarUrl_480": "a480",
            "avatarUrl_720": "a720",
            "url": "https://github.com/octocat",
            "websiteUrl": null
        }"#;
        let entity: SponsorEntity = serde_json::from_str(user).unwrap();
        assert!(matches!(entity, SponsorEntity::User(_)));
        assert_eq!(entity.profile().name, None);
    }

    #[test]
    fn test_sponsorship_without_tier_selected_at() {
        let sponsorship = r#"{
            "sponsorEntity": {
                "__typename": "User",
                "name": "Octo Cat",
                "login": "octocat",
                "id": "MDQ6VXNlcjU4MzIzMQ==",
                "avatarUrl_80": "a80",
                "avatarUrl_160": "a160",
                "avatarUrl_240": "a240",
                "avatarUrl_480": "a480",
                "avatarUrl_720": "a720",
                "url": "https://github.com/octocat",
                "websiteUrl": null
            },
            "tier": {"id": "T1"},
            "tierSelectedAt": null
        }"#;
        let sponsorship: Sponsorship = serde_json::from_str(sponsorship).unwrap();
        assert_eq!(sponsorship.tier_selected_at, None);
        assert_eq!(sponsorship.tier.id, "T1");

        let mut value: serde_json::Value =
            serde_json::to_value(&sponsorship).unwrap();
        value.as_object_mut().unwrap().remove("tierSelectedAt");
        let sponsorship: Sponsorship = serde_json::from_value(value).unwrap();
        assert_eq!(sponsorship.tier_selected_at, None);

        let dated = r#"{"sponsorEntity": {"__typename": "User", "name": null, "login": "o", "id": "U",
            "avatarUrl_80": "a", "avatarUrl_160": "a", "avatarUrl_240": "a", "avatarUrl_480": "a",
            "avatarUrl_720": "a", "url": "u", "websiteUrl": null},
            "tier": {"id": "T1"}, "tierSelectedAt": "2021-06-03T16:48:19Z"}"#;
        let sponsorship: Sponsorship = serde_json::from_str(dated).unwrap();
        assert_eq!(
            sponsorship.tier_selected_at.map(|at| at.to_rfc3339()).as_deref(),
            Some("2021-06-03T16:48:19+00:00")
        );
    }

    #[test]
    fn test_user_sponsor_omits_organization_fields() {
        let sponsor = Sponsor {
            profile: SponsorProfile {
                name: Some("Octo Cat".to_string()),
                login: "octocat".to_string(),
                id: "U1".to_string(),
                avatar_url_80: "a80".to_string(),
                avatar_url_160: "a160".to_string(),
                avatar_url_240: "a240".to_string(),
                avatar_url_480: "a480".to_string(),
                avatar_url_720: "a720".to_string(),
                url: "https://github.com/octocat".to_string(),
                website_url: None,
            },
            organization: None,
        };
        let value = serde_json::to_value(&sponsor).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("description"));
        assert!(!object.contains_key("descriptionHTML"));
        assert!(!object.contains_key("__typename"));
        assert_eq!(object["avatarUrl_480"], "a480");
        assert_eq!(object["websiteUrl"], serde_json::Value::Null);

        let org = Sponsor {
            organization: Some(OrganizationDetails::default()),
            ..sponsor
        };
        let value = serde_json::to_value(&org).unwrap();
        assert_eq!(value["description"], serde_json::Value::Null);
        assert_eq!(value["descriptionHTML"], serde_json::Value::Null);
    }
}
