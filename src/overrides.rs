use crate::model::SponsorProfile;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const WHIMSER_LOGO: &str = "/assets/images/sponsors/whimser.png";

/// Replacement avatars for sponsors whose upstream images render badly on the
/// website. Only the sizes set to `Some` replace the upstream value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SponsorOverride {
    pub avatar_url_80: Option<&'static str>,
    pub avatar_url_160: Option<&'static str>,
    pub avatar_url_240: Option<&'static str>,
    pub avatar_url_480: Option<&'static str>,
    pub avatar_url_720: Option<&'static str>,
}

impl SponsorOverride {
    /// Uses the same image for every avatar size.
    pub const fn avatar(url: &'static str) -> Self {
        SponsorOverride {
            avatar_url_80: Some(url),
            avatar_url_160: Some(url),
            avatar_url_240: Some(url),
            avatar_url_480: Some(url),
            avatar_url_720: Some(url),
        }
    }

    pub fn apply(&self, profile: &mut SponsorProfile) {
        let avatars = [
            (self.avatar_url_80, &mut profile.avatar_url_80),
            (self.avatar_url_160, &mut profile.avatar_url_160),
            (self.avatar_url_240, &mut profile.avatar_url_240),
            (self.avatar_url_480, &mut profile.avatar_url_480),
            (self.avatar_url_720, &mut profile.avatar_url_720),
        ];
        for (replacement, field) in avatars {
            if let Some(url) = replacement {
                *field = url.to_owned();
            }
        }
    }
}

// keyed by GitHub node id
static SPONSOR_OVERRIDES: Lazy<HashMap<&'static str, SponsorOverride>> = Lazy::new(|| {
    HashMap::from([(
        "MDEyOk9yZ2FuaXphdGlvbjcxNDc2MTY2",
        SponsorOverride::avatar(WHIMSER_LOGO),
    )])
});

fn lookup(sponsor_id: &str) -> Option<&'static SponsorOverride> {
    SPONSOR_OVERRIDES.get(sponsor_id)
}

/// Applies the override registered for the profile's id, if any.
pub fn apply(profile: &mut SponsorProfile) {
    if let Some(sponsor_override) = lookup(&profile.id) {
        tracing::debug!("Applying override for sponsor {}", profile.login);
        sponsor_override.apply(profile);
    }
}
