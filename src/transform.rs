use crate::model::{
    Sponsor, SponsorBuckets, SponsorEntity, SponsorsData, Sponsorship, Tier, TierWithSponsors,
};
use crate::overrides;
use itertools::Itertools;
use tracing::debug;

/// Recurring tiers at or above this monthly price get a logo on the website.
pub const LOGO_SPONSOR_MIN_MONTHLY_DOLLARS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    LogoSponsors,
    Supporters,
}

/// Which bucket a tier belongs to, or `None` when it has no sponsors.
pub fn bucket_for(tier: &TierWithSponsors) -> Option<Bucket> {
    if tier.sponsors.is_empty() {
        return None;
    }
    if !tier.tier.is_one_time
        && tier.tier.monthly_price_in_dollars >= LOGO_SPONSOR_MIN_MONTHLY_DOLLARS
    {
        Some(Bucket::LogoSponsors)
    } else {
        Some(Bucket::Supporters)
    }
}

/// Groups sponsorships under their tiers and splits the tiers into logo
/// sponsors and supporters, each ordered by descending monthly price.
///
/// Tiers with an equal price keep their upstream order.
pub fn sponsor_buckets(data: SponsorsData) -> SponsorBuckets {
    let organization = data.organization;
    let sponsorships = organization.sponsorships_as_maintainer.nodes;

    let mut buckets = SponsorBuckets::default();
    for tier in organization.sponsors_listing.tiers.nodes {
        let tier = attach_sponsors(tier, &sponsorships);
        match bucket_for(&tier) {
            Some(Bucket::LogoSponsors) => buckets.logo_sponsors.push(tier),
            Some(Bucket::Supporters) => buckets.supporters.push(tier),
            None => debug!("Dropping tier {} without sponsors", tier.tier.id),
        }
    }

    buckets.logo_sponsors = sort_by_price(buckets.logo_sponsors);
    buckets.supporters = sort_by_price(buckets.supporters);
    buckets
}

fn attach_sponsors(tier: Tier, sponsorships: &[Sponsorship]) -> TierWithSponsors {
    let sponsors = sponsorships
        .iter()
        .filter(|sponsorship| sponsorship.tier.id == tier.id)
        .map(|sponsorship| merge_sponsor(&sponsorship.sponsor_entity))
        .collect_vec();
    TierWithSponsors { tier, sponsors }
}

fn merge_sponsor(entity: &SponsorEntity) -> Sponsor {
    let (mut profile, organization) = match entity {
        SponsorEntity::Organization(org) => (org.profile.clone(), Some(org.details.clone())),
        SponsorEntity::User(profile) => (profile.clone(), None),
    };
    overrides::apply(&mut profile);
    Sponsor {
        profile,
        organization,
    }
}

// sorted_by is stable
fn sort_by_price(tiers: Vec<TierWithSponsors>) -> Vec<TierWithSponsors> {
    tiers
        .into_iter()
        .sorted_by(|a, b| {
            b.tier
                .monthly_price_in_dollars
                .cmp(&a.tier.monthly_price_in_dollars)
        })
        .collect_vec()
}
