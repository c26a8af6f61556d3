use crate::model::SponsorsData;

const FIXTURE: &str = include_str!("../data/mocks/sponsors.json");

/// Static sponsors data served when GitHub cannot be reached.
///
/// The fixture ships inside the binary, so the only way this fails is a
/// fixture that no longer matches [`SponsorsData`].
pub fn sponsors() -> Result<SponsorsData, serde_json::Error> {
    serde_json::from_str(FIXTURE)
}
