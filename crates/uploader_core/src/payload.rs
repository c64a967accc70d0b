use serde::Serialize;

use crate::claim::NormalizedClaim;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeePayload {
    pub currency: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Parameters of the daemon `publish` call. Unset optional fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishPayload {
    pub name: String,
    pub file_path: String,
    pub bid: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub license: String,
    pub nsfw: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<FeePayload>,
}

impl From<&NormalizedClaim> for PublishPayload {
    fn from(claim: &NormalizedClaim) -> Self {
        Self {
            name: claim.name.clone(),
            file_path: claim.file_path.clone(),
            bid: claim.bid.clone(),
            title: claim.title.clone(),
            description: claim.description.clone(),
            author: claim.author.clone(),
            language: claim.language.clone(),
            license: claim.license.clone(),
            nsfw: claim.nsfw,
            thumbnail: claim.thumbnail.clone(),
            preview: claim.preview.clone(),
            license_url: claim.license_url.clone(),
            channel_name: claim.channel_name.clone(),
            channel_id: claim.channel_id.clone(),
            claim_address: claim.claim_address.clone(),
            fee: claim.fee.as_ref().map(|fee| FeePayload {
                currency: fee.currency.clone(),
                amount: fee.amount.clone(),
                address: fee.address.clone(),
            }),
        }
    }
}
