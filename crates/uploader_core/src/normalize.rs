use std::path::Path;

use thiserror::Error;

use crate::claim::{ConfigDefaults, Fee, NormalizedClaim, RawClaim, REQUIRED_FIELDS};
use crate::slug::slugify;

/// Why a raw claim could not become a [`NormalizedClaim`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("required field '{0}' not found and no default value was provided")]
    MissingRequiredField(&'static str),
    #[error("could not parse field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Validate a raw claim and fill its gaps from the configured defaults.
///
/// An explicit claim value always wins over a default. Pure and deterministic.
pub fn normalize(
    raw: &RawClaim,
    defaults: &ConfigDefaults,
) -> Result<NormalizedClaim, RejectionReason> {
    let resolve = |field: &str| {
        raw.get(field)
            .or_else(|| defaults.get(field))
            .map(ToOwned::to_owned)
    };

    for field in REQUIRED_FIELDS {
        if resolve(field).is_none() {
            return Err(RejectionReason::MissingRequiredField(field));
        }
    }
    let required =
        |field: &'static str| resolve(field).ok_or(RejectionReason::MissingRequiredField(field));

    let file_path = required("file_path")?;
    let nsfw = parse_nsfw(&required("nsfw")?)?;
    let fee = build_fee(
        resolve("fee_amount"),
        resolve("fee_currency"),
        resolve("fee_address"),
    )?;

    let stem = file_stem(&file_path);
    let name = raw
        .get("name")
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| slugify(&stem));
    let title = raw
        .get("title")
        .map(ToOwned::to_owned)
        .unwrap_or(stem);

    Ok(NormalizedClaim {
        name,
        title,
        file_path,
        bid: required("bid")?,
        description: required("description")?,
        author: required("author")?,
        language: required("language")?,
        license: required("license")?,
        nsfw,
        fee,
        channel_name: resolve("channel_name"),
        channel_id: raw.get("channel_id").map(ToOwned::to_owned),
        claim_address: resolve("claim_address"),
        license_url: raw.get("license_url").map(ToOwned::to_owned),
        preview: resolve("preview"),
        thumbnail: resolve("thumbnail"),
    })
}

fn parse_nsfw(value: &str) -> Result<bool, RejectionReason> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(RejectionReason::InvalidField {
            field: "nsfw",
            reason: format!("expected 'true' or 'false', got '{value}'"),
        })
    }
}

fn build_fee(
    amount: Option<String>,
    currency: Option<String>,
    address: Option<String>,
) -> Result<Option<Fee>, RejectionReason> {
    match (amount, currency) {
        (Some(amount), Some(currency)) => Ok(Some(Fee {
            currency,
            amount,
            address,
        })),
        (None, None) => Ok(None),
        (Some(_), None) => Err(RejectionReason::InvalidField {
            field: "fee_currency",
            reason: "fee amount given without a currency".to_string(),
        }),
        (None, Some(_)) => Err(RejectionReason::InvalidField {
            field: "fee_amount",
            reason: "fee currency given without an amount".to_string(),
        }),
    }
}

/// Base file name without its extension; falls back to the whole path.
fn file_stem(file_path: &str) -> String {
    Path::new(file_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| file_path.to_string())
}

#[cfg(test)]
mod tests {
    use super::{build_fee, file_stem, parse_nsfw};

    #[test]
    fn nsfw_accepts_any_case() {
        assert_eq!(parse_nsfw("TRUE"), Ok(true));
        assert_eq!(parse_nsfw("False"), Ok(false));
        assert!(parse_nsfw("yes").is_err());
        assert!(parse_nsfw("1").is_err());
    }

    #[test]
    fn stem_strips_directory_and_extension() {
        assert_eq!(file_stem("/videos/My Holiday.mp4"), "My Holiday");
        assert_eq!(file_stem("clip"), "clip");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn half_a_fee_is_rejected() {
        assert!(build_fee(Some("1".into()), None, None).is_err());
        assert!(build_fee(None, Some("LBC".into()), None).is_err());
        assert_eq!(build_fee(None, None, Some("addr".into())), Ok(None));
    }
}
