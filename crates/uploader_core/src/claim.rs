use std::collections::BTreeMap;

/// Fields every claim must carry, either explicitly or through a default.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "file_path",
    "bid",
    "description",
    "author",
    "language",
    "license",
    "nsfw",
];

/// One record as produced by a claim source: field name to raw string value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawClaim {
    fields: BTreeMap<String, String>,
}

impl RawClaim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Present-with-value lookup. Blank values count as absent; others are returned verbatim.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawClaim
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Per-field default values loaded once from a configuration profile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigDefaults {
    values: BTreeMap<String, String>,
}

impl ConfigDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// A default that is blank or the literal `null` is treated as unset.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .get(field)
            .map(String::as_str)
            .filter(|value| {
                let trimmed = value.trim();
                !trimmed.is_empty() && trimmed != "null"
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ConfigDefaults
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fee {
    pub currency: String,
    pub amount: String,
    /// Only set when the claim (or its profile) names an address explicitly.
    pub address: Option<String>,
}

/// A validated claim, ready to fingerprint and publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedClaim {
    pub name: String,
    pub title: String,
    pub file_path: String,
    pub bid: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub license: String,
    pub nsfw: bool,
    pub fee: Option<Fee>,
    pub channel_name: Option<String>,
    pub channel_id: Option<String>,
    pub claim_address: Option<String>,
    pub license_url: Option<String>,
    pub preview: Option<String>,
    pub thumbnail: Option<String>,
}

impl NormalizedClaim {
    /// Field name to value for every field that is set, in sorted order.
    pub fn publish_fields(&self) -> BTreeMap<&'static str, String> {
        let mut fields = BTreeMap::new();
        fields.insert("name", self.name.clone());
        fields.insert("title", self.title.clone());
        fields.insert("file_path", self.file_path.clone());
        fields.insert("bid", self.bid.clone());
        fields.insert("description", self.description.clone());
        fields.insert("author", self.author.clone());
        fields.insert("language", self.language.clone());
        fields.insert("license", self.license.clone());
        fields.insert("nsfw", self.nsfw.to_string());

        if let Some(fee) = &self.fee {
            fields.insert("fee_currency", fee.currency.clone());
            fields.insert("fee_amount", fee.amount.clone());
            if let Some(address) = &fee.address {
                fields.insert("fee_address", address.clone());
            }
        }

        let optional = [
            ("channel_name", &self.channel_name),
            ("channel_id", &self.channel_id),
            ("claim_address", &self.claim_address),
            ("license_url", &self.license_url),
            ("preview", &self.preview),
            ("thumbnail", &self.thumbnail),
        ];
        for (field, value) in optional {
            if let Some(value) = value {
                fields.insert(field, value.clone());
            }
        }
        fields
    }
}
