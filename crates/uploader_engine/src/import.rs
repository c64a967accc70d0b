use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use uploader_core::RawClaim;
use uploader_logging::upload_warn;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("malformed csv in {path:?}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("malformed json in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path:?}: {message}")]
    Shape { path: PathBuf, message: String },
}

/// Read every claim record from a `.csv` or `.json` file, in file order.
///
/// Files with any other extension yield no records.
pub fn import_claims(path: &Path) -> Result<Vec<RawClaim>, ImportError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => import_csv(path),
        Some("json") => import_json(path),
        _ => {
            upload_warn!("No importer for {:?}; treating it as empty.", path);
            Ok(Vec::new())
        }
    }
}

fn import_csv(path: &Path) -> Result<Vec<RawClaim>, ImportError> {
    let csv_error = |source| ImportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(csv_error)?;
    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut claims = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        claims.push(
            headers
                .iter()
                .zip(record.iter())
                .filter(|(_, value)| !value.is_empty())
                .collect::<RawClaim>(),
        );
    }
    Ok(claims)
}

fn import_json(path: &Path) -> Result<Vec<RawClaim>, ImportError> {
    let text = fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&text).map_err(|source| ImportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(records) = document else {
        return Err(ImportError::Shape {
            path: path.to_path_buf(),
            message: "expected a top-level array of claim objects".to_string(),
        });
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match record {
            Value::Object(fields) => Ok(fields
                .into_iter()
                .filter_map(|(field, value)| json_field_value(value).map(|v| (field, v)))
                .collect::<RawClaim>()),
            _ => Err(ImportError::Shape {
                path: path.to_path_buf(),
                message: format!("record {index} is not an object"),
            }),
        })
        .collect()
}

fn json_field_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}
