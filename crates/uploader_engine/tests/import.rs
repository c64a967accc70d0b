use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use uploader_core::RawClaim;
use uploader_engine::{import_claims, ImportError};

#[test]
fn csv_rows_become_claims_in_order() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("claims.csv");
    fs::write(
        &path,
        "file_path,bid,description,nsfw\n\
         /a.mp4,0.1,\"First, with comma\",false\n\
         /b.mp4,,Second,true\n",
    )
    .unwrap();

    let claims = import_claims(&path).unwrap();
    assert_eq!(
        claims,
        vec![
            RawClaim::new()
                .with("file_path", "/a.mp4")
                .with("bid", "0.1")
                .with("description", "First, with comma")
                .with("nsfw", "false"),
            RawClaim::new()
                .with("file_path", "/b.mp4")
                .with("description", "Second")
                .with("nsfw", "true"),
        ]
    );
    assert_eq!(claims[1].get("bid"), None);
}

#[test]
fn json_values_are_stringified() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("claims.json");
    fs::write(
        &path,
        r#"[{"file_path": "/a.mp4", "bid": 0.25, "nsfw": true, "thumbnail": null}]"#,
    )
    .unwrap();

    let claims = import_claims(&path).unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].get("bid"), Some("0.25"));
    assert_eq!(claims[0].get("nsfw"), Some("true"));
    assert_eq!(claims[0].get("thumbnail"), None);
}

#[test]
fn unknown_extension_yields_no_claims() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("claims.xls");
    fs::write(&path, "whatever").unwrap();

    assert!(import_claims(&path).unwrap().is_empty());
}

#[test]
fn json_must_be_an_array_of_objects() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("claims.json");

    fs::write(&path, r#"{"file_path": "/a.mp4"}"#).unwrap();
    assert!(matches!(
        import_claims(&path).unwrap_err(),
        ImportError::Shape { .. }
    ));

    fs::write(&path, r#"[{"file_path": "/a.mp4"}, 3]"#).unwrap();
    assert!(matches!(
        import_claims(&path).unwrap_err(),
        ImportError::Shape { .. }
    ));

    fs::write(&path, "[{").unwrap();
    assert!(matches!(
        import_claims(&path).unwrap_err(),
        ImportError::Json { .. }
    ));
}

#[test]
fn missing_csv_is_an_error() {
    let temp = TempDir::new().unwrap();
    let err = import_claims(&temp.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, ImportError::Csv { .. }));
}
