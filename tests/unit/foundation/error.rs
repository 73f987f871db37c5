use std::path::Path;

use super::*;
use crate::{
    assets::image::load_image_ref,
    config,
    design::{
        storage::{MemoryStorage, SlotStorage as _},
        store::DesignStore,
    },
};

#[test]
fn missing_image_file_keeps_the_io_cause() {
    let path = Path::new("target/postercraft-tests/no-such-background.png");
    let err = load_image_ref(path).unwrap_err();

    let PosterError::Other(inner) = &err else {
        panic!("expected Other, got {err:?}");
    };
    assert!(err.to_string().contains("read image"));
    assert!(err.to_string().contains("no-such-background.png"));
    let io = inner
        .chain()
        .find_map(|e| e.downcast_ref::<std::io::Error>())
        .expect("io cause in chain");
    assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn undecodable_image_bytes_are_a_validation_error() {
    let err = crate::assets::image::image_ref_from_bytes(b"not an image").unwrap_err();
    assert!(matches!(err, PosterError::Validation(_)));
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn broken_saved_record_is_malformed_state() {
    let mut storage = MemoryStorage::new();
    storage.set(config::STORAGE_KEY, "{\"title\": 12").unwrap();
    let mut store = DesignStore::new(storage);

    let err = store.load().unwrap_err();
    assert!(matches!(err, PosterError::MalformedState(_)));
    assert!(err.to_string().starts_with("malformed design state:"));
}

#[test]
fn storage_and_export_failures_name_their_stage() {
    assert_eq!(
        PosterError::storage("slot locked").to_string(),
        "storage error: slot locked"
    );
    assert_eq!(
        PosterError::export("surface too large").to_string(),
        "export failure: surface too large"
    );
    assert_eq!(
        PosterError::fetch("templates.json missing").to_string(),
        "template fetch failure: templates.json missing"
    );
}
