use super::*;
use crate::{
    assets::{color::HexColor, image::ImageRef},
    catalog::template::Template,
    design::{state::ElementId, storage::MemoryStorage},
    foundation::core::{Canvas, Point},
    render::preview::preview,
};

struct FullDisk;

impl SlotStorage for FullDisk {
    fn get(&self, _key: &str) -> PosterResult<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> PosterResult<()> {
        Err(PosterError::storage("quota exceeded"))
    }
}

fn yes() -> impl FnMut(&str) -> bool {
    |_: &str| true
}

fn edited_store() -> DesignStore<MemoryStorage> {
    let mut store = DesignStore::new(MemoryStorage::new());
    store.update(Field::Title, "Summer Fest");
    store.update(Field::Subtitle, "Live on the pier");
    store.update(Field::Color, "#112233");
    store.update(Field::TitleSize, "60");
    store
        .state_mut()
        .positions
        .insert(ElementId::Body, Point::new(12.0, 340.0));
    store
}

#[test]
fn save_then_load_reproduces_state() {
    let mut store = edited_store();
    let before = store.state().clone();
    store.save().unwrap();

    let mut fresh = DesignStore::new(store.into_storage());
    assert_eq!(fresh.load().unwrap(), LoadOutcome::Loaded);
    assert_eq!(fresh.state(), &before);
}

#[test]
fn load_on_empty_slot_is_not_found_and_keeps_state() {
    let mut store = edited_store();
    let before = store.state().clone();
    assert_eq!(store.load().unwrap(), LoadOutcome::NotFound);
    assert_eq!(store.state(), &before);
}

#[test]
fn load_on_corrupt_payload_is_malformed_and_keeps_state() {
    for payload in ["{not json", "[1,2]", "\"just a string\"", "{\"titleSize\": \"huge\"}"] {
        let mut storage = MemoryStorage::new();
        storage.set(config::STORAGE_KEY, payload).unwrap();
        let mut store = DesignStore::new(storage);
        store.update(Field::Title, "keep me");
        let before = store.state().clone();

        let err = store.load().unwrap_err();
        assert!(matches!(err, PosterError::MalformedState(_)), "{payload}");
        assert_eq!(store.state(), &before);
    }
}

#[test]
fn save_failure_is_reported_not_panicked() {
    let mut store = DesignStore::new(FullDisk);
    store.update(Field::Title, "x");
    assert!(matches!(store.save(), Err(PosterError::Storage(_))));
    assert_eq!(store.state().title, "x");
}

#[test]
fn clear_resets_everything_and_leaves_storage() {
    let mut store = edited_store();
    store.state_mut().background = Some(Background::Image(ImageRef::new("a.png")));
    store.save().unwrap();
    let saved = store.storage().get(config::STORAGE_KEY).unwrap();

    let mut asked = Vec::new();
    let mut confirm = |p: &str| {
        asked.push(p.to_owned());
        true
    };
    assert!(store.clear(&mut confirm));
    assert_eq!(asked, [config::CLEAR_PROMPT]);
    assert_eq!(store.state(), &DesignState::default());
    assert_eq!(store.storage().get(config::STORAGE_KEY).unwrap(), saved);
}

#[test]
fn declined_clear_changes_nothing() {
    let mut store = edited_store();
    let before = store.state().clone();
    let mut no = |_: &str| false;
    assert!(!store.clear(&mut no));
    assert_eq!(store.state(), &before);
}

#[test]
fn summer_fest_checkpoint_survives_clear() {
    let mut store = DesignStore::new(MemoryStorage::new());
    store.update(Field::Title, "Summer Fest");
    store.update(Field::Color, "#112233");
    store.update(Field::TitleSize, "60");
    store.save().unwrap();

    assert!(store.clear(&mut yes()));
    assert_eq!(store.load().unwrap(), LoadOutcome::Loaded);

    let s = store.state();
    assert_eq!(s.title, "Summer Fest");
    assert_eq!(s.color.as_str(), "#112233");
    assert_eq!(s.title_size, 60);
    assert_eq!(s.subtitle, "");
    assert_eq!(s.body, "");
    assert_eq!(s.date, "");
}

#[test]
fn unknown_template_is_a_no_op() {
    let mut store = edited_store();
    let before = store.state().clone();
    assert!(!store.apply_template(&TemplateCatalog::fallback(), "nope"));
    assert_eq!(store.state(), &before);
}

#[test]
fn template_overwrites_only_defined_fields() {
    let catalog = TemplateCatalog::new(vec![Template {
        id: "gala".to_owned(),
        name: "Gala".to_owned(),
        color: HexColor::parse("#000000").unwrap(),
        sample: ImageRef::new("assets/gala.jpg"),
        title: Some("Gala Night".to_owned()),
        subtitle: Some(String::new()),
        body: None,
        title_size: Some(72),
    }]);

    let mut store = edited_store();
    assert!(store.apply_template(&catalog, "gala"));
    let s = store.state();
    assert_eq!(s.template, "gala");
    assert_eq!(s.title, "Gala Night");
    assert_eq!(s.subtitle, "Live on the pier");
    assert_eq!(s.color.as_str(), "#000000");
    assert_eq!(s.title_size, 72);
    assert_eq!(
        s.background,
        Some(Background::Image(ImageRef::new("assets/gala.jpg")))
    );
    assert_eq!(s.positions.get(&ElementId::Body), Some(&Point::new(12.0, 340.0)));
}

#[test]
fn fallback_template_keeps_text_and_size() {
    let mut store = edited_store();
    assert!(store.apply_template(&TemplateCatalog::fallback(), "retro"));
    let s = store.state();
    assert_eq!(s.title, "Summer Fest");
    assert_eq!(s.title_size, 60);
    assert_eq!(s.color.as_str(), "#fef08a");
}

#[test]
fn stored_tint_loads_as_no_override() {
    let mut storage = MemoryStorage::new();
    storage
        .set(
            config::STORAGE_KEY,
            r##"{"color":"#ff7a59","bg":"rgba(255, 122, 89, 0.2)"}"##,
        )
        .unwrap();
    let mut store = DesignStore::new(storage);
    assert_eq!(store.load().unwrap(), LoadOutcome::Loaded);
    assert_eq!(store.state().background, None);

    store.update(Field::Color, "#112233");
    let fill = preview(store.state(), Canvas::default()).fill;
    assert_eq!(fill.as_str(), "#11223333");
}

#[test]
fn explicit_color_background_survives_load() {
    let mut storage = MemoryStorage::new();
    storage
        .set(config::STORAGE_KEY, r##"{"color":"#ff7a59","bg":"#0000ff"}"##)
        .unwrap();
    let mut store = DesignStore::new(storage);
    store.load().unwrap();
    assert_eq!(
        store.state().background,
        Some(Background::Color(HexColor::parse("#0000ff").unwrap()))
    );
}
