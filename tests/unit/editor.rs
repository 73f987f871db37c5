use std::{io::Cursor, time::Duration};

use super::*;
use crate::design::storage::MemoryStorage;

struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    fn rasterize(&self, _preview: &Preview, _scale: f32) -> PosterResult<Vec<u8>> {
        Err(PosterError::export("gpu on fire"))
    }
}

struct StubRasterizer;

impl Rasterizer for StubRasterizer {
    fn rasterize(&self, preview: &Preview, scale: f32) -> PosterResult<Vec<u8>> {
        Ok(format!("{}@{scale}", preview.canvas).into_bytes())
    }
}

fn editor() -> Editor<MemoryStorage> {
    Editor::new(
        TemplateCatalog::fallback(),
        MemoryStorage::new(),
        Canvas::default(),
    )
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 128, 255, 255]));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

#[test]
fn new_session_shows_placeholders_at_default_layout() {
    let ed = editor();
    let title = ed.surface().element(ElementId::Title).unwrap();
    assert_eq!(title.text, config::TITLE_PLACEHOLDER);
    assert_eq!(title.position, Point::new(64.0, 300.0));
    assert_eq!(ed.status(), StatusMessage::Ready);
}

#[test]
fn input_updates_state_and_overlay_text() {
    let mut ed = editor();
    assert!(ed.input(Field::Title, "Summer Fest"));
    assert_eq!(ed.state().title, "Summer Fest");
    assert_eq!(
        ed.surface().element(ElementId::Title).unwrap().text,
        "Summer Fest"
    );

    ed.input(Field::Date, "Aug 3");
    assert_eq!(
        ed.surface().element(ElementId::Date).unwrap().text,
        "Date: Aug 3"
    );
}

#[test]
fn drag_writes_position_into_state() {
    let mut ed = editor();
    let p = PointerId(1);

    let ev = ed.pointer_down(p, Point::new(70.0, 310.0));
    assert!(matches!(ev, DragEvent::Started(s) if s.element == ElementId::Title));

    ed.pointer_move(p, Point::new(100.0, 330.0));
    assert_eq!(
        ed.state().positions.get(&ElementId::Title),
        Some(&Point::new(94.0, 320.0))
    );

    let ev = ed.pointer_up(p);
    assert_eq!(
        ev,
        DragEvent::Released {
            id: ElementId::Title,
            position: Point::new(94.0, 320.0)
        }
    );
    assert_eq!(
        ed.preview().block(ElementId::Title).unwrap().position,
        Point::new(94.0, 320.0)
    );
}

#[test]
fn pointer_down_on_empty_space_is_ignored() {
    let mut ed = editor();
    assert_eq!(
        ed.pointer_down(PointerId(1), Point::new(790.0, 5.0)),
        DragEvent::Ignored
    );
    assert!(ed.state().positions.is_empty());
}

#[test]
fn inline_edit_flows_back_into_the_field() {
    let mut ed = editor();
    assert_eq!(
        ed.double_activate(ElementId::Subtitle),
        DragEvent::EditStarted(ElementId::Subtitle)
    );
    ed.edit_text(ElementId::Subtitle, "Live on the pier");
    // Form input while editing does not clobber the in-progress text.
    ed.input(Field::Body, "Bring friends");

    let ev = ed.blur(ElementId::Subtitle);
    assert!(matches!(ev, DragEvent::EditEnded { id: ElementId::Subtitle, .. }));
    assert_eq!(ed.state().subtitle, "Live on the pier");
    assert_eq!(ed.state().body, "Bring friends");
}

#[test]
fn inline_edit_of_placeholder_or_date_maps_back_to_raw_value() {
    let mut ed = editor();
    ed.double_activate(ElementId::Title);
    ed.blur(ElementId::Title);
    assert_eq!(ed.state().title, "");

    ed.input(Field::Date, "Aug 3");
    ed.double_activate(ElementId::Date);
    ed.edit_text(ElementId::Date, "Date: Aug 4");
    ed.blur(ElementId::Date);
    assert_eq!(ed.state().date, "Aug 4");
}

#[test]
fn drag_and_edit_exclude_each_other() {
    let mut ed = editor();
    ed.pointer_down_on(PointerId(1), ElementId::Body, Point::new(70.0, 590.0));
    assert_eq!(ed.double_activate(ElementId::Body), DragEvent::Rejected);
    ed.pointer_cancel(PointerId(1));

    ed.double_activate(ElementId::Body);
    assert_eq!(
        ed.pointer_down_on(PointerId(2), ElementId::Body, Point::new(70.0, 590.0)),
        DragEvent::Rejected
    );
}

#[test]
fn save_and_load_restore_layout() {
    let mut ed = editor();
    ed.input(Field::Title, "Summer Fest");
    ed.pointer_down_on(PointerId(1), ElementId::Date, Point::new(0.0, 0.0));
    ed.pointer_move(PointerId(1), Point::new(10.0, -20.0));
    ed.pointer_up(PointerId(1));
    assert!(ed.save());
    assert_eq!(ed.status(), StatusMessage::Saved);

    let storage = ed.store.into_storage();
    let mut fresh = Editor::new(TemplateCatalog::fallback(), storage, Canvas::default());
    assert_eq!(fresh.load().unwrap(), LoadOutcome::Loaded);
    assert_eq!(fresh.status(), StatusMessage::Loaded);
    assert_eq!(fresh.state().title, "Summer Fest");
    assert_eq!(
        fresh.surface().element(ElementId::Date).unwrap().position,
        Point::new(74.0, 840.0)
    );
}

#[test]
fn load_outcomes_become_status_messages() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut ed = editor();
    assert_eq!(ed.load().unwrap(), LoadOutcome::NotFound);
    assert_eq!(ed.status(), StatusMessage::NoSavedDesign);

    let mut storage = MemoryStorage::new();
    storage.set(config::STORAGE_KEY, "{oops").unwrap();
    let mut ed = Editor::new(TemplateCatalog::fallback(), storage, Canvas::default());
    ed.input(Field::Title, "Keep me");
    assert!(matches!(ed.load(), Err(PosterError::MalformedState(_))));
    assert_eq!(ed.status(), StatusMessage::MalformedSave);
    assert_eq!(ed.state().title, "Keep me");
}

#[test]
fn clear_resets_layout_only_when_confirmed() {
    let mut ed = editor();
    ed.input(Field::Title, "Summer Fest");
    ed.pointer_down_on(PointerId(1), ElementId::Title, Point::new(0.0, 0.0));
    ed.pointer_move(PointerId(1), Point::new(5.0, 5.0));

    assert!(!ed.clear(&mut |_: &str| false));
    assert_eq!(ed.state().title, "Summer Fest");

    assert!(ed.clear(&mut |_: &str| true));
    assert_eq!(ed.state(), &DesignState::default());
    assert_eq!(ed.surface().active_sessions(), 0);
    assert_eq!(
        ed.surface().element(ElementId::Title).unwrap().position,
        Point::new(64.0, 300.0)
    );
}

#[test]
fn selecting_a_template_updates_overlay_and_background() {
    let mut ed = editor();
    assert!(ed.select_template("bold"));
    assert_eq!(ed.state().template, "bold");
    assert_eq!(ed.state().color.as_str(), "#7dd3fc");
    assert_eq!(
        ed.preview().image.map(|i| i.as_str().to_owned()),
        Some("assets/sample2.jpg".to_owned())
    );
    assert!(!ed.select_template("missing"));
}

#[test]
fn upload_background_accepts_images_and_rejects_garbage() {
    let mut ed = editor();
    assert!(ed.upload_background(&png_bytes()));
    let bg = ed.state().background.clone().unwrap();
    assert!(bg.image().unwrap().is_data_url());

    assert!(!ed.upload_background(b"definitely not an image"));
    assert_eq!(ed.status(), StatusMessage::BackgroundRejected);
    assert_eq!(ed.state().background, Some(bg));
}

#[test]
fn canvas_change_moves_only_undragged_elements() {
    let mut ed = editor();
    ed.pointer_down_on(PointerId(1), ElementId::Title, Point::new(0.0, 0.0));
    ed.pointer_move(PointerId(1), Point::new(1.0, 1.0));
    ed.pointer_up(PointerId(1));

    ed.set_canvas(Canvas::new(400, 500).unwrap());
    assert_eq!(ed.canvas(), Canvas::new(400, 500).unwrap());
    assert_eq!(
        ed.surface().element(ElementId::Title).unwrap().position,
        Point::new(65.0, 301.0)
    );
    assert_eq!(
        ed.surface().element(ElementId::Body).unwrap().position,
        Point::new(32.0, 290.0)
    );
}

#[test]
fn export_reports_progress_and_outcome() {
    let mut ed = editor();
    let png = ed.export(&StubRasterizer, 2.0).unwrap();
    assert_eq!(png, b"800x1000@2".to_vec());
    assert_eq!(ed.status(), StatusMessage::Exported);

    assert!(ed.export(&FailingRasterizer, 2.0).is_none());
    assert_eq!(ed.status(), StatusMessage::ExportFailed);
}

#[test]
fn outcome_messages_revert_to_ready() {
    let mut ed = editor();
    ed.save();
    let later = Instant::now() + Duration::from_millis(1500);
    assert_eq!(ed.status_at(later), StatusMessage::Ready);
}

#[test]
fn template_input_only_accepts_known_ids() {
    let mut ed = editor();
    assert!(!ed.input(Field::Template, "no-such-template"));
    assert_eq!(ed.state().template, "");

    assert!(ed.input(Field::Template, "retro"));
    assert_eq!(ed.state().template, "retro");
    assert_eq!(ed.state().color.as_str(), "#fef08a");

    assert!(!ed.input(Field::Template, "no-such-template"));
    assert_eq!(ed.state().template, "retro");

    assert!(ed.input(Field::Template, ""));
    assert_eq!(ed.state().template, "");
}

struct UnreadableStorage;

impl SlotStorage for UnreadableStorage {
    fn get(&self, _key: &str) -> PosterResult<Option<String>> {
        Err(PosterError::storage("disk unplugged"))
    }

    fn set(&mut self, _key: &str, _value: &str) -> PosterResult<()> {
        Ok(())
    }
}

#[test]
fn storage_read_failure_is_not_reported_as_malformed() {
    let mut ed = Editor::new(
        TemplateCatalog::fallback(),
        UnreadableStorage,
        Canvas::default(),
    );
    ed.input(Field::Title, "Keep me");
    assert!(matches!(ed.load(), Err(PosterError::Storage(_))));
    assert_eq!(ed.status(), StatusMessage::LoadFailed);
    assert_eq!(ed.state().title, "Keep me");
}

#[test]
fn empty_date_cannot_be_grabbed() {
    let mut ed = editor();
    let date_at = ed.surface().element(ElementId::Date).unwrap().position;
    assert_eq!(ed.surface().element(ElementId::Date).unwrap().text, "");
    assert_eq!(
        ed.pointer_down(PointerId(1), Point::new(date_at.x + 4.0, date_at.y + 4.0)),
        DragEvent::Ignored
    );

    ed.input(Field::Date, "Aug 3");
    assert!(matches!(
        ed.pointer_down(PointerId(1), Point::new(date_at.x + 4.0, date_at.y + 4.0)),
        DragEvent::Started(s) if s.element == ElementId::Date
    ));
}
