use super::*;

#[test]
fn default_positions_stack_top_to_bottom() {
    let canvas = Canvas::default();
    let ys: Vec<f64> = ElementId::ALL
        .iter()
        .map(|e| default_position(*e, canvas).y)
        .collect();
    assert!(ys.windows(2).all(|w| w[0] < w[1]), "{ys:?}");
    assert_eq!(default_position(ElementId::Title, canvas), Point::new(64.0, 300.0));
}

#[test]
fn default_positions_scale_with_canvas() {
    let small = Canvas::new(400, 500).unwrap();
    assert_eq!(default_position(ElementId::Date, small), Point::new(32.0, 430.0));
}

#[test]
fn text_box_grows_with_lines_and_length() {
    let one = text_box(Point::new(10.0, 20.0), "abcd", 10.0);
    assert_eq!(one.x0, 10.0);
    assert_eq!(one.y0, 20.0);
    assert!((one.width() - 22.0).abs() < 1e-9);
    assert!((one.height() - 12.0).abs() < 1e-9);

    let two = text_box(Point::ZERO, "ab\nabcdef", 10.0);
    assert!((two.width() - 33.0).abs() < 1e-9);
    assert!((two.height() - 24.0).abs() < 1e-9);
}

#[test]
fn empty_text_still_has_a_box() {
    let r = text_box(Point::ZERO, "", 20.0);
    assert!(r.width() > 0.0);
    assert!(r.height() > 0.0);
}
