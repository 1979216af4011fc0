use super::*;

fn style() -> WatermarkStyle {
    WatermarkStyle {
        font_path: PathBuf::from("font.ttf"),
        font_size: 10.0,
        line_height: Some(20.0),
        x: PositionExpr::parse("w/2").unwrap(),
        y: PositionExpr::parse("(h-th)/2").unwrap(),
        max_width: Some(25.0),
        unit: WrapUnit::Char,
        fill: FillColor::white(),
    }
}

fn ten_per_char(s: &str) -> f32 {
    s.chars().count() as f32 * 10.0
}

#[test]
fn default_line_height_is_1_2_font_size() {
    let mut s = style();
    s.line_height = None;
    s.font_size = 190.0;
    assert!((s.line_height() - 228.0).abs() < 1e-3);
}

#[test]
fn block_is_centered_on_canvas() {
    let mut m = ten_per_char;
    let layout = layout_watermark("ABCDE", &style(), &mut m, 100, 200).unwrap();
    assert_eq!(layout.lines.len(), 3);
    assert_eq!(layout.x, 50.0);
    assert_eq!(layout.tops, vec![70.0, 90.0, 110.0]);
    assert_eq!(layout.line_left(0), 40.0);
    assert_eq!(layout.line_left(2), 45.0);
}

#[test]
fn max_width_defaults_to_canvas_width() {
    let mut s = style();
    s.max_width = None;
    let mut m = ten_per_char;
    let layout = layout_watermark("ABCDE", &s, &mut m, 31, 100).unwrap();
    let texts: Vec<_> = layout.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["ABC", "DE"]);
}

#[test]
fn fixed_positions_and_expression_variables() {
    let mut s = style();
    s.x = PositionExpr::fixed(12.0);
    s.y = PositionExpr::parse("h - th - lh * 0 + n - fs - tw").unwrap();
    let mut m = ten_per_char;
    let layout = layout_watermark("AB", &s, &mut m, 100, 200).unwrap();
    assert_eq!(layout.x, 12.0);
    // h=200, th=20, n=1, fs=10, tw=20
    assert_eq!(layout.tops, vec![151.0]);
}

#[test]
fn empty_text_is_rejected() {
    let mut m = ten_per_char;
    let err = layout_watermark("", &style(), &mut m, 100, 100).unwrap_err();
    assert!(matches!(err, StillframeError::Validation(_)));
}

#[test]
fn bad_expression_variables_surface_as_config_errors() {
    let mut s = style();
    s.x = PositionExpr::parse("nope").unwrap();
    let mut m = ten_per_char;
    let err = layout_watermark("A", &s, &mut m, 100, 100).unwrap_err();
    assert!(matches!(err, StillframeError::Config(_)));
    assert!(err.to_string().contains("watermarkX"));
}

#[test]
fn canvas_size_rejects_zero_and_oversized() {
    assert!(canvas_size(0, 10).is_err());
    assert!(canvas_size(70_000, 10).is_err());
    assert_eq!(canvas_size(640, 480).unwrap(), (640, 480));
}
