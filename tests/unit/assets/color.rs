use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    let c: FillColor = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, FillColor::rgba(1.0, 0.0, 0.0, 1.0));

    let c: FillColor = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);

    let c: FillColor = serde_json::from_value(json!("#FFF")).unwrap();
    assert_eq!(c, FillColor::white());
}

#[test]
fn parses_names_objects_and_arrays() {
    let c: FillColor = serde_json::from_value(json!("Black")).unwrap();
    assert_eq!(c.to_rgba8(), [0, 0, 0, 255]);

    let c: FillColor = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, FillColor::rgba(0.25, 0.5, 0.75, 1.0));

    let c: FillColor = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, FillColor::rgba(0.25, 0.5, 0.75, 0.9));
}

#[test]
fn parses_hsla_object() {
    let c: FillColor = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    assert_eq!(c.to_rgba8(), [255, 0, 0, 255]);
}

#[test]
fn rejects_garbage() {
    assert!(serde_json::from_value::<FillColor>(json!("#12345")).is_err());
    assert!(serde_json::from_value::<FillColor>(json!("#gg0000")).is_err());
    assert!(serde_json::from_value::<FillColor>(json!("chartreuse-ish")).is_err());
    assert!(serde_json::from_value::<FillColor>(json!([1.0, 0.0])).is_err());
}

#[test]
fn serializes_as_short_hex() {
    assert_eq!(
        serde_json::to_value(FillColor::white()).unwrap(),
        json!("#ffffff")
    );
    assert_eq!(
        FillColor::rgba(0.0, 0.0, 0.0, 128.0 / 255.0).to_hex(),
        "#00000080"
    );
}
