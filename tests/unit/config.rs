use super::*;
use serde_json::json;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_config")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = scratch("create");
    let path = dir.join("config.json");
    let cfg = Config::load_or_create(&path).unwrap();
    assert!(path.is_file());
    assert_eq!(cfg.base_dir(), dir.as_path());
    assert_eq!(cfg.audio_dir(), dir.join("audio"));
    assert_eq!(cfg.image_path("song"), dir.join("images").join("song.jpg"));
    assert_eq!(cfg.video_path("song"), dir.join("video").join("song.mp4"));

    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(written["watermarkFontSize"], json!(190.0));
    assert_eq!(written["watermarkX"], json!("w/2"));
    assert_eq!(written["watermarkY"], json!("(h-th)/2"));
    assert_eq!(written["fillStyle"], json!("#ffffff"));
    assert_eq!(written["wrapUnit"], json!("grapheme"));
    assert_eq!(written["encode"]["preset"], json!("veryslow"));
    assert!(written.get("baseDir").is_none());

    let again = Config::load_or_create(&path).unwrap();
    assert_eq!(again, cfg);
}

#[test]
fn partial_file_keeps_defaults_and_ignores_unknown_keys() {
    let dir = scratch("partial");
    let path = dir.join("settings.json");
    std::fs::write(
        &path,
        json!({
            "audioDir": "in",
            "watermarkFontSize": 48,
            "watermarkX": 100,
            "fillStyle": "#ff000080",
            "wrapUnit": "char",
            "someFutureKey": true
        })
        .to_string(),
    )
    .unwrap();

    let cfg = Config::from_path(&path).unwrap();
    assert_eq!(cfg.audio_dir(), dir.join("in"));
    assert_eq!(cfg.video_dir(), dir.join("video"));
    let style = cfg.watermark_style();
    assert_eq!(style.font_size, 48.0);
    assert_eq!(style.x, PositionExpr::fixed(100.0));
    assert_eq!(style.unit, WrapUnit::Char);
    assert_eq!(style.fill.to_rgba8(), [255, 0, 0, 128]);
    assert_eq!(style.font_path, dir.join("font.ttf"));
}

#[test]
fn invalid_values_are_config_errors() {
    let dir = scratch("invalid");
    let path = dir.join("config.json");
    for bad in [
        json!({ "watermarkFontSize": 0 }),
        json!({ "watermarkLineHeight": -1 }),
        json!({ "watermarkMaxWidth": -5 }),
        json!({ "imageExtension": "nope" }),
        json!({ "encode": { "frameRate": 0 } }),
    ] {
        std::fs::write(&path, bad.to_string()).unwrap();
        let err = Config::from_path(&path).unwrap_err();
        assert!(matches!(err, StillframeError::Config(_)), "{bad}: {err}");
    }

    std::fs::write(&path, r#"{ "watermarkY": "h +" }"#).unwrap();
    assert!(Config::from_path(&path).is_err());
    std::fs::write(&path, "not json").unwrap();
    assert!(Config::from_path(&path).is_err());
}

#[test]
fn ffmpeg_bare_name_stays_on_path() {
    let mut cfg = Config::default();
    assert_eq!(cfg.ffmpeg_program(), PathBuf::from("ffmpeg"));

    cfg.ffmpeg_path = PathBuf::from("bin/ffmpeg");
    assert_eq!(cfg.ffmpeg_program(), PathBuf::from("./bin/ffmpeg"));
    assert_eq!(cfg.encoder().program(), Path::new("./bin/ffmpeg"));
}

#[test]
fn absolute_paths_are_not_rebased() {
    let cfg = Config::default();
    let abs = std::env::temp_dir().join("bg.png");
    assert_eq!(cfg.resolve(&abs), abs);
}
