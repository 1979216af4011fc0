use super::*;
use serde_json::json;

#[test]
fn defaults_match_still_image_settings() {
    let p = EncodeProfile::default();
    assert_eq!(p.crf, 24);
    assert_eq!(p.preset, "veryslow");
    assert_eq!(p.frame_rate, 6);
    assert_eq!(p.x264_params.as_deref(), Some("keyint=infinite:scenecut=60"));
    assert_eq!(p.scale_filter(1920, 1080), "scale=1920:1080:flags=lanczos");
    p.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let p: EncodeProfile =
        serde_json::from_value(json!({ "crf": 18, "x264Params": null })).unwrap();
    assert_eq!(p.crf, 18);
    assert_eq!(p.x264_params, None);
    assert_eq!(p.audio_codec, "aac");
}

#[test]
fn validate_rejects_bad_values() {
    let mut p = EncodeProfile::default();
    p.frame_rate = 0;
    assert!(p.validate().is_err());

    let mut p = EncodeProfile::default();
    p.crf = 60;
    assert!(p.validate().is_err());

    let mut p = EncodeProfile::default();
    p.preset = " ".to_owned();
    assert!(p.validate().is_err());
}
