use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StillframeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StillframeError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        StillframeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        StillframeError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn io_names_the_path() {
    let err = StillframeError::io("audio/missing", std::io::Error::other("boom"));
    let msg = err.to_string();
    assert!(msg.contains("audio/missing"));
    assert!(msg.contains("boom"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StillframeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
