use super::*;

fn encode_png(img: &image::RgbaImage) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn decode_png_premultiplies_alpha() {
    let mut img = image::RgbaImage::new(2, 1);
    img.put_pixel(0, 0, image::Rgba([200, 100, 50, 255]));
    img.put_pixel(1, 0, image::Rgba([255, 255, 255, 128]));

    let bg = decode_background(&encode_png(&img)).unwrap();
    assert_eq!((bg.width, bg.height), (2, 1));
    assert_eq!(&bg.rgba8_premul[0..4], &[200, 100, 50, 255]);
    assert_eq!(&bg.rgba8_premul[4..8], &[128, 128, 128, 128]);
}

#[test]
fn undecodable_bytes_fail() {
    assert!(decode_background(b"definitely not an image").is_err());
}

#[test]
fn load_background_names_path_on_failure() {
    let dir = std::path::PathBuf::from("target").join("unit_decode");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("broken.jpg");
    std::fs::write(&path, b"nope").unwrap();

    let err = load_background(&path).unwrap_err();
    assert!(matches!(err, StillframeError::Render(_)));
    assert!(err.to_string().contains("broken.jpg"));

    let err = load_background(&dir.join("missing.jpg")).unwrap_err();
    assert!(matches!(err, StillframeError::Io { .. }));
}
