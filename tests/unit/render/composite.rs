use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_half_alpha_white_on_black_is_mid_gray() {
    let dst = [0, 0, 0, 255];
    let src = [128, 128, 128, 128];
    assert_eq!(over(dst, src, 1.0), [128, 128, 128, 255]);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    assert!(over_in_place(&mut dst[..6], &[0u8; 6], 1.0).is_err());
}

#[test]
fn over_in_place_keeps_background_where_watermark_is_transparent() {
    let mut bg = [10u8, 20, 30, 255, 40, 50, 60, 255].to_vec();
    let layer = [0u8, 0, 0, 0, 255, 255, 255, 255];
    over_in_place(&mut bg, &layer, 1.0).unwrap();
    assert_eq!(bg, vec![10, 20, 30, 255, 255, 255, 255, 255]);
}

#[test]
fn flatten_transparent_returns_bg_and_opaque_is_identity() {
    let rgb = flatten_premul_to_rgb8(&[0, 0, 0, 0, 1, 2, 3, 255], [10, 20, 30]).unwrap();
    assert_eq!(rgb, vec![10, 20, 30, 1, 2, 3]);
}

#[test]
fn unpremultiply_restores_straight_color() {
    let out = unpremultiply_rgba8(&[64, 0, 0, 128, 0, 0, 0, 0, 9, 8, 7, 255]);
    assert_eq!(out, vec![128, 0, 0, 128, 0, 0, 0, 0, 9, 8, 7, 255]);
}
