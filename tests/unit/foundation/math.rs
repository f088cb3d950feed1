use super::*;

#[test]
fn mul_div255_matches_rounded_division() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 127), 64);
}

#[test]
fn over_with_transparent_src_is_identity() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn over_with_opaque_src_replaces_dst() {
    assert_eq!(over([10, 20, 30, 255], [1, 2, 3, 255]), [1, 2, 3, 255]);
}

#[test]
fn half_black_over_opaque_halves_channels() {
    let out = over([200, 100, 50, 255], [0, 0, 0, 128]);
    assert_eq!(out, [100, 50, 25, 255]);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn over_uniform_applies_to_every_pixel() {
    let mut dst = vec![255u8; 16];
    over_uniform_in_place(&mut dst, [128, 128, 128, 128]);
    for px in dst.chunks_exact(4) {
        assert_eq!(px, &[255, 255, 255, 255]);
    }
}
