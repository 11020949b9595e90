pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Composite one RGBA8 pixel over an opaque background.
fn over_background(px: &[u8], src_is_premul: bool, bg: [u8; 3]) -> [u8; 3] {
    let a = u16::from(px[3]);
    if a == 255 {
        return [px[0], px[1], px[2]];
    }
    let inv = 255 - a;
    let mut out = [0u8; 3];
    for ((o, &c), b) in out.iter_mut().zip(&px[..3]).zip(bg) {
        let c = u16::from(c);
        let fg = if src_is_premul { c } else { mul_div255_u16(c, a) };
        *o = (fg + mul_div255_u16(u16::from(b), inv)).min(255) as u8;
    }
    out
}

/// Flatten RGBA8 over an opaque background into tightly packed RGB8.
///
/// `dst` must hold `src.len() / 4 * 3` bytes.
pub(crate) fn flatten_rgba8_to_rgb8(dst: &mut [u8], src: &[u8], src_is_premul: bool, bg: [u8; 3]) {
    for (d, s) in dst.chunks_exact_mut(3).zip(src.chunks_exact(4)) {
        d.copy_from_slice(&over_background(s, src_is_premul, bg));
    }
}

/// Flatten RGBA8 over an opaque background, keeping the RGBA layout with alpha 255.
///
/// `dst` must be as long as `src`.
pub(crate) fn flatten_rgba8_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg: [u8; 3],
) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let [r, g, b] = over_background(s, src_is_premul, bg);
        d.copy_from_slice(&[r, g, b, 255]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
