use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::mul_div255_u8;

/// Source-over for premultiplied pixels, with `opacity` applied to the source.
pub fn over(dst: Rgba8Premul, src: Rgba8Premul, opacity: f32) -> Rgba8Premul {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Premultiply a straight-alpha color.
pub fn premultiply(rgb: [u8; 3], alpha: u8) -> Rgba8Premul {
    let a = u16::from(alpha);
    [
        mul_div255_u8(u16::from(rgb[0]), a),
        mul_div255_u8(u16::from(rgb[1]), a),
        mul_div255_u8(u16::from(rgb[2]), a),
        alpha,
    ]
}

/// Undo premultiplication for encoders that expect straight alpha.
pub fn unpremultiply(px: Rgba8Premul) -> [u8; 4] {
    let a = u16::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let ch = |c: u8| ((u16::from(c) * 255 + a / 2) / a).min(255) as u8;
    [ch(px[0]), ch(px[1]), ch(px[2]), px[3]]
}
