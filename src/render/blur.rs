use crate::foundation::error::{LaserCatError, LaserCatResult};
use crate::render::frame::Frame;

/// Separable Gaussian blur of a premultiplied frame, clamping at the edges.
pub fn blur_frame(src: &Frame, radius: u32, sigma: f32) -> LaserCatResult<Frame> {
    let expected_len = (src.width as usize)
        .checked_mul(src.height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| LaserCatError::invariant("blur buffer size overflow"))?;
    if src.data.len() != expected_len {
        return Err(LaserCatError::validation(
            "blur_frame expects data matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.clone());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = Frame::new(src.width, src.height);
    let mut out = Frame::new(src.width, src.height);

    convolve(src, &mut tmp, &kernel, Axis::Horizontal);
    convolve(&tmp, &mut out, &kernel, Axis::Vertical);
    Ok(out)
}

/// Normalized weights in Q16, summing to exactly `1 << 16`.
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> LaserCatResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(LaserCatError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(LaserCatError::invariant("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|&wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn convolve(src: &Frame, dst: &mut Frame, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i64;
    let (w, h) = (i64::from(src.width), i64::from(src.height));
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i64 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + d).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, slot) in acc.iter_mut().enumerate() {
                    *slot += u64::from(kw) * u64::from(src.data[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for (c, &v) in acc.iter().enumerate() {
                dst.data[out_idx + c] = q16_to_u8(v);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}
