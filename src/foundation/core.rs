use crate::foundation::error::{LaserCatError, LaserCatResult};

/// Opaque sRGB color as it appears in sprite grids.
///
/// Serialized as a lowercase `#rrggbb` string.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Premultiplied RGBA8 pixel.
pub type Rgba8Premul = [u8; 4];

impl Rgb {
    /// Laser red used for eye markers and beams.
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> LaserCatResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |h: &str| {
            u8::from_str_radix(h, 16)
                .map_err(|_| LaserCatError::decode(format!("invalid color '{s}'")))
        };
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(LaserCatError::decode(format!("invalid color '{s}'"))),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceived brightness in `[0, 255]` (ITU-R 601 luma weights).
    pub fn brightness(self) -> f64 {
        (f64::from(self.r) * 299.0 + f64::from(self.g) * 587.0 + f64::from(self.b) * 114.0)
            / 1000.0
    }

    /// Shift every channel up by `amount` percent of full scale.
    ///
    /// The shift is rounded on its negation with halves going up, so 25.5 becomes 25.
    pub fn brighten(self, amount: u8) -> Self {
        let delta = -((-255.0 * f64::from(amount) / 100.0 + 0.5).floor()) as i32;
        let ch = |v: u8| (i32::from(v) + delta).clamp(0, 255) as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }

    /// Lower HSL lightness by `amount` percent.
    pub fn darken(self, amount: u8) -> Self {
        let (h, s, l) = self.to_hsl();
        let l = (l - f64::from(amount) / 100.0).clamp(0.0, 1.0);
        Self::from_hsl(h, s, l)
    }

    /// Hue, saturation and lightness, each in `[0, 1]`.
    pub fn to_hsl(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        if max == min {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s, l)
    }

    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Self::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(
            to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            to_u8(hue_to_rgb(p, q, h)),
            to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }

    /// Linear interpolation between two colors, rounding each channel.
    pub fn lerp(self, other: Rgb, t: f64) -> Self {
        let ch = |a: u8, b: u8| {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self::new(
            ch(self.r, other.r),
            ch(self.g, other.g),
            ch(self.b, other.b),
        )
    }

    pub fn to_premul(self) -> Rgba8Premul {
        [self.r, self.g, self.b, 255]
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

impl TryFrom<String> for Rgb {
    type Error = LaserCatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
