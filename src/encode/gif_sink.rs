use anyhow::Context;

use crate::encode::sink::{AnimationConfig, AnimationSink, Disposal};
use crate::foundation::error::{LaserCatError, LaserCatResult};
use crate::render::frame::Frame;

/// Palette quantizer speed passed to the encoder, 1 (best) to 30 (fastest).
const QUANTIZE_SPEED: i32 = 10;

/// Looping GIF encoder writing into memory.
///
/// Bytes become available through [`GifSink::take_bytes`] after `end`.
#[derive(Default)]
pub struct GifSink {
    encoder: Option<gif::Encoder<Vec<u8>>>,
    cfg: Option<AnimationConfig>,
    bytes: Option<Vec<u8>>,
    frames: usize,
}

impl std::fmt::Debug for GifSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifSink")
            .field("cfg", &self.cfg)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl GifSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded GIF, once the animation has ended.
    pub fn take_bytes(&mut self) -> LaserCatResult<Vec<u8>> {
        self.bytes
            .take()
            .ok_or_else(|| LaserCatError::invariant("gif sink has not been finished"))
    }

    fn dims(cfg: &AnimationConfig) -> LaserCatResult<(u16, u16)> {
        let w = u16::try_from(cfg.width);
        let h = u16::try_from(cfg.height);
        match (w, h) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
            _ => Err(LaserCatError::validation(format!(
                "gif dimensions must be within 1..=65535, got {}x{}",
                cfg.width, cfg.height
            ))),
        }
    }
}

impl AnimationSink for GifSink {
    fn begin(&mut self, cfg: AnimationConfig) -> LaserCatResult<()> {
        let (w, h) = Self::dims(&cfg)?;
        let mut encoder =
            gif::Encoder::new(Vec::new(), w, h, &[]).context("create gif encoder")?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .context("set gif repeat")?;

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.bytes = None;
        self.frames = 0;
        Ok(())
    }

    fn push_frame(&mut self, _position: usize, frame: &Frame) -> LaserCatResult<()> {
        let (Some(encoder), Some(cfg)) = (self.encoder.as_mut(), self.cfg.as_ref()) else {
            return Err(LaserCatError::invariant("gif sink used before begin"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(LaserCatError::validation(format!(
                "frame is {}x{}, animation is {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        let (w, h) = Self::dims(cfg)?;

        let mut rgba = frame.to_rgba_image()?.into_raw();
        let mut out = gif::Frame::from_rgba_speed(w, h, &mut rgba, QUANTIZE_SPEED);
        out.delay = u16::try_from(cfg.delay_ms / 10).unwrap_or(u16::MAX);
        out.dispose = match cfg.disposal {
            Disposal::Keep => gif::DisposalMethod::Keep,
            Disposal::Background => gif::DisposalMethod::Background,
        };
        encoder.write_frame(&out).context("write gif frame")?;
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> LaserCatResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| LaserCatError::invariant("gif sink ended before begin"))?;
        if self.frames == 0 {
            return Err(LaserCatError::validation("gif animation has no frames"));
        }
        self.bytes = Some(encoder.into_inner().context("finish gif")?);
        Ok(())
    }
}
