use crate::foundation::error::LaserCatResult;
use crate::render::frame::Frame;

/// What the viewer does with a frame before drawing the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Disposal {
    /// Leave the frame in place.
    #[default]
    Keep,
    /// Clear the frame's area to the background.
    Background,
}

/// Configuration provided to an [`AnimationSink`] before the first frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationConfig {
    pub width: u32,
    pub height: u32,
    /// Display time of every frame.
    pub delay_ms: u32,
    pub disposal: Disposal,
}

/// Consumer of ordered animation frames.
///
/// `push_frame` is called with strictly increasing positions starting at 0.
pub trait AnimationSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: AnimationConfig) -> LaserCatResult<()>;
    fn push_frame(&mut self, position: usize, frame: &Frame) -> LaserCatResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> LaserCatResult<()>;
}

/// Captures frames in memory, for tests.
#[derive(Debug, Default)]
pub struct InMemoryAnimationSink {
    cfg: Option<AnimationConfig>,
    frames: Vec<(usize, Frame)>,
    finished: bool,
}

impl InMemoryAnimationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&AnimationConfig> {
        self.cfg.as_ref()
    }

    pub fn frames(&self) -> &[(usize, Frame)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl AnimationSink for InMemoryAnimationSink {
    fn begin(&mut self, cfg: AnimationConfig) -> LaserCatResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, position: usize, frame: &Frame) -> LaserCatResult<()> {
        self.frames.push((position, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> LaserCatResult<()> {
        self.finished = true;
        Ok(())
    }
}
