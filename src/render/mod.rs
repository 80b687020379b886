pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod frame;
pub(crate) mod grid;
pub(crate) mod overlay;
pub(crate) mod palette;
pub(crate) mod starfield;
pub(crate) mod warp;
