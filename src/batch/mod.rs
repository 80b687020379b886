pub(crate) mod artifacts;
pub(crate) mod config;
pub(crate) mod metadata;
pub(crate) mod pipeline;
