pub(crate) mod gif_sink;
pub(crate) mod schedule;
pub(crate) mod sink;
