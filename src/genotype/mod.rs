pub(crate) mod decode;
pub(crate) mod record;
pub(crate) mod sprites;
