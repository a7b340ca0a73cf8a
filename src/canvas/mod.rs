pub(crate) mod particles;
pub(crate) mod pattern;
pub(crate) mod squares;
