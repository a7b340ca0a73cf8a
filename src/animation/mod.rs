pub(crate) mod ease;
pub(crate) mod order;
pub(crate) mod preset;
