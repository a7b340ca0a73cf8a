pub(crate) mod scramble;
pub(crate) mod split;
pub(crate) mod stagger;
pub(crate) mod variant;
