pub(crate) mod progress;
pub(crate) mod track;
pub(crate) mod zone;
