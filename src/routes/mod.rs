pub(crate) mod field;
pub(crate) mod frame;
pub(crate) mod model;
pub(crate) mod segment;
