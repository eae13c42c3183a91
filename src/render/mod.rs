pub(crate) mod cpu;
pub(crate) mod draw;
pub(crate) mod surface;
