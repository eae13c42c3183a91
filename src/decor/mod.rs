pub(crate) mod corner;
