pub(crate) mod signals;
pub(crate) mod timers;
