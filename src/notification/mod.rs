pub mod commands;
pub mod emitter;
pub mod model;
