#![forbid(unsafe_code)]

pub mod model;
pub mod time;
pub mod validate;

pub use time::Clock;
