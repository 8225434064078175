// src/config/mod.rs

//! Configuration: optional TOML file plus CLI flags, resolved into
//! [`Settings`].

pub mod duration;
pub mod loader;
pub mod model;
pub mod validate;

pub use duration::{format_duration, parse_duration};
pub use loader::{load_from_path, load_settings};
pub use model::{ConfigFile, TimingSection};
pub use validate::Settings;
