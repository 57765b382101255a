//! Configuration management.

mod xdg;

pub use xdg::{XdgDirs, APP_DIR};
