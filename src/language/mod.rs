pub mod core;

pub use self::core::{Language, DEFAULT_LANGUAGE};
