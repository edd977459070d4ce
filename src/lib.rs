// Library surface for the binary, headless integration tests and reuse.
// Nothing here touches the terminal except `runtime::CrosstermEventSource`.
pub mod app;
pub mod config;
pub mod error;
pub mod language;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod telemetry;
pub mod theme;
pub mod ui;
pub mod view;
pub mod word_generator;

pub use error::TyxtError;
