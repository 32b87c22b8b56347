// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod env;
pub mod export;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod store;
pub mod toast;
pub mod ui;
pub mod util;
