pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::OpenRouterClient;
pub use app::{build_router, AppState};
pub use config::ServerConfig;
pub use core::{gate::ConcurrencyGate, validator::ValidationProxy};
pub use utils::error::{AppError, Result};
