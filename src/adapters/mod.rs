// Adapters layer: concrete implementations of domain ports for external systems.

pub mod openrouter;

pub use openrouter::OpenRouterClient;
