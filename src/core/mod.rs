pub mod gate;
pub mod prompt;
pub mod validator;

pub use crate::domain::model::{ValidationRequest, ValidationResponse, Verdict};
pub use crate::domain::ports::{CompletionClient, UpstreamSettings};
pub use crate::utils::error::Result;
