pub mod auth;
pub mod matching;
pub mod models;
pub mod processing;
pub mod utils;
pub mod validation;

pub use auth::{CardLoginOutcome, CardLoginService, CardUpload, PipelineConfig};
pub use utils::CardAuthError;
