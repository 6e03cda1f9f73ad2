pub mod error;

pub use error::CardAuthError;
