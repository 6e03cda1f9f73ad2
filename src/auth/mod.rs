pub mod card_login;
pub mod directory;
pub mod upload;

pub use card_login::{CardLoginOutcome, CardLoginService, PipelineConfig};
pub use directory::{InMemoryUserDirectory, StaticTokenIssuer, TokenIssuer, UserDirectory};
pub use upload::CardUpload;
