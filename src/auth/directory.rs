use crate::models::UserRecord;
use crate::utils::CardAuthError;

/// Lookup of registered accounts by matricule. Backed by whatever store
/// the host application uses; the pipeline only ever reads.
pub trait UserDirectory {
    fn find_by_matricule(&self, matricule: &str) -> Result<Option<UserRecord>, CardAuthError>;
}

/// Session-token issuance for an authenticated user. The token format
/// (JWT or otherwise) is the host application's business.
pub trait TokenIssuer {
    fn issue_token(&self, user_id: &str) -> Result<String, CardAuthError>;
}

/// Directory over a fixed set of records, for the demo binary and tests.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: Vec<UserRecord>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<UserRecord>) -> Self {
        InMemoryUserDirectory { users }
    }

    pub fn add(&mut self, user: UserRecord) {
        self.users.push(user);
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn find_by_matricule(&self, matricule: &str) -> Result<Option<UserRecord>, CardAuthError> {
        Ok(self
            .users
            .iter()
            .find(|user| user.matricule == matricule)
            .cloned())
    }
}

/// Issues one fixed token regardless of user, for the demo binary and
/// tests.
#[derive(Debug)]
pub struct StaticTokenIssuer {
    token: String,
}

impl StaticTokenIssuer {
    pub fn new(token: impl Into<String>) -> Self {
        StaticTokenIssuer {
            token: token.into(),
        }
    }
}

impl TokenIssuer for StaticTokenIssuer {
    fn issue_token(&self, _user_id: &str) -> Result<String, CardAuthError> {
        Ok(self.token.clone())
    }
}
