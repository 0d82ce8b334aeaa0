use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::TokenService;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, User};

const BAD_CREDENTIALS: &str = "Incorrect email or password";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    pub fn register(&self, email: &str, password: &str) -> Result<User, DomainError> {
        if self.users.find_by_email(email)?.is_some() {
            return Err(DomainError::Conflict("Email already registered".to_string()));
        }

        let user = self.users.create(NewUser {
            email: email.to_string(),
            password_hash: hash_password(password)?,
        })?;
        log::info!("Registered user id={}", user.id);
        Ok(user)
    }

    /// Exchange credentials for a bearer token. Unknown email and wrong
    /// password produce the same error.
    pub fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let user = match self.users.find_by_email(email)? {
            Some(user) if verify_password(password, &user.password_hash) => user,
            _ => {
                log::warn!("Rejected login attempt");
                return Err(DomainError::Unauthenticated(BAD_CREDENTIALS.to_string()));
            }
        };

        self.tokens.issue(&user.email)
    }

    /// Resolve a bearer token to the account it was issued to.
    pub fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let email = self.tokens.verify(token)?;
        self.users.find_by_email(&email)?.ok_or_else(|| {
            DomainError::Unauthenticated("Could not validate credentials".to_string())
        })
    }

    pub fn delete_account(&self, user: &User) -> Result<(), DomainError> {
        self.users.delete_cascade(user.id)?;
        log::info!("Deleted user id={}", user.id);
        Ok(())
    }
}
