use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::storage::{KeyValueStore, StorageError, USER_KEY};

pub const DEMO_EMAIL: &str = "test@rmit.edu.au";
pub const DEMO_PASSWORD: &str = "StrongPass123";

/// Stored reviewer credentials. Compared as plain strings; this is a demo gate only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredentials {
    pub email: String,
    pub password: String,
}

impl UserCredentials {
    pub fn demo() -> Self {
        Self {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        }
    }
}

/// Submitted login form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginAttempt {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub captcha_verified: bool,
}

/// Write the demo credentials unless a user record already exists. Returns whether it wrote.
pub fn seed_demo_user<S: KeyValueStore + ?Sized>(storage: &S) -> Result<bool, LoginError> {
    if storage.load(USER_KEY)?.is_some() {
        return Ok(false);
    }
    let blob = serde_json::to_string(&UserCredentials::demo())?;
    storage.save(USER_KEY, &blob)?;
    info!("seeded demo reviewer credentials");
    Ok(true)
}

pub fn authenticate<S: KeyValueStore + ?Sized>(
    storage: &S,
    attempt: &LoginAttempt,
) -> Result<(), LoginError> {
    if !attempt.captcha_verified {
        return Err(LoginError::CaptchaRequired);
    }

    let stored = match storage.load(USER_KEY)? {
        Some(blob) => match serde_json::from_str::<UserCredentials>(&blob) {
            Ok(credentials) => Some(credentials),
            Err(err) => {
                warn!(error = %err, "stored user record is unreadable");
                None
            }
        },
        None => None,
    };

    match stored {
        Some(credentials)
            if credentials.email == attempt.email && credentials.password == attempt.password =>
        {
            info!("reviewer login succeeded");
            Ok(())
        }
        _ => Err(LoginError::InvalidCredentials),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("please complete the CAPTCHA verification")]
    CaptchaRequired,
    #[error("login failed; check your email or password")]
    InvalidCredentials,
    #[error("failed to encode user record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
