//! Creation of administrator accounts from the command line.

use argon2::Argon2;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::distributions::{Alphanumeric, DistString};
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use thiserror::Error;

use entity::{Roles, UserActive, UserColumn, UserEntity, ROLE_ADMIN, ROLE_USER};

pub const DEFAULT_PASSWORD: &str = "azerty";
const MAX_EMAIL_LENGTH: usize = 180;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("A user with the email {0} already exists")]
    Exists(String),
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
    #[error("Could not hash the password: {0}")]
    Hash(String),
    #[error("The user was not persisted")]
    NotPersisted,
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

impl From<password_hash::Error> for AdminError {
    fn from(e: password_hash::Error) -> Self {
        AdminError::Hash(e.to_string())
    }
}

pub fn hash_password(password: &str) -> Result<String, AdminError> {
    let salt = Alphanumeric.sample_string(&mut rand::thread_rng(), 32);
    let salt = SaltString::from_b64(salt.as_str())?;
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password is not a valid PHC string");
            false
        }
    }
}

pub async fn create_admin<C>(db: &C, email: &str, password: &str) -> Result<entity::User, AdminError>
where
    C: ConnectionTrait,
{
    let email = email.trim();
    if email.is_empty() || email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(AdminError::InvalidEmail(email.to_owned()));
    }
    let existing = UserEntity::find()
        .filter(UserColumn::Email.eq(email))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(AdminError::Exists(email.to_owned()));
    }

    let user = UserActive {
        id: ActiveValue::NotSet,
        email: ActiveValue::Set(email.to_owned()),
        roles: ActiveValue::Set(Roles(vec![
            ROLE_USER.to_string(),
            ROLE_ADMIN.to_string(),
        ])),
        password: ActiveValue::Set(hash_password(password)?),
    }
    .insert(db)
    .await?;
    if user.id <= 0 {
        return Err(AdminError::NotPersisted);
    }
    tracing::info!(id = user.id, email = %user.email, "Created admin user");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_against_their_password() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "hunter2"));
        assert!(!verify_password(&hash, "hunter3"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("not a hash", "azerty"));
    }
}
