use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AdminError;

/// Hashes a password with bcrypt, generating a fresh salt per call.
pub fn hash_password(password: &str) -> Result<String, AdminError> {
    Ok(hash(password, DEFAULT_COST)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AdminError> {
    Ok(verify(password, hash)?)
}
