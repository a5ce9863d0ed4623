use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("hunter22").unwrap();
        assert_ne!(hashed, "hunter22");
        assert!(verify_password("hunter22", &hashed).unwrap());
        assert!(!verify_password("hunter23", &hashed).unwrap());
    }

    #[test]
    fn test_verify_against_garbage_hash_is_error() {
        assert!(verify_password("hunter22", "not-a-bcrypt-hash").is_err());
    }
}
