use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verify a password against a stored hash. An unparseable hash counts as
/// a mismatch, not an error.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(password_hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_differs_from_password_and_per_salt() {
        let hash1 = hash_password("sod-gamur").unwrap();
        let hash2 = hash_password("sod-gamur").unwrap();
        assert_ne!(hash1, "sod-gamur");
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn verify_accepts_correct_password() {
        let hash = hash_password("sod-gamur").unwrap();
        assert!(verify_password("sod-gamur", &hash));
    }

    #[test]
    fn verify_rejects_wrong_password_and_bad_hash() {
        let hash = hash_password("sod-gamur").unwrap();
        assert!(!verify_password("lo-nachon", &hash));
        assert!(!verify_password("sod-gamur", "not-a-phc-hash"));
    }
}
