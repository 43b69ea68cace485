use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use error_stack::Report;
use uuid::Uuid;

use kernel::interface::session::AccountVerifier;
use kernel::prelude::entity::{Account, AccountEmail, Credential};
use kernel::KernelError;

use crate::env;

const ADMIN_EMAIL: &str = "ADMIN_EMAIL";
const ADMIN_PASSWORD_HASH: &str = "ADMIN_PASSWORD_HASH";

/// The single operator account, configured by email and an argon2 PHC
/// string (`$argon2id$v=19$...`) of its password.
#[derive(Debug, Clone)]
pub struct ConfiguredAccount {
    email: AccountEmail,
    password_hash: String,
}

impl ConfiguredAccount {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let email = env(ADMIN_EMAIL)?;
        let password_hash = env(ADMIN_PASSWORD_HASH)?;
        Self::with_hash(email, password_hash)
    }

    /// Fails when `password_hash` is not a PHC string.
    pub fn with_hash(
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let password_hash = password_hash.into().trim().to_string();
        PasswordHash::new(&password_hash).map_err(|error| {
            Report::new(KernelError::Internal).attach_printable(format!(
                "Env {ADMIN_PASSWORD_HASH} is not a PHC string: {error}"
            ))
        })?;
        Ok(Self {
            email: AccountEmail::new(email),
            password_hash,
        })
    }

    /// Hashes `password` with a fresh salt.
    pub fn with_password(
        email: impl Into<String>,
        password: &str,
    ) -> error_stack::Result<Self, KernelError> {
        let hashing_failed = |error: argon2::password_hash::Error| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("password hashing failed: {error}"))
        };
        let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes()).map_err(hashing_failed)?;
        let hashed = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(hashing_failed)?
            .to_string();
        Self::with_hash(email, hashed)
    }
}

impl AccountVerifier for ConfiguredAccount {
    fn verify(&self, credential: &Credential) -> Option<Account> {
        if !self.email.matches(credential.email()) {
            return None;
        }
        let parsed = match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::warn!("configured password hash is unreadable: {error}");
                return None;
            }
        };
        Argon2::default()
            .verify_password(credential.password().as_bytes(), &parsed)
            .is_ok()
            .then(|| Account::new(self.email.clone()))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::session::AccountVerifier;
    use kernel::prelude::entity::{Account, AccountEmail, Credential};
    use kernel::KernelError;

    use super::ConfiguredAccount;

    #[test]
    fn verifies_matching_credentials_only() -> error_stack::Result<(), KernelError> {
        let account = ConfiguredAccount::with_password("admin@example.com", "s3cret")?;

        let signed_in = account.verify(&Credential::new("Admin@Example.com", "s3cret"));
        assert_eq!(
            signed_in,
            Some(Account::new(AccountEmail::new("admin@example.com")))
        );
        assert!(account
            .verify(&Credential::new("admin@example.com", "wrong"))
            .is_none());
        assert!(account
            .verify(&Credential::new("other@example.com", "s3cret"))
            .is_none());
        Ok(())
    }

    #[test]
    fn same_password_is_salted_differently() -> error_stack::Result<(), KernelError> {
        let first = ConfiguredAccount::with_password("admin@example.com", "s3cret")?;
        let second = ConfiguredAccount::with_password("admin@example.com", "s3cret")?;
        assert!(first.password_hash.starts_with("$argon2id$"));
        assert_ne!(first.password_hash, second.password_hash);
        Ok(())
    }

    #[test]
    fn accepts_configured_phc_string() -> error_stack::Result<(), KernelError> {
        let phc = ConfiguredAccount::with_password("admin@example.com", "secret")?.password_hash;
        let account = ConfiguredAccount::with_hash("admin@example.com", format!(" {phc}\n"))?;
        assert!(account
            .verify(&Credential::new("admin@example.com", "secret"))
            .is_some());
        Ok(())
    }

    #[test]
    fn rejects_plain_digest_as_hash() {
        let result = ConfiguredAccount::with_hash(
            "admin@example.com",
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b",
        );
        assert!(result.is_err());
    }
}
