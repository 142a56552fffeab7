use argon2::{
    Argon2, Params,
    password_hash::{
        Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use std::sync::OnceLock;

static ENGINE: OnceLock<Argon2> = OnceLock::new();

fn engine() -> &'static Argon2<'static> {
    ENGINE.get_or_init(|| {
        let params = Params::new(
            64 * 1024, // 64MB Memory (m)
            3,         // 3 Iterations (t)
            4,         // 4 Parallelism lanes (p)
            None,      // Default hash length (32 bytes)
        )
        .unwrap_or_default();

        Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
    })
}

pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = engine().hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

/// The single shared admin account. There are no roles and no per-user
/// identity; whoever knows the pair is the admin.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl AdminCredentials {
    /// Hashes a plain-text password once at start-up.
    pub fn from_password(username: &str, password: &str) -> Result<Self, Error> {
        Ok(Self {
            username: username.trim().to_string(),
            password_hash: hash_password(password)?,
        })
    }

    /// Takes a precomputed argon2 PHC string.
    pub fn from_hash(username: &str, password_hash: &str) -> Result<Self, Error> {
        PasswordHash::new(password_hash)?;

        Ok(Self {
            username: username.trim().to_string(),
            password_hash: password_hash.trim().to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        // Hash even on a username mismatch so both failures take as long.
        let password_ok = match verify_password(password, &self.password_hash) {
            Ok(ok) => ok,
            Err(e) => {
                log::error!("Stored admin password hash is unusable: {}", e);
                false
            }
        };

        password_ok && username.trim() == self.username
    }
}

pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(stored_hash)?;

    match engine().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
