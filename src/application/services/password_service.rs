//! Password hashing and verification.

use rand::{Rng, distr::Alphanumeric};

/// Lowest bcrypt cost accepted by the hasher.
pub const MIN_COST: u32 = 4;
/// Highest bcrypt cost accepted by the hasher.
pub const MAX_COST: u32 = 31;
/// Default work factor.
pub const DEFAULT_COST: u32 = 10;
/// Longest password bcrypt can digest without truncation.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Errors raised while producing a password hash.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt cost must be between 4 and 31, got {0}")]
    InvalidCost(u32),

    #[error("Password must be at most 72 bytes")]
    TooLong,

    #[error("Failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// One-way salted password hashing backed by bcrypt.
///
/// Each hash embeds its own random salt and cost, so hashing the same
/// plaintext twice yields two different strings that both verify. The service
/// holds no mutable state; construct it once and clone or share it freely.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    /// Creates a hasher with the given bcrypt work factor.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::InvalidCost`] when `cost` is outside
    /// [`MIN_COST`]..=[`MAX_COST`].
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes a plaintext password with a fresh random salt.
    ///
    /// Output is a modular-crypt string (`$2b$<cost>$<salt+digest>`).
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::TooLong`] for passwords over
    /// [`MAX_PASSWORD_BYTES`]; bcrypt would otherwise ignore the excess.
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong);
        }
        Ok(bcrypt::non_truncating_hash(plaintext, self.cost)?)
    }

    /// Checks a plaintext password against a stored hash.
    ///
    /// Comparison is constant-time. Any malformed or unsupported hash, and any
    /// password longer than [`MAX_PASSWORD_BYTES`], yields `false` rather than
    /// an error.
    pub fn matches(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::non_truncating_verify(plaintext, hash).unwrap_or(false)
    }

    /// Hashes a random throwaway secret at this service's cost.
    ///
    /// Used to equalize verification work when a username does not exist.
    pub fn dummy_hash(&self) -> Result<String, PasswordError> {
        let secret: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        self.hash(&secret)
    }
}
