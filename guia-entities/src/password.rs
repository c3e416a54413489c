use std::str::FromStr;
use thiserror::Error;

/// A salted hash of a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(String);

#[derive(Debug, Error)]
#[error("Invalid password")]
pub struct ParseError;

impl Password {
    const MIN_LEN: usize = 6;

    /// Wrap an already hashed password.
    pub const fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn verify(&self, password: &str) -> bool {
        pwhash::bcrypt::verify(password, &self.0)
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Password> for String {
    fn from(from: Password) -> Self {
        from.0
    }
}

impl FromStr for Password {
    type Err = ParseError;
    fn from_str(password: &str) -> Result<Self, Self::Err> {
        if password.trim().len() < Self::MIN_LEN {
            return Err(ParseError);
        }
        let hash = pwhash::bcrypt::hash(password).map_err(|_| ParseError)?;
        Ok(Self(hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let password = "secret".parse::<Password>().unwrap();
        assert_ne!("secret", password.as_ref());
        assert!(password.verify("secret"));
        assert!(!password.verify("wrong"));
    }

    #[test]
    fn reject_short_passwords() {
        assert!("short".parse::<Password>().is_err());
        assert!("      ".parse::<Password>().is_err());
    }
}
