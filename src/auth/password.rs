use bcrypt::{hash, verify, BcryptError};

/// bcrypt wrapper; the cost comes from `security.bcrypt_cost`
#[derive(Debug, Clone, Copy)]
pub struct PasswordEncoder {
    cost: u32,
}

impl PasswordEncoder {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn encode(&self, raw_password: &str) -> Result<String, BcryptError> {
        hash(raw_password, self.cost)
    }

    /// A malformed stored hash never matches
    pub fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        verify(raw_password, encoded_password).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_password_matches_raw() {
        let encoder = PasswordEncoder::new(4);
        let encoded = encoder.encode("testPassword").unwrap();

        assert_ne!(encoded, "testPassword");
        assert!(encoder.matches("testPassword", &encoded));
        assert!(!encoder.matches("otherPassword", &encoded));
    }

    #[test]
    fn garbage_hash_does_not_match() {
        assert!(!PasswordEncoder::new(4).matches("testPassword", "not-a-hash"));
    }
}
