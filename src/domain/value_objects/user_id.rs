use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Chat-platform user snowflake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Key used for this user inside the usage document
    pub fn as_key(&self) -> String {
        self.0.to_string()
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidUserId(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_user_id_key() {
        assert_eq!(UserId::new(1234).as_key(), "1234");
    }

    #[test]
    fn test_user_id_from_str() {
        assert_eq!(UserId::from_str(" 42 ").unwrap(), UserId::new(42));
        assert!(UserId::from_str("abc").is_err());
        assert!(UserId::from_str("-1").is_err());
    }
}
