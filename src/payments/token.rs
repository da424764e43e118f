use chrono::{DateTime, Utc};

/// Bearer token issued by `/users/getToken`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expired_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expired_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expired_at,
        }
    }

    /// Usable only when non-empty, with a non-zero expiry strictly after `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.token.is_empty() && self.expired_at.timestamp() != 0 && self.expired_at > now
    }

    pub fn is_usable(&self) -> bool {
        self.is_usable_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_future_token_is_usable() {
        let now = Utc::now();
        let token = AccessToken::new("tok", now + Duration::minutes(30));
        assert!(token.is_usable_at(now));
    }

    #[test]
    fn test_expired_token_is_not_usable() {
        let now = Utc::now();
        let token = AccessToken::new("tok", now - Duration::seconds(1));
        assert!(!token.is_usable_at(now));
    }

    #[test]
    fn test_expiry_equal_to_now_is_not_usable() {
        let now = Utc::now();
        let token = AccessToken::new("tok", now);
        assert!(!token.is_usable_at(now));
    }

    #[test]
    fn test_zero_expiry_is_not_usable() {
        let epoch = DateTime::from_timestamp(0, 0).unwrap();
        let token = AccessToken::new("tok", epoch);
        assert!(!token.is_usable_at(epoch - Duration::days(1)));
    }

    #[test]
    fn test_empty_token_is_not_usable() {
        let now = Utc::now();
        let token = AccessToken::new("", now + Duration::minutes(30));
        assert!(!token.is_usable_at(now));
    }
}
