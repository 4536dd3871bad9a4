use chrono::{DateTime, Utc};

/// A code issued to one email address and awaiting verification.
/// Held in process memory only; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOtp {
    pub code: String,         // 4 digits, 1000..=9999
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PendingOtp {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
