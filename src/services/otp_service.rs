use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{Duration, Utc};
use rand::Rng;

use crate::models::otp::PendingOtp;

/// Outcome of an OTP verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    Mismatch,
    Expired,
    NotPending,
}

/// In-memory OTP store keyed by email address.
///
/// Each address holds at most one pending code; issuing a new code for the
/// same address silently replaces the old one. A successful or expired
/// verification removes the entry. The lock is never held across an await.
pub struct OtpService {
    pending: RwLock<HashMap<String, PendingOtp>>,
    ttl: Duration,
}

impl OtpService {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            pending: RwLock::new(HashMap::new()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    // Generate 4-digit OTP
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        rng.gen_range(1000..=9999).to_string()
    }

    /// Record a code for an address. Call only after the email transport
    /// handoff succeeded, so a failed send leaves nothing pending.
    pub fn issue(&self, email: &str, code: &str) {
        let now = Utc::now();
        let entry = PendingOtp {
            code: code.to_string(),
            issued_at: now,
            expires_at: now + self.ttl,
        };
        let mut pending = self.pending.write().unwrap_or_else(|e| e.into_inner());
        if pending.insert(email.to_string(), entry).is_some() {
            tracing::debug!(email = %email, "Replaced previously pending OTP");
        }
    }

    /// Compare a submitted code against the pending one for an address.
    /// Strict equality only: an arbitrary non-empty code is rejected, as is
    /// an empty submission, a missing entry, or an expired one. Success and
    /// expiry both consume the entry.
    pub fn verify(&self, email: &str, submitted: &str) -> VerifyOutcome {
        let mut pending = self.pending.write().unwrap_or_else(|e| e.into_inner());
        let Some(entry) = pending.get(email) else {
            return VerifyOutcome::NotPending;
        };

        if entry.is_expired_at(Utc::now()) {
            pending.remove(email);
            return VerifyOutcome::Expired;
        }

        if entry.code == submitted.trim() {
            pending.remove(email);
            VerifyOutcome::Verified
        } else {
            VerifyOutcome::Mismatch
        }
    }

    #[cfg(test)]
    fn pending_for(&self, email: &str) -> Option<PendingOtp> {
        self.pending
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(email)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_stay_in_four_digit_range() {
        for _ in 0..1000 {
            let code = OtpService::generate_code();
            let value: u32 = code.parse().unwrap();
            assert!((1000..=9999).contains(&value), "out of range: {}", code);
            assert_eq!(code.len(), 4);
        }
    }

    #[test]
    fn issue_then_verify_succeeds_and_clears() {
        let service = OtpService::new(5);
        service.issue("ada@example.com", "4821");

        assert_eq!(
            service.verify("ada@example.com", "4821"),
            VerifyOutcome::Verified
        );
        // Consumed: the same code cannot be replayed.
        assert_eq!(
            service.verify("ada@example.com", "4821"),
            VerifyOutcome::NotPending
        );
    }

    #[test]
    fn wrong_code_is_rejected_and_entry_survives() {
        let service = OtpService::new(5);
        service.issue("ada@example.com", "4821");

        assert_eq!(
            service.verify("ada@example.com", "1234"),
            VerifyOutcome::Mismatch
        );
        assert!(service.pending_for("ada@example.com").is_some());
    }

    // The service this replaces accepted any truthy submission; here only
    // the exact stored code passes, so "" and "0" are both rejected.
    #[test]
    fn empty_and_zero_submissions_are_rejected() {
        let service = OtpService::new(5);
        service.issue("ada@example.com", "4821");

        assert_eq!(service.verify("ada@example.com", ""), VerifyOutcome::Mismatch);
        assert_eq!(service.verify("ada@example.com", "0"), VerifyOutcome::Mismatch);
        assert_eq!(
            service.verify("ada@example.com", "4821"),
            VerifyOutcome::Verified
        );
    }

    #[test]
    fn reissue_overwrites_previous_code() {
        let service = OtpService::new(5);
        service.issue("ada@example.com", "1111");
        service.issue("ada@example.com", "2222");

        assert_eq!(
            service.verify("ada@example.com", "1111"),
            VerifyOutcome::Mismatch
        );
        assert_eq!(
            service.verify("ada@example.com", "2222"),
            VerifyOutcome::Verified
        );
    }

    #[test]
    fn codes_are_scoped_per_email() {
        let service = OtpService::new(5);
        service.issue("ada@example.com", "1111");
        service.issue("grace@example.com", "2222");

        assert_eq!(
            service.verify("grace@example.com", "1111"),
            VerifyOutcome::Mismatch
        );
        assert_eq!(
            service.verify("ada@example.com", "1111"),
            VerifyOutcome::Verified
        );
        assert_eq!(
            service.verify("grace@example.com", "2222"),
            VerifyOutcome::Verified
        );
    }

    #[test]
    fn expired_code_is_rejected_and_consumed() {
        let service = OtpService::new(-1); // already expired on issue
        service.issue("ada@example.com", "4821");

        assert_eq!(
            service.verify("ada@example.com", "4821"),
            VerifyOutcome::Expired
        );
        assert_eq!(
            service.verify("ada@example.com", "4821"),
            VerifyOutcome::NotPending
        );
    }

    #[test]
    fn verify_without_pending_code_is_distinct_from_mismatch() {
        let service = OtpService::new(5);
        assert_eq!(
            service.verify("nobody@example.com", "4821"),
            VerifyOutcome::NotPending
        );
    }

    #[test]
    fn submitted_code_is_trimmed_before_comparison() {
        let service = OtpService::new(5);
        service.issue("ada@example.com", "4821");
        assert_eq!(
            service.verify("ada@example.com", " 4821 "),
            VerifyOutcome::Verified
        );
    }
}
