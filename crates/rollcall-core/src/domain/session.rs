//! Session domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One attendance-taking instance tied to a subject/section/course and a
/// current OTP. OTP fields stay unset until the first rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub subject: String,
    pub section: String,
    pub course: String,

    pub otp: Option<String>,
    pub otp_generated_at: Option<DateTime<Utc>>,

    // Audit
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(subject: String, section: String, course: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject,
            section,
            course,
            otp: None,
            otp_generated_at: None,
            created_at: Utc::now(),
        }
    }

    /// Exact opaque string comparison, no normalization. A session without
    /// a generated OTP never matches.
    pub fn otp_matches(&self, submitted: &str) -> bool {
        self.otp.as_deref() == Some(submitted)
    }

    /// Elapsed whole seconds between `now` and the OTP generation time,
    /// as an absolute value so clock-skewed-early submissions are tolerated
    /// the same as late ones. `None` when no OTP was ever generated.
    pub fn otp_age_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        self.otp_generated_at
            .map(|generated_at| (now - generated_at).num_seconds().abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_otp_matches_requires_generated_otp() {
        let mut session = Session::new("CS101".into(), "A".into(), "Algorithms".into());
        assert!(!session.otp_matches("123456"));

        session.otp = Some("123456".into());
        assert!(session.otp_matches("123456"));
        assert!(!session.otp_matches("123457"));
    }

    #[test]
    fn test_otp_age_is_symmetric() {
        let mut session = Session::new("CS101".into(), "A".into(), "Algorithms".into());
        let now = Utc::now();
        session.otp_generated_at = Some(now - Duration::seconds(30));
        assert_eq!(session.otp_age_secs(now), Some(30));

        // Generation timestamp ahead of the clock counts the same
        session.otp_generated_at = Some(now + Duration::seconds(30));
        assert_eq!(session.otp_age_secs(now), Some(30));
    }
}
