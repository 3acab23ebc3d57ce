//! Status-string vocabularies for appointments, package purchases, and
//! payments.
//!
//! Statuses are stored as plain text columns, so every layer that accepts a
//! status from the outside validates it against these sets first.

/// Appointment lifecycle statuses.
pub mod appointment {
    /// Default status for a newly created appointment.
    pub const CONFIRMED: &str = "confirmed";
    /// Terminal status set by the completion flow only.
    pub const COMPLETED: &str = "completed";
    pub const CANCELED: &str = "canceled";
    pub const RESCHEDULED: &str = "rescheduled";

    pub const ALL: &[&str] = &[CONFIRMED, COMPLETED, CANCELED, RESCHEDULED];

    pub fn is_valid(status: &str) -> bool {
        ALL.contains(&status)
    }
}

/// Package purchase statuses.
pub mod purchase {
    pub const ACTIVE: &str = "active";
    /// Set automatically when the session balance reaches zero.
    pub const EXHAUSTED: &str = "exhausted";

    pub const ALL: &[&str] = &[ACTIVE, EXHAUSTED];

    pub fn is_valid(status: &str) -> bool {
        ALL.contains(&status)
    }
}

/// Payment statuses and methods.
pub mod payment {
    pub const PENDING: &str = "pending";
    pub const PAID: &str = "paid";
    pub const CANCELED: &str = "canceled";
    pub const REFUNDED: &str = "refunded";

    pub const ALL: &[&str] = &[PENDING, PAID, CANCELED, REFUNDED];

    /// Default charge method for payments not covered by a package.
    pub const METHOD_PIX: &str = "pix";
    /// Method recorded when a session is debited from a purchased package.
    pub const METHOD_PACKAGE: &str = "package";

    pub fn is_valid(status: &str) -> bool {
        ALL.contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_statuses_accept_known_values() {
        assert!(appointment::is_valid("confirmed"));
        assert!(appointment::is_valid("completed"));
        assert!(appointment::is_valid("canceled"));
        assert!(appointment::is_valid("rescheduled"));
    }

    #[test]
    fn appointment_statuses_reject_unknown_values() {
        assert!(!appointment::is_valid("done"));
        assert!(!appointment::is_valid(""));
        assert!(!appointment::is_valid("Confirmed"));
    }

    #[test]
    fn purchase_and_payment_statuses() {
        assert!(purchase::is_valid("active"));
        assert!(purchase::is_valid("exhausted"));
        assert!(!purchase::is_valid("expired"));

        assert!(payment::is_valid("pending"));
        assert!(payment::is_valid("refunded"));
        assert!(!payment::is_valid("package"));
    }
}
