//! Password gate in front of the catalog
//!
//! The secret is compared in plaintext inside the client. That is only a
//! speed bump: anyone with the binary or its config can read it.

use super::forms::FormField;

/// Alert shown after a wrong password
pub const ACCESS_DENIED_MESSAGE: &str = "ACCESS DENIED: Incorrect password";

/// Result of a password attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Granted,
    Denied,
}

/// Password screen state
#[derive(Debug, Clone)]
pub struct AccessGate {
    secret: String,
    pub input: FormField,
}

impl AccessGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            input: FormField::masked("password", "Password"),
        }
    }

    /// Compare the typed password against the secret (exact, case-sensitive).
    ///
    /// The input is cleared either way; retries are unlimited.
    pub fn attempt(&mut self) -> GateOutcome {
        let outcome = if self.input.as_text() == self.secret {
            GateOutcome::Granted
        } else {
            GateOutcome::Denied
        };
        self.input.clear();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_password(gate: &mut AccessGate, text: &str) {
        for c in text.chars() {
            gate.input.push_char(c);
        }
    }

    #[test]
    fn test_correct_password_is_granted() {
        let mut gate = AccessGate::new("P3pt!X9r");
        type_password(&mut gate, "P3pt!X9r");
        assert_eq!(gate.attempt(), GateOutcome::Granted);
    }

    #[test]
    fn test_wrong_password_is_denied_and_cleared() {
        let mut gate = AccessGate::new("P3pt!X9r");
        type_password(&mut gate, "hunter2");
        assert_eq!(gate.attempt(), GateOutcome::Denied);
        assert!(gate.input.as_text().is_empty());
    }

    #[test]
    fn test_comparison_is_case_sensitive_and_exact() {
        let mut gate = AccessGate::new("P3pt!X9r");
        for attempt in ["p3pt!x9r", "P3pt!X9r ", " P3pt!X9r", "P3pt!X9", ""] {
            type_password(&mut gate, attempt);
            assert_eq!(gate.attempt(), GateOutcome::Denied, "{attempt:?}");
        }
    }

    #[test]
    fn test_retries_are_unlimited() {
        let mut gate = AccessGate::new("secret");
        for _ in 0..50 {
            type_password(&mut gate, "nope");
            assert_eq!(gate.attempt(), GateOutcome::Denied);
        }
        type_password(&mut gate, "secret");
        assert_eq!(gate.attempt(), GateOutcome::Granted);
    }
}
