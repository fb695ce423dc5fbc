//! Appointment status lifecycle.
//!
//! Explicit transition table:
//!
//! ```text
//! waiting_payment ──► pending ──► confirmed ──► cancelled
//!        │               │
//!        └──► rejected ◄─┘
//! ```
//!
//! `rejected` and `cancelled` are terminal.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Created by the booking flow, customer has not confirmed the Pix yet
    WaitingPayment,
    /// Customer reports the Pix as paid; awaiting operator verification
    Pending,
    /// Operator verified payment and confirmed the appointment
    Confirmed,
    /// Operator rejected the request (terminal)
    Rejected,
    /// Operator cancelled a confirmed appointment (terminal)
    Cancelled,
}

impl AppointmentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::WaitingPayment => "waiting_payment",
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Rejected => "rejected",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "waiting_payment" => Some(AppointmentStatus::WaitingPayment),
            "pending" => Some(AppointmentStatus::Pending),
            "confirmed" => Some(AppointmentStatus::Confirmed),
            "rejected" => Some(AppointmentStatus::Rejected),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Rejected | AppointmentStatus::Cancelled
        )
    }

    /// Whether `self -> next` is an allowed lifecycle transition.
    pub const fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (WaitingPayment, Pending)
                | (WaitingPayment, Rejected)
                | (Pending, Confirmed)
                | (Pending, Rejected)
                | (Confirmed, Cancelled)
        )
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::AppointmentStatus::*;

    #[test]
    fn happy_path() {
        assert!(WaitingPayment.can_transition_to(Pending));
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Cancelled));
    }

    #[test]
    fn operator_rejection() {
        assert!(WaitingPayment.can_transition_to(Rejected));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Confirmed.can_transition_to(Rejected));
    }

    #[test]
    fn no_backwards_transitions() {
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(WaitingPayment));
        assert!(!Confirmed.can_transition_to(WaitingPayment));
    }

    #[test]
    fn terminal_states_stay_terminal() {
        for next in [WaitingPayment, Pending, Confirmed, Rejected, Cancelled] {
            assert!(!Rejected.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
        assert!(Rejected.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Pending.is_terminal());
    }

    #[test]
    fn no_self_transitions() {
        for s in [WaitingPayment, Pending, Confirmed, Rejected, Cancelled] {
            assert!(!s.can_transition_to(s));
        }
    }

    #[test]
    fn db_round_trip() {
        for s in [WaitingPayment, Pending, Confirmed, Rejected, Cancelled] {
            assert_eq!(super::AppointmentStatus::from_db(s.as_str()), Some(s));
        }
        assert_eq!(super::AppointmentStatus::from_db("paid"), None);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&WaitingPayment).unwrap();
        assert_eq!(json, "\"waiting_payment\"");
        let s: super::AppointmentStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(s, Confirmed);
    }
}
