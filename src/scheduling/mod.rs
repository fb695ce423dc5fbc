//! Scheduling core: slot generation from weekly templates and the
//! appointment status lifecycle.

pub mod slots;
pub mod status;

pub use slots::{compute_slots, day_window, overlaps, slot_interval, BusyInterval};
pub use status::AppointmentStatus;
