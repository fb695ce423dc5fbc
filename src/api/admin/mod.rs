//! Operator API endpoints — split into sub-modules by domain

mod appointments;
mod auth;
mod availability;
mod professionals;
mod services;

use crate::auth::staff_auth::StaffIdentity;
use crate::error::{AppError, ErrorCode};

/// Admin-only guard for management endpoints.
pub fn require_admin(identity: &StaffIdentity) -> Result<(), AppError> {
    if identity.is_admin {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::AdminRequired))
    }
}

/// Admin, or the professional acting on their own record.
pub fn require_admin_or_self(
    identity: &StaffIdentity,
    professional_id: i64,
) -> Result<(), AppError> {
    if identity.is_admin || identity.professional_id == professional_id {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::PermissionDenied))
    }
}

// Re-export all handlers for route registration
pub use auth::login;

pub use appointments::{list_appointments, update_appointment_status};

pub use services::{
    create_service, delete_service, list_services, service_roster, set_service_roster,
    update_service,
};

pub use professionals::{
    create_professional, delete_professional, list_professionals, update_professional,
};

pub use availability::{get_availability, put_availability};
