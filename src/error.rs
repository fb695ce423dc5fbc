//! Unified error codes and API error/response types for agenda-server.
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Service errors
//! - 4xxx: Professional errors
//! - 5xxx: Availability errors
//! - 6xxx: Appointment/booking errors
//! - 9xxx: System errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Unified error code enum.
///
/// Codes are represented as u16 values for efficient serialization and
/// cross-language compatibility with API consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Password too short
    PasswordTooShort = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Administrator role required
    AdminRequired = 2002,

    // ==================== 3xxx: Service ====================
    /// Service not found
    ServiceNotFound = 3001,
    /// Service duration must be positive
    ServiceInvalidDuration = 3002,
    /// Service price must be non-negative
    ServiceInvalidPrice = 3003,

    // ==================== 4xxx: Professional ====================
    /// Professional not found
    ProfessionalNotFound = 4001,
    /// Professional email already exists
    ProfessionalEmailExists = 4002,
    /// Professional does not offer the requested service
    ProfessionalNotAssigned = 4003,

    // ==================== 5xxx: Availability ====================
    /// Day-of-week outside 0..=6
    InvalidDayOfWeek = 5001,
    /// Time slot is not a valid "HH:MM" string
    InvalidTimeSlot = 5002,

    // ==================== 6xxx: Appointment ====================
    /// Appointment not found
    AppointmentNotFound = 6001,
    /// Requested slot conflicts with an existing appointment
    SlotUnavailable = 6002,
    /// Status transition not allowed by the lifecycle
    InvalidStatusTransition = 6003,
    /// Unknown appointment status value
    InvalidStatus = 6004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the HTTP status code for this error
    pub const fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            ErrorCode::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::InvalidFormat
            | ErrorCode::RequiredField
            | ErrorCode::ServiceInvalidDuration
            | ErrorCode::ServiceInvalidPrice
            | ErrorCode::InvalidDayOfWeek
            | ErrorCode::InvalidTimeSlot
            | ErrorCode::InvalidStatus => StatusCode::BAD_REQUEST,

            ErrorCode::NotAuthenticated
            | ErrorCode::InvalidCredentials
            | ErrorCode::TokenExpired
            | ErrorCode::TokenInvalid => StatusCode::UNAUTHORIZED,
            ErrorCode::PasswordTooShort => StatusCode::BAD_REQUEST,

            ErrorCode::PermissionDenied | ErrorCode::AdminRequired => StatusCode::FORBIDDEN,

            ErrorCode::NotFound
            | ErrorCode::ServiceNotFound
            | ErrorCode::ProfessionalNotFound
            | ErrorCode::AppointmentNotFound => StatusCode::NOT_FOUND,

            ErrorCode::AlreadyExists
            | ErrorCode::ProfessionalEmailExists
            | ErrorCode::SlotUnavailable => StatusCode::CONFLICT,

            ErrorCode::ProfessionalNotAssigned | ErrorCode::InvalidStatusTransition => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            ErrorCode::InternalError | ErrorCode::DatabaseError | ErrorCode::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            ErrorCode::ServiceNotFound => "Service not found",
            ErrorCode::ServiceInvalidDuration => "Service duration must be positive",
            ErrorCode::ServiceInvalidPrice => "Service price must be non-negative",

            ErrorCode::ProfessionalNotFound => "Professional not found",
            ErrorCode::ProfessionalEmailExists => "Professional email already exists",
            ErrorCode::ProfessionalNotAssigned => {
                "Professional does not offer the requested service"
            }

            ErrorCode::InvalidDayOfWeek => "Day of week must be between 0 and 6",
            ErrorCode::InvalidTimeSlot => "Time slot must be a valid HH:MM string",

            ErrorCode::AppointmentNotFound => "Appointment not found",
            ErrorCode::SlotUnavailable => "This time slot has just been booked by another customer",
            ErrorCode::InvalidStatusTransition => "Status transition not allowed",
            ErrorCode::InvalidStatus => "Unknown appointment status",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }

    /// System errors (9xxx) get logged at error level when returned to a client.
    #[inline]
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::PasswordTooShort),

            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            3001 => Ok(ErrorCode::ServiceNotFound),
            3002 => Ok(ErrorCode::ServiceInvalidDuration),
            3003 => Ok(ErrorCode::ServiceInvalidPrice),

            4001 => Ok(ErrorCode::ProfessionalNotFound),
            4002 => Ok(ErrorCode::ProfessionalEmailExists),
            4003 => Ok(ErrorCode::ProfessionalNotAssigned),

            5001 => Ok(ErrorCode::InvalidDayOfWeek),
            5002 => Ok(ErrorCode::InvalidTimeSlot),

            6001 => Ok(ErrorCode::AppointmentNotFound),
            6002 => Ok(ErrorCode::SlotUnavailable),
            6003 => Ok(ErrorCode::InvalidStatusTransition),
            6004 => Ok(ErrorCode::InvalidStatus),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Application error with structured error code and details.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a required-field error
    pub fn required_field(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    }
}

/// Unified API response structure.
///
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        if self.code.is_system() {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::RequiredField.code(), 7);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::AdminRequired.code(), 2002);
        assert_eq!(ErrorCode::ServiceNotFound.code(), 3001);
        assert_eq!(ErrorCode::ProfessionalNotFound.code(), 4001);
        assert_eq!(ErrorCode::InvalidTimeSlot.code(), 5002);
        assert_eq!(ErrorCode::AppointmentNotFound.code(), 6001);
        assert_eq!(ErrorCode::SlotUnavailable.code(), 6002);
        assert_eq!(ErrorCode::InvalidStatusTransition.code(), 6003);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_http_status() {
        assert_eq!(
            ErrorCode::SlotUnavailable.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::InvalidStatusTransition.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::AppointmentNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::AdminRequired.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_try_from() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(6002), Ok(ErrorCode::SlotUnavailable));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::SlotUnavailable).unwrap();
        assert_eq!(json, "6002");

        let code: ErrorCode = serde_json::from_str("6003").unwrap();
        assert_eq!(code, ErrorCode::InvalidStatusTransition);
    }

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::SlotUnavailable);
        assert_eq!(err.code, ErrorCode::SlotUnavailable);
        assert_eq!(
            err.message,
            "This time slot has just been booked by another customer"
        );
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_details() {
        let err = AppError::required_field("customer_name");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "customer_name is required");
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "customer_name");
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::new(ErrorCode::AppointmentNotFound);
        let response = ApiResponse::<()>::error(&err);
        assert_eq!(response.code, Some(6001));
        assert_eq!(response.message, "Appointment not found");
        assert!(response.data.is_none());
    }

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(vec!["09:00", "10:00"]);
        assert_eq!(response.code, Some(0));
        assert_eq!(response.message, "OK");
        assert_eq!(response.data, Some(vec!["09:00", "10:00"]));
    }

    #[test]
    fn test_is_system() {
        assert!(ErrorCode::InternalError.is_system());
        assert!(ErrorCode::DatabaseError.is_system());
        assert!(!ErrorCode::SlotUnavailable.is_system());
    }
}
