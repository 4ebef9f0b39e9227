//! Domain-level constants.
//!
//! These constants define business rules, defaults and option sets.

// =============================================================================
// User Roles
// =============================================================================

/// Self-service role linked to one employee record
pub const ROLE_USER: &str = "user";

/// Administrator role with full management privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Identifiers
// =============================================================================

/// Prefix of generated employee ids
pub const EMPLOYEE_ID_PREFIX: &str = "pegawai";

/// Prefix of generated account ids
pub const ACCOUNT_ID_PREFIX: &str = "user";

/// Prefix of generated child ids
pub const CHILD_ID_PREFIX: &str = "anak";

/// Prefix of generated education entry ids
pub const EDUCATION_ID_PREFIX: &str = "pend";

// =============================================================================
// Employee defaults
// =============================================================================

/// Position assigned to employees created through self-registration
pub const DEFAULT_POSITION: &str = "New Employee";

/// Default religion of a blank employee record
pub const DEFAULT_RELIGION: &str = "Islam";

/// Suggested religion values. Free text is still accepted.
pub const RELIGION_OPTIONS: &[&str] = &[
    DEFAULT_RELIGION,
    "Kristen Protestan",
    "Katolik",
    "Hindu",
    "Buddha",
    "Konghucu",
];

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: usize = 1;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Durable client session
// =============================================================================

/// Storage key of the serialized session user
pub const SESSION_USER_KEY: &str = "session.user";

/// Storage key of the opaque session token
pub const SESSION_TOKEN_KEY: &str = "session.token";
