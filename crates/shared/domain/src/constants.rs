//! Domain-level constants.
//!
//! These constants name the stores, wire codes and token defaults shared by
//! every service.

// =============================================================================
// Document Store
// =============================================================================

/// Collection (table) holding one profile document per user
pub const PROFILE_COLLECTION: &str = "usuarios";

// =============================================================================
// Callable Error Codes
// =============================================================================

/// Caller has no verified identity
pub const CODE_UNAUTHENTICATED: &str = "unauthenticated";

/// Request payload is missing a required field
pub const CODE_INVALID_ARGUMENT: &str = "invalid-argument";

/// Any failure while touching the stores
pub const CODE_INTERNAL: &str = "internal";

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
