//! Messages used when a failure carries no text of its own.

pub const INTERNAL_ERROR: &str = "An internal server error occurred";
pub const ROUTE_NOT_FOUND: &str = "The requested resource was not found";
