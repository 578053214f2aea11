// Security module for access control on the HTTP transport
//
// This module checks `Authorization: Bearer <token>` headers against the
// configured secret before a request reaches the protocol channel.

pub mod bearer;

pub use bearer::{BearerError, UNAUTHORIZED, validate_bearer};
