//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: tool descriptors, registry, dispatcher and tool definitions
//! - **store**: the upstream store API the tools read from

pub mod store;
pub mod tools;
