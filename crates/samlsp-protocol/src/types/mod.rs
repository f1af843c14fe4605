//! SAML 2.0 types and data structures.
//!
//! The in-memory model of an `<samlp:AuthnRequest>` and its sub-elements.

mod authn_request;
mod conditions;
mod constants;
mod name_id;

pub use authn_request::*;
pub use conditions::*;
pub use constants::*;
pub use name_id::*;
