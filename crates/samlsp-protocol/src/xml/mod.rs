//! XML rendering and read-back of authentication requests.
//!
//! Rendering is deterministic: attributes and elements are written in
//! schema order, nothing is indented, and unset optional values produce no
//! markup. The bytes produced are the bytes a signer should digest.

mod reader;
mod writer;

pub use reader::{parse_authn_request, ParsedAuthnRequest};
