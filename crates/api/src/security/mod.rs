//! Response security policy
//!
//! Every response, including error and panic responses, passes through
//! [`security_headers_middleware`] before it is sent.

mod headers;

pub use headers::{
    content_security_policy, security_headers_middleware, InvalidPolicy, SecurityHeaders,
};
