pub mod validate;

pub use validate::{extract_host_from_uri, redact_uri_password, validate_mongodb_uri};
