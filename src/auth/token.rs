//! Token models: the normalized provider record and its redacting secret wrapper.

pub mod record;
pub mod secret;
