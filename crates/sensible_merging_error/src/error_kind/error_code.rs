pub const INVALID_OPTIONS: &str = "INVALID_OPTIONS";
pub const CHUNK_NOT_FOUND: &str = "CHUNK_NOT_FOUND";
pub const INTEGRATION_REJECTED: &str = "INTEGRATION_REJECTED";
pub const PANIC: &str = "PANIC";
