//! Shared utility functions.

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Classify an std::io::Error from spawning an external tool: a missing
/// binary is reported differently from a genuine I/O failure.
pub fn is_not_found(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::NotFound
}
