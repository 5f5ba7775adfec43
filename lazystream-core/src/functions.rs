//! Free-standing helpers used as arguments to stream operators.

use anyhow::{Result, anyhow};

/// Returns its argument unchanged.
///
/// Handy as a projection when grouping should keep whole elements:
/// `stream.key_by(..).group_by_key(identity)`.
pub fn identity<T>(value: T) -> T {
    value
}

/// Unwraps `value`, or fails with `message` when it is `None`.
pub fn require_some<T>(value: Option<T>, message: &str) -> Result<T> {
    value.ok_or_else(|| anyhow!("{message}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(identity(42), 42);
        assert_eq!(identity("foo"), "foo");
    }

    #[test]
    fn test_require_some_present() {
        assert_eq!(require_some(Some(7), "missing").unwrap(), 7);
    }

    #[test]
    fn test_require_some_missing() {
        let err = require_some::<i32>(None, "user id is required").unwrap_err();
        assert_eq!(err.to_string(), "user id is required");
    }
}
