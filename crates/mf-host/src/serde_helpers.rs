//! Shared serde helper functions used across multiple modules.

/// Serde default function that returns `true`.
///
/// Used for boolean flags that are on unless a definition turns them off.
pub fn default_true() -> bool {
    true
}
