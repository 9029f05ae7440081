//! Strongly-typed namespace ("app") name.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// A non-empty, already formatted namespace name (e.g. `catalog`).
    ///
    /// Version prefixes such as `apps.v1.` are stripped before a value of
    /// this type is constructed; see [`crate::catalog::format_namespace`].
    pub struct NamespaceName;
}
