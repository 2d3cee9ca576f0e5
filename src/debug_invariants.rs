//! Output self-checks for insertion results.
//!
//! Types implementing [`DebugInvariants`] can verify their structural
//! invariants on demand. The checks also run automatically at the end of a
//! run in debug builds, or in release builds with the `check-invariants`
//! (alias `strict-invariants`) feature.

use crate::mesh_error::MeshError;

/// Structural self-check of a result type.
pub trait DebugInvariants {
    /// Panics on the first violated invariant when checks are compiled in;
    /// a no-op otherwise.
    fn debug_assert_invariants(&self);
    /// Checks every invariant and reports the first violation as
    /// [`MeshError::InvariantViolation`] (or the error of a failed lookup).
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

/// Evaluates a `Result`-returning check and panics with `ctx` on `Err`,
/// only when invariant checks are compiled in.
#[macro_export]
macro_rules! debug_invariants {
    ($check:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants", feature = "strict-invariants"))]
        if let Err(err) = $check {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), err);
        }
    };
}
