//! Left-precedence, zero-as-absence merging.
//!
//! [`MergeLeft`] combines two values of the same type. The left operand wins
//! unless it is the zero value for its type, in which case the right operand
//! is used. Structured types derive the trait with
//! [`#[derive(MergeLeft)]`](crate::MergeLeft), which walks visible fields and
//! recurses into nested structs; every other kind is merged as a whole.
//!
//! The merge cannot tell "explicitly set to zero" apart from "never set".
//! Fields that need that distinction should be `Option<T>`, whose `None` is
//! an unambiguous absence.
//!
//! # Example
//!
//! ```rust
//! use strata_config::{MergeLeft, merge_left};
//!
//! #[derive(Debug, Default, PartialEq, MergeLeft)]
//! struct Server {
//!     pub host: String,
//!     pub port: u16,
//! }
//!
//! let left = Server { host: "example.org".into(), port: 0 };
//! let right = Server { host: "localhost".into(), port: 8080 };
//! assert_eq!(
//!     merge_left(left, right),
//!     Server { host: "example.org".into(), port: 8080 },
//! );
//! ```

mod impls;

/// Types that can be merged with left precedence.
///
/// Implementations must keep [`MergeLeft::merge_left`] total: merging never
/// fails and both operands share the result's type. When the type also
/// implements `Default`, `T::default().is_zero()` must hold; resolution
/// decodes every layer over a default value and relies on untouched fields
/// being zero.
pub trait MergeLeft: Sized {
    /// Returns `true` when `self` is the zero value for its type.
    fn is_zero(&self) -> bool;

    /// Merge `right` under `self`.
    ///
    /// The default keeps `self` unless it is zero. Structured types override
    /// this to merge field by field.
    #[must_use]
    fn merge_left(self, right: Self) -> Self {
        if self.is_zero() { right } else { self }
    }
}

/// Merge `right` under `left`, returning the combined value.
///
/// Equivalent to `left.merge_left(right)`.
#[must_use]
pub fn merge_left<T: MergeLeft>(left: T, right: T) -> T {
    left.merge_left(right)
}
