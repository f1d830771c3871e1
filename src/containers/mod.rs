//! Record containers under comparison
//!
//! - **`StaticVec<T>`** - contiguous, fixed-capacity storage; one allocation,
//!   elements constructed in place
//! - **`BoxedVec<T>`** - a growable sequence of owning handles; one allocation
//!   per element plus the handle array

mod static_vec;

pub use static_vec::StaticVec;

/// Sequence of individually boxed elements
///
/// Each element lives in its own heap allocation, so neighbouring elements
/// have unrelated addresses.
pub type BoxedVec<T> = Vec<Box<T>>;
