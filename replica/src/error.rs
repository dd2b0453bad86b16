use crate::Shape;

/// Precondition violations of the copy entry points.
///
/// Mismatches between source and destination are not errors: the copier skips
/// the subtrees it cannot copy. These variants only cover calls that make no
/// sense at all, and are returned by the `try_` entry points. The other entry
/// points panic with the same message.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum CopyError {
    /// `copy_into` was given no destination.
    NullDestination,

    /// `copy_of` was given a source that is not a pointer, so there is no
    /// pointee type to allocate.
    NotAPointer {
        /// The shape of the source.
        shape: &'static Shape,
    },
}

impl core::fmt::Display for CopyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CopyError::NullDestination => write!(f, "copy destination cannot be None"),
            CopyError::NotAPointer { shape } => {
                write!(f, "copy_of needs a pointer source, but got {shape}")
            }
        }
    }
}

impl core::error::Error for CopyError {}
