//! This module defines the trait [ByteSized],
//! which is implemented by columns and metadata
//! to report their own size.

use std::mem::size_of;

/// Objects that are able calculate their current approximate size in bytes.
///
/// We use `u64` rather than `usize` here to avoid overflows in case of overestimations.
pub trait ByteSized {
    /// Return the number of bytes this object consumes
    fn size_bytes(&self) -> u64;
}

/// Computes the memory required for managing the content of a slice using only
/// the direct size of content objects, without taking into accont any data they might point to.
pub(crate) fn size_inner_slice_flat<T>(object: &[T]) -> u64 {
    object.len() as u64 * size_of::<T>() as u64
}

impl ByteSized for String {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64 + self.capacity() as u64
    }
}
