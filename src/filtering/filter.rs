//! Filtering traits.
//!
//! Both traits answer the same question for a line (or any item): should it be kept?
//! `true` means the item passes the filter.

/// Stateless line predicate: the same line always gets the same answer.
pub trait Filter<T>: Default {
    fn detect(&self, item: T) -> bool;
}

/// Line predicate whose answer depends on previously seen lines.
///
/// The method name differs from [Filter::detect] so that a type can implement both
/// without ambiguous calls.
pub trait FilterMut<T>: Default {
    fn detect_mut(&mut self, item: T) -> bool;
}
