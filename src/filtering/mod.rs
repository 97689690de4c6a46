/*! Filtering utilities

Line-level filters for word vector files.

Filters implement [filter::Filter], [filter::FilterMut] or both:
- [filter::Filter] is implemented for filters that do not have state (see [quotes::Quotes] for example)
- [filter::FilterMut] is implemented for filter that do have state (see [vocab::Keys], which forgets keys once they are found).
! */
mod filter;
pub mod quotes;
pub mod vocab;

pub use filter::Filter;
pub use filter::FilterMut;
