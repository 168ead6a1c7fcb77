//! Operations over composite values.
//!
//! [`OrderedCollection`] exposes arrays and lists through forward-only
//! cursors, and [`element_at`] / [`set_element_at`] step through any
//! collection with them. Nothing here branches on whether the collection is
//! fixed-size or growable.

// -----------------------------------------------------------------------------
// Modules

mod cursor;

// -----------------------------------------------------------------------------
// Exports

pub use cursor::{Cursor, CursorMut, ElementError, OrderedCollection};
pub use cursor::{element_at, set_element_at};
