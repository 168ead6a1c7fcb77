use core::cell::{Ref, RefMut};

use thiserror::Error;

use crate::error::StorageError;
use crate::value::{ArrayRef, ListRef, Value};

// -----------------------------------------------------------------------------
// Cursor

/// A forward-only read cursor over the elements of an [`OrderedCollection`].
///
/// A new cursor is positioned *before* the first element; call
/// [`advance`](Cursor::advance) to move onto it.
pub struct Cursor<'a> {
    items: Ref<'a, [Value]>,
    // Number of successful `advance` calls.
    position: usize,
}

impl<'a> Cursor<'a> {
    #[inline]
    fn new(items: Ref<'a, [Value]>) -> Self {
        Self { items, position: 0 }
    }

    /// Moves to the next element. Returns `false` once the end is passed.
    #[inline]
    pub fn advance(&mut self) -> bool {
        if self.position < self.items.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Returns the element under the cursor.
    #[inline]
    pub fn current(&self) -> Option<&Value> {
        self.items.get(self.position.checked_sub(1)?)
    }

    /// Returns how many elements the cursor has moved onto.
    #[inline]
    pub fn visited(&self) -> usize {
        self.position
    }
}

/// A forward-only write cursor, see [`Cursor`].
pub struct CursorMut<'a> {
    items: RefMut<'a, [Value]>,
    position: usize,
}

impl<'a> CursorMut<'a> {
    #[inline]
    fn new(items: RefMut<'a, [Value]>) -> Self {
        Self { items, position: 0 }
    }

    /// Moves to the next element. Returns `false` once the end is passed.
    #[inline]
    pub fn advance(&mut self) -> bool {
        if self.position < self.items.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Returns the element under the cursor.
    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut Value> {
        let index = self.position.checked_sub(1)?;
        self.items.get_mut(index)
    }

    /// Returns how many elements the cursor has moved onto.
    #[inline]
    pub fn visited(&self) -> usize {
        self.position
    }
}

// -----------------------------------------------------------------------------
// OrderedCollection

/// A collection whose elements have a stable iteration order.
///
/// Implemented by [`ArrayRef`] and [`ListRef`]. Only cursors are exposed, so
/// code written against this trait cannot depend on random access.
pub trait OrderedCollection {
    /// Opens a read cursor.
    fn cursor(&self) -> Result<Cursor<'_>, StorageError>;

    /// Opens a write cursor. Elements can be replaced but not added or removed.
    fn cursor_mut(&self) -> Result<CursorMut<'_>, StorageError>;
}

impl OrderedCollection for ArrayRef {
    fn cursor(&self) -> Result<Cursor<'_>, StorageError> {
        let items = self.0.try_borrow().map_err(|_| StorageError::Busy)?;
        Ok(Cursor::new(Ref::map(items, |items| &**items)))
    }

    fn cursor_mut(&self) -> Result<CursorMut<'_>, StorageError> {
        let items = self.0.try_borrow_mut().map_err(|_| StorageError::Busy)?;
        Ok(CursorMut::new(RefMut::map(items, |items| &mut **items)))
    }
}

impl OrderedCollection for ListRef {
    fn cursor(&self) -> Result<Cursor<'_>, StorageError> {
        let items = self.0.try_borrow().map_err(|_| StorageError::Busy)?;
        Ok(Cursor::new(Ref::map(items, |items| items.as_slice())))
    }

    fn cursor_mut(&self) -> Result<CursorMut<'_>, StorageError> {
        let items = self.0.try_borrow_mut().map_err(|_| StorageError::Busy)?;
        Ok(CursorMut::new(RefMut::map(items, |items| items.as_mut_slice())))
    }
}

// -----------------------------------------------------------------------------
// Element access

/// An error returned from [`element_at`] or [`set_element_at`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ElementError {
    #[error("index {index} is out of range for a collection of {len} elements")]
    OutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Returns a clone of the element at `index`, walking a cursor from the start.
///
/// # Examples
///
/// ```
/// use vc_object::{ArrayRef, ListRef, Value};
/// use vc_object::ops::{ElementError, element_at};
///
/// let array = ArrayRef::from_iter([Value::Int(10), Value::Int(20)]);
/// let list = ListRef::from_iter([Value::Int(10), Value::Int(20)]);
///
/// assert_eq!(element_at(&array, 1), Ok(Value::Int(20)));
/// assert_eq!(element_at(&list, 1), Ok(Value::Int(20)));
/// assert_eq!(
///     element_at(&list, 2),
///     Err(ElementError::OutOfRange { index: 2, len: 2 }),
/// );
/// ```
pub fn element_at(collection: &dyn OrderedCollection, index: usize) -> Result<Value, ElementError> {
    let mut cursor = collection.cursor()?;
    for _ in 0..=index {
        if !cursor.advance() {
            return Err(ElementError::OutOfRange {
                index,
                len: cursor.visited(),
            });
        }
    }
    match cursor.current() {
        Some(value) => Ok(value.clone()),
        None => Err(ElementError::OutOfRange {
            index,
            len: cursor.visited(),
        }),
    }
}

/// Replaces the element at `index` in place, walking a cursor from the start.
///
/// Nothing is written when `index` is out of range.
///
/// # Examples
///
/// ```
/// use vc_object::{ListRef, Value};
/// use vc_object::ops::set_element_at;
///
/// let list = ListRef::from_iter([Value::Int(1), Value::Int(2)]);
/// set_element_at(&list, 0, Value::Int(7)).unwrap();
///
/// assert_eq!(list.to_vec(), vec![Value::Int(7), Value::Int(2)]);
/// assert!(set_element_at(&list, 5, Value::Null).is_err());
/// ```
pub fn set_element_at(
    collection: &dyn OrderedCollection,
    index: usize,
    value: Value,
) -> Result<(), ElementError> {
    let mut cursor = collection.cursor_mut()?;
    for _ in 0..=index {
        if !cursor.advance() {
            return Err(ElementError::OutOfRange {
                index,
                len: cursor.visited(),
            });
        }
    }
    let len = cursor.visited();
    match cursor.current_mut() {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(ElementError::OutOfRange { index, len }),
    }
}
