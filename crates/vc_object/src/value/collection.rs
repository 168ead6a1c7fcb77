use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::value::Value;

// -----------------------------------------------------------------------------
// ArrayRef

/// A shared handle to a fixed-size array.
///
/// Elements can be replaced but the length never changes.
///
/// # Examples
///
/// ```
/// use vc_object::{ArrayRef, Value};
///
/// let array = ArrayRef::from_iter([Value::Int(1), Value::Int(2)]);
/// assert_eq!(array.len(), 2);
/// assert_eq!(array.to_vec(), vec![Value::Int(1), Value::Int(2)]);
/// ```
#[derive(Clone)]
pub struct ArrayRef(pub(crate) Rc<RefCell<Box<[Value]>>>);

impl ArrayRef {
    /// Creates an array of `len` elements, each a clone of `fill`.
    pub fn filled(len: usize, fill: Value) -> Self {
        Self::from_iter(core::iter::repeat_n(fill, len))
    }

    /// Returns `true` if both handles refer to the same array.
    #[inline]
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the number of elements.
    ///
    /// # Panics
    ///
    /// Panics if the array is being written at the same time.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().to_vec()
    }
}

impl FromIterator<Value> for ArrayRef {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(Rc::new(RefCell::new(iter.into_iter().collect())))
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(items) => write!(f, "Array(len = {})", items.len()),
            Err(_) => f.write_str("Array(<busy>)"),
        }
    }
}

// -----------------------------------------------------------------------------
// ListRef

/// A shared handle to a growable list.
///
/// # Examples
///
/// ```
/// use vc_object::{ListRef, Value};
///
/// let list = ListRef::new();
/// list.push(Value::from("a"));
/// list.push(Value::from("b"));
///
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.pop(), Some(Value::from("b")));
/// ```
#[derive(Clone)]
pub struct ListRef(pub(crate) Rc<RefCell<Vec<Value>>>);

impl ListRef {
    /// Creates an empty list.
    #[inline]
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }

    /// Returns `true` if both handles refer to the same list.
    #[inline]
    pub fn ptr_eq(&self, other: &ListRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the number of elements.
    ///
    /// # Panics
    ///
    /// Panics if the list is being written at the same time.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an element.
    ///
    /// # Panics
    ///
    /// Panics if the list is being read or written at the same time.
    #[inline]
    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Removes the last element.
    ///
    /// # Panics
    ///
    /// Panics if the list is being read or written at the same time.
    #[inline]
    pub fn pop(&self) -> Option<Value> {
        self.0.borrow_mut().pop()
    }

    /// Shortens the list to `len` elements; does nothing if it is already shorter.
    ///
    /// # Panics
    ///
    /// Panics if the list is being read or written at the same time.
    #[inline]
    pub fn truncate(&self, len: usize) {
        self.0.borrow_mut().truncate(len);
    }

    /// Returns a copy of the elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }
}

impl Default for ListRef {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Value> for ListRef {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(Rc::new(RefCell::new(iter.into_iter().collect())))
    }
}

impl fmt::Debug for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(items) => write!(f, "List(len = {})", items.len()),
            Err(_) => f.write_str("List(<busy>)"),
        }
    }
}
