//! Shared payload handles and the runtime type tag.
//!
//! [`ValueRef`] is the opaque reference an [`Array`](crate::Array) stores:
//! a shared handle (`Rc<RefCell<..>>`) to a caller-owned [`Value`].
//! Cloning a `ValueRef` copies the reference, never the payload, so two
//! tables holding clones of the same handle observe each other's payload
//! mutations while remaining independent tables.
//!
//! [`TypeTag`] is the closed interpretation set. All tag-driven behavior
//! (equality for `find`, rendering for display) dispatches through the
//! methods here rather than conditionals scattered across operations.

use std::any::Any;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Runtime interpretation of an array's elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTag {
    /// 64-bit signed integer; enables `sum` and `sort`.
    Integer,
    /// Single character.
    Character,
    /// Text; compared by full content, rendered quoted.
    Text,
    /// Untyped payload; rendered by reference identity, equality undefined.
    Opaque,
}

impl TypeTag {
    /// Tag-specific element equality, used by `find`.
    ///
    /// A payload whose variant does not match the tag never compares
    /// equal. Opaque equality is undefined and always `false`.
    pub(crate) fn matches(self, a: &ValueRef, b: &ValueRef) -> bool {
        match self {
            Self::Integer => match (a.as_int(), b.as_int()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
            Self::Character => match (a.as_char(), b.as_char()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
            Self::Text => match (a.as_text(), b.as_text()) {
                (Some(x), Some(y)) => *x == *y,
                _ => false,
            },
            Self::Opaque => false,
        }
    }

    /// Tag-specific element rendering, used by the array's `Display`.
    ///
    /// Mismatched payloads fall back to reference identity.
    pub(crate) fn render(self, v: &ValueRef, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => match v.as_int() {
                Some(i) => write!(f, "{i}"),
                None => write!(f, "{:p}", v.addr()),
            },
            Self::Character => match v.as_char() {
                Some(c) => write!(f, "{c}"),
                None => write!(f, "{:p}", v.addr()),
            },
            Self::Text => match v.as_text() {
                Some(s) => write!(f, "\"{}\"", &*s),
                None => write!(f, "{:p}", v.addr()),
            },
            Self::Opaque => write!(f, "{:p}", v.addr()),
        }
    }
}

/// A payload a [`ValueRef`] points at.
pub enum Value {
    /// 64-bit signed integer.
    Int(i64),
    /// Single character.
    Char(char),
    /// Owned text.
    Text(String),
    /// Anything else; the array never looks inside.
    Opaque(Box<dyn Any>),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

/// Shared handle to a caller-owned [`Value`].
///
/// Arrays store and clone these freely; the payload itself is shared by
/// identity. [`ValueRef::set`] replaces the payload in place, visible
/// through every handle to it.
#[derive(Clone)]
pub struct ValueRef(Rc<RefCell<Value>>);

impl ValueRef {
    /// Wrap a payload in a fresh shared handle.
    pub fn new(value: Value) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Handle to a fresh integer payload.
    pub fn int(v: i64) -> Self {
        Self::new(Value::Int(v))
    }

    /// Handle to a fresh character payload.
    pub fn character(c: char) -> Self {
        Self::new(Value::Char(c))
    }

    /// Handle to a fresh text payload.
    pub fn text(s: impl Into<String>) -> Self {
        Self::new(Value::Text(s.into()))
    }

    /// Handle to a fresh opaque payload.
    pub fn opaque(payload: Box<dyn Any>) -> Self {
        Self::new(Value::Opaque(payload))
    }

    /// The integer payload, if this handle points at one.
    pub fn as_int(&self) -> Option<i64> {
        match *self.0.borrow() {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }

    /// The character payload, if this handle points at one.
    pub fn as_char(&self) -> Option<char> {
        match *self.0.borrow() {
            Value::Char(c) => Some(c),
            _ => None,
        }
    }

    /// Borrow of the text payload, if this handle points at one.
    pub fn as_text(&self) -> Option<Ref<'_, str>> {
        Ref::filter_map(self.0.borrow(), |v| match v {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        })
        .ok()
    }

    /// Replace the payload in place. Every handle sharing it sees the new
    /// value.
    pub fn set(&self, value: Value) {
        *self.0.borrow_mut() = value;
    }

    /// Whether two handles name the same payload.
    pub fn same(a: &ValueRef, b: &ValueRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Payload identity, for opaque rendering.
    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }
}

impl fmt::Debug for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueRef({:?})", self.0.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        assert_eq!(ValueRef::int(5).as_int(), Some(5));
        assert_eq!(ValueRef::int(5).as_char(), None);
        assert_eq!(ValueRef::character('x').as_char(), Some('x'));
        let t = ValueRef::text("hi");
        assert_eq!(t.as_text().as_deref(), Some("hi"));
        assert_eq!(t.as_int(), None);
    }

    #[test]
    fn clone_shares_payload_identity() {
        let a = ValueRef::int(1);
        let b = a.clone();
        assert!(ValueRef::same(&a, &b));
        b.set(Value::Int(42));
        assert_eq!(a.as_int(), Some(42));
        assert!(!ValueRef::same(&a, &ValueRef::int(42)));
    }

    #[test]
    fn tag_equality_is_tag_specific() {
        let five = ValueRef::int(5);
        assert!(TypeTag::Integer.matches(&five, &ValueRef::int(5)));
        assert!(!TypeTag::Integer.matches(&five, &ValueRef::int(6)));
        // Under a mismatching tag nothing compares equal.
        assert!(!TypeTag::Character.matches(&five, &five));
        assert!(!TypeTag::Opaque.matches(&five, &five));
        assert!(TypeTag::Text.matches(&ValueRef::text("ab"), &ValueRef::text("ab")));
    }

    #[test]
    fn opaque_payload_round_trips_through_any() {
        let v = ValueRef::opaque(Box::new(vec![1u32, 2, 3]));
        assert_eq!(v.as_int(), None);
        assert!(v.as_text().is_none());
    }

    #[test]
    fn debug_never_exposes_opaque_contents() {
        let v = ValueRef::opaque(Box::new(7u8));
        assert_eq!(format!("{v:?}"), "ValueRef(Opaque(..))");
    }
}
