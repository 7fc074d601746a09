//! `Inspect` implementations for std types.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};

use super::{Inspect, Nil, ScalarKey, Shape};

macro_rules! inspect_int {
    ($key:ident as $wide:ty: $($t:ty),+) => {
        $(
            impl Inspect for $t {
                fn shape(&self) -> Shape {
                    Shape::scalar::<$t>(self.to_string(), ScalarKey::$key(*self as $wide))
                }
            }
        )+
    };
}

inspect_int!(Int as i128: i8, i16, i32, i64, i128, isize);
inspect_int!(Uint as u128: u8, u16, u32, u64, u128, usize);

impl Inspect for f32 {
    fn shape(&self) -> Shape {
        Shape::scalar::<f32>(self.to_string(), ScalarKey::Float(f64::from(*self)))
    }
}

impl Inspect for f64 {
    fn shape(&self) -> Shape {
        Shape::scalar::<f64>(self.to_string(), ScalarKey::Float(*self))
    }
}

impl Inspect for bool {
    fn shape(&self) -> Shape {
        Shape::scalar::<bool>(self.to_string(), ScalarKey::Bool(*self))
    }
}

impl Inspect for char {
    fn shape(&self) -> Shape {
        Shape::scalar::<char>(self.to_string(), ScalarKey::Char(*self))
    }
}

impl Inspect for () {
    fn shape(&self) -> Shape {
        Shape::scalar::<()>("()", ScalarKey::Unit)
    }
}

impl Inspect for str {
    fn shape(&self) -> Shape {
        Shape::scalar::<str>(self, ScalarKey::Str(self.to_string()))
    }
}

impl Inspect for String {
    fn shape(&self) -> Shape {
        Shape::scalar::<String>(self.as_str(), ScalarKey::Str(self.clone()))
    }
}

impl Inspect for Cow<'_, str> {
    fn shape(&self) -> Shape {
        Shape::scalar::<Cow<'_, str>>(self.as_ref(), ScalarKey::Str(self.to_string()))
    }
}

impl Inspect for Nil {
    fn shape(&self) -> Shape {
        Shape::Nil
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn shape(&self) -> Shape {
        match self {
            Some(value) => value.shape(),
            None => Shape::Nil,
        }
    }
}

// ============================================================================
// Transparent wrappers: the dynamic type is the pointee's
// ============================================================================

macro_rules! inspect_transparent {
    ($($wrapper:ident),+) => {
        $(
            impl<T: Inspect + ?Sized> Inspect for $wrapper<T> {
                fn shape(&self) -> Shape {
                    (**self).shape()
                }

                fn type_name(&self) -> String {
                    (**self).type_name()
                }

                fn type_key(&self) -> String {
                    (**self).type_key()
                }
            }
        )+
    };
}

inspect_transparent!(Box, Rc, Arc);

impl<T: Inspect + ?Sized> Inspect for &T {
    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn type_name(&self) -> String {
        (**self).type_name()
    }

    fn type_key(&self) -> String {
        (**self).type_key()
    }
}

impl<T: Inspect + ?Sized> Inspect for &mut T {
    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn type_name(&self) -> String {
        (**self).type_name()
    }

    fn type_key(&self) -> String {
        (**self).type_key()
    }
}

// ============================================================================
// Sequences and mappings
// ============================================================================

impl<T: Inspect> Inspect for [T] {
    fn shape(&self) -> Shape {
        Shape::Sequence(self.iter().map(Inspect::shape).collect())
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn shape(&self) -> Shape {
        self.as_slice().shape()
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn shape(&self) -> Shape {
        self.as_slice().shape()
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn shape(&self) -> Shape {
        Shape::Sequence(self.iter().map(Inspect::shape).collect())
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn shape(&self) -> Shape {
        Shape::Sequence(self.iter().map(Inspect::shape).collect())
    }
}

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn shape(&self) -> Shape {
        Shape::Mapping(self.iter().map(|(k, v)| (k.shape(), v.shape())).collect())
    }

    fn type_name(&self) -> String {
        super::short_type_name(&format!(
            "HashMap<{}, {}>",
            std::any::type_name::<K>(),
            std::any::type_name::<V>()
        ))
    }

    fn type_key(&self) -> String {
        super::type_key(&format!(
            "std::collections::hash::map::HashMap<{}, {}>",
            std::any::type_name::<K>(),
            std::any::type_name::<V>()
        ))
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn shape(&self) -> Shape {
        Shape::Mapping(self.iter().map(|(k, v)| (k.shape(), v.shape())).collect())
    }
}

macro_rules! inspect_tuple {
    ($(($($name:ident . $idx:tt),+)),+) => {
        $(
            impl<$($name: Inspect),+> Inspect for ($($name,)+) {
                fn shape(&self) -> Shape {
                    Shape::Sequence(vec![$(self.$idx.shape()),+])
                }
            }
        )+
    };
}

inspect_tuple!((A.0), (A.0, B.1), (A.0, B.1, C.2), (A.0, B.1, C.2, D.3));

// ============================================================================
// Opaque handles: compared by address only. A channel endpoint's address is that of
// the endpoint value, so clones of one `Sender` are distinct handles.
// ============================================================================

impl<T: ?Sized> Inspect for *const T {
    fn shape(&self) -> Shape {
        if self.is_null() {
            Shape::Nil
        } else {
            Shape::opaque::<*const T>(self.cast::<()>() as usize)
        }
    }
}

impl<T: ?Sized> Inspect for *mut T {
    fn shape(&self) -> Shape {
        if self.is_null() {
            Shape::Nil
        } else {
            Shape::opaque::<*mut T>(self.cast::<()>() as usize)
        }
    }
}

macro_rules! inspect_handle {
    ($($handle:ident),+) => {
        $(
            impl<T> Inspect for $handle<T> {
                fn shape(&self) -> Shape {
                    Shape::opaque::<$handle<T>>(self as *const Self as usize)
                }
            }
        )+
    };
}

inspect_handle!(Sender, SyncSender, Receiver);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    #[test]
    fn test_scalars_carry_type_and_key() {
        let Shape::Scalar(Scalar { type_key, text, key }) = 7u16.shape() else {
            panic!("expected scalar");
        };
        assert_eq!(type_key, "u16");
        assert_eq!(text, "7");
        assert_eq!(key, ScalarKey::Uint(7));
    }

    #[test]
    fn test_none_and_null_are_nil() {
        assert!(None::<i32>.shape().is_nil());
        assert!(std::ptr::null::<u8>().shape().is_nil());
        assert!(std::ptr::null_mut::<u8>().shape().is_nil());
        assert!(Nil.shape().is_nil());
        assert!(!Some(0).shape().is_nil());
        assert!(!Vec::<i32>::new().shape().is_nil());
    }

    #[test]
    fn test_wrappers_are_transparent() {
        let boxed: Box<dyn Inspect> = Box::new(5i64);
        assert_eq!(boxed.type_name(), "i64");
        assert_eq!(Rc::new(String::from("x")).type_name(), "String");
        assert_eq!((&&3u8).type_name(), "u8");
    }

    #[test]
    fn test_hash_map_type_name_omits_hasher() {
        let map: HashMap<String, i32> = HashMap::new();
        assert_eq!(map.type_name(), "HashMap<String, i32>");
    }

    #[test]
    fn test_tuple_is_a_sequence() {
        let Shape::Sequence(items) = (1, "two", 3.0).shape() else {
            panic!("expected sequence");
        };
        assert_eq!(items.len(), 3);
    }
}
