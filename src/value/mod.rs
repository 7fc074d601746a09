//! Value model for equality and rendering.
//!
//! Values are inspected into a [`Shape`], a closed set of variants the equality engine and
//! the formatter dispatch over:
//!
//! - `Nil` - the absence value (`Nil`, `None`, a null pointer)
//! - `Scalar` - a leaf with a type identity, display text and comparison key
//! - `Sequence` - ordered elements
//! - `Mapping` - key/value entries in the map's iteration order
//! - `Opaque` - a handle that can only be compared by address
//!
//! ## Type identity
//!
//! Values of different types are never equal. Types are told apart by [`type_key`]: the
//! full `std::any::type_name` with references and smart pointers unwrapped and every
//! string type (`str`, `String`, `Cow<str>`) folded into `str`. So `String::from("x")`
//! equals `"x"`, while two `Id` types from different modules stay distinct. Short names
//! ([`short_type_name`]) are for display only.
//!
//! ## Modules
//!
//! - `inspect` - `Inspect` implementations for std types
//! - `equal` - nil-aware deep equality
//! - `render` - value → text

mod equal;
mod inspect;
mod render;

pub use equal::{equal, equal_inspected, is_nil};
pub use render::{render, render_pair};

use std::fmt::Debug;

/// Conversion of a value into its [`Shape`] for comparison and display.
///
/// Implemented for scalars, strings, `Option`, std collections, smart pointers, raw
/// pointers and channel endpoints. Implement it for your own types, or use
/// [`crate::inspect_debug!`] to compare and print them through `Debug`.
///
/// Channel endpoints (`Sender`, `SyncSender`, `Receiver`) are compared by the address of
/// the endpoint value, not by the channel behind it: a clone of a `Sender` is a different
/// value and does not equal the original. std offers no stable channel identity.
pub trait Inspect {
    fn shape(&self) -> Shape;

    /// Dynamic type name, without module paths (`Vec<String>`, not `alloc::vec::Vec<..>`).
    fn type_name(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Type identity compared by [`equal`]. See [`type_key`].
    fn type_key(&self) -> String {
        type_key(std::any::type_name::<Self>())
    }
}

/// The literal absence value: `is.equal(value, Nil)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nil;

/// Structural view of a value.
#[derive(Debug, Clone)]
pub enum Shape {
    Nil,
    Scalar(Scalar),
    Sequence(Vec<Shape>),
    Mapping(Vec<(Shape, Shape)>),
    Opaque { type_key: String, addr: usize },
}

/// A leaf value.
#[derive(Debug, Clone)]
pub struct Scalar {
    /// Type identity, as produced by [`type_key`].
    pub type_key: String,
    /// What the value looks like in a failure message.
    pub text: String,
    /// What the value is compared by.
    pub key: ScalarKey,
}

/// Comparison key of a scalar. Floats follow IEEE semantics (`NaN != NaN`).
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarKey {
    Unit,
    Bool(bool),
    Int(i128),
    Uint(u128),
    Float(f64),
    Char(char),
    Str(String),
}

impl Shape {
    /// A scalar of type `T`.
    pub fn scalar<T: ?Sized>(text: impl Into<String>, key: ScalarKey) -> Self {
        Shape::Scalar(Scalar {
            type_key: type_key(std::any::type_name::<T>()),
            text: text.into(),
            key,
        })
    }

    /// A scalar compared and displayed by its `Debug` output.
    pub fn debug<T: Debug + ?Sized>(value: &T) -> Self {
        let text = format!("{value:?}");
        Shape::scalar::<T>(text.clone(), ScalarKey::Str(text))
    }

    /// An address-only handle of type `T`.
    pub fn opaque<T: ?Sized>(addr: usize) -> Self {
        Shape::Opaque {
            type_key: type_key(std::any::type_name::<T>()),
            addr,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Shape::Nil)
    }
}

/// A value's type name together with its shape, computed once per comparison.
#[derive(Debug, Clone)]
pub struct Inspected {
    /// Display name.
    pub type_name: String,
    /// Identity compared for equality.
    pub type_key: String,
    pub shape: Shape,
}

impl Inspected {
    pub fn of<T: Inspect + ?Sized>(value: &T) -> Self {
        Self {
            type_name: value.type_name(),
            type_key: value.type_key(),
            shape: value.shape(),
        }
    }

    pub fn is_nil(&self) -> bool {
        self.shape.is_nil()
    }

    pub fn render(&self) -> String {
        render::render_shape(&self.shape)
    }
}

/// Strip module paths from a `std::any::type_name` string.
///
/// `std::collections::hash::map::HashMap<alloc::string::String, i32>` becomes
/// `HashMap<String, i32>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    out
}

const STRING_PATH: &str = "alloc::string::String";

/// Wrappers that are transparent for type identity (`Cow` only ever wraps `str` here).
const TRANSPARENT_PATHS: [&str; 4] = [
    "alloc::boxed::Box<",
    "alloc::rc::Rc<",
    "alloc::sync::Arc<",
    "alloc::borrow::Cow<",
];

/// Canonical type identity of a `std::any::type_name` string.
///
/// Module paths are kept. References (`&`, `&mut`) and `Box`/`Rc`/`Arc`/`Cow` wrappers
/// are unwrapped, and `String` becomes `str`:
///
/// ```
/// use is_harness::value::type_key;
///
/// assert_eq!(type_key("alloc::string::String"), "str");
/// assert_eq!(type_key("alloc::vec::Vec<&str>"), "alloc::vec::Vec<str>");
/// assert_eq!(type_key("alloc::boxed::Box<i32>"), "i32");
/// assert_ne!(type_key("app::a::Id"), type_key("app::b::Id"));
/// ```
pub fn type_key(full: &str) -> String {
    let mut key = full.replace("&mut ", "").replace('&', "").replace(STRING_PATH, "str");
    for wrapper in TRANSPARENT_PATHS {
        while let Some(start) = key.find(wrapper) {
            let open = start + wrapper.len();
            let Some(close) = closing_bracket(&key[open..]) else {
                break;
            };
            let inner = first_argument(&key[open..open + close]).to_string();
            key = format!("{}{}{}", &key[..start], inner, &key[open + close + 1..]);
        }
    }
    key
}

/// Offset of the `>` closing an already opened `<`, ignoring the `->` of fn types.
fn closing_bracket(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut prev = None;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if prev != Some('-') => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        prev = Some(c);
    }
    None
}

/// First top-level generic argument (`T` of `Box<T, A>`).
fn first_argument(args: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in args.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return args[..i].trim(),
            _ => {}
        }
    }
    args.trim()
}

/// Implement [`Inspect`] for types through their `Debug` output.
///
/// ```
/// #[derive(Debug)]
/// struct Point { x: i32, y: i32 }
///
/// is_harness::inspect_debug!(Point);
///
/// assert!(is_harness::value::equal(&Point { x: 1, y: 2 }, &Point { x: 1, y: 2 }));
/// ```
#[macro_export]
macro_rules! inspect_debug {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::value::Inspect for $ty {
                fn shape(&self) -> $crate::value::Shape {
                    $crate::value::Shape::debug(self)
                }
            }
        )+
    };
}
