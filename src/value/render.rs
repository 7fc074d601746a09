//! Value → text for failure messages.

use super::{Inspect, Inspected, Shape};

/// Render a value the way a failure message shows it.
///
/// Mappings flatten to `key:value key:value`, sequences to `a b c`, nil-like values to
/// `nil`. Mapping order is the map's own iteration order.
pub fn render<T: Inspect + ?Sized>(value: &T) -> String {
    render_shape(&value.shape())
}

/// Render both sides of a comparison.
///
/// When neither side is nil and their types differ, each rendering is wrapped in its type
/// name (`i32(1)`, `i64(1)`) so equal-looking values can be told apart. Types whose short
/// names collide are shown with their full paths.
pub fn render_pair(a: &Inspected, b: &Inspected) -> (String, String) {
    let (a_text, b_text) = (a.render(), b.render());
    if a.is_nil() || b.is_nil() || a.type_key == b.type_key {
        return (a_text, b_text);
    }
    let (a_name, b_name) = if a.type_name == b.type_name {
        (&a.type_key, &b.type_key)
    } else {
        (&a.type_name, &b.type_name)
    };
    (format!("{a_name}({a_text})"), format!("{b_name}({b_text})"))
}

pub(super) fn render_shape(shape: &Shape) -> String {
    match shape {
        Shape::Nil => "nil".to_string(),
        Shape::Scalar(scalar) => scalar.text.clone(),
        Shape::Sequence(items) => join(items.iter().map(render_shape)),
        Shape::Mapping(entries) => join(
            entries
                .iter()
                .map(|(key, value)| format!("{}:{}", render_shape(key), render_shape(value))),
        ),
        Shape::Opaque { addr, .. } => format!("{addr:#x}"),
    }
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(" ").trim().to_string()
}
