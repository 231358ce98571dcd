use std::any;

/// A readable name for `T`: its type name with every module path removed.
///
/// # Examples
///
/// ```
/// use seq_bench::{TrivialSmall, type_label};
///
/// assert_eq!(type_label::<TrivialSmall>(), "Trivial<8>");
/// assert_eq!(type_label::<Vec<String>>(), "Vec<String>");
/// ```
#[must_use]
pub fn type_label<T: ?Sized>() -> String {
    let full = any::type_name::<T>();

    let mut label = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            // What we collected so far was a module name.
            chars.next();
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            label.push_str(&segment);
            segment.clear();
            label.push(c);
        }
    }

    label.push_str(&segment);
    label
}

/// The title of the graph for benchmark family `family` and element type `T`.
#[must_use]
pub fn graph_title<T: ?Sized>(family: &str) -> String {
    format!("{family} - {}", type_label::<T>())
}

/// Turns a graph title into a key by replacing everything except ASCII letters, digits and
/// underscores with an underscore.
#[must_use]
pub fn graph_key(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
