/// Split `input` at the first character not satisfying `predicate`, advancing it past the
/// consumed prefix. Returns the consumed prefix.
pub fn consume_while<'s>(input: &mut &'s str, mut predicate: impl FnMut(&char) -> bool) -> &'s str {
    let len = input
        .char_indices()
        .find(|(_, c)| !predicate(c))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    let (result, rest) = input.split_at(len);
    *input = rest;
    result
}

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Longest prefix of `value` not exceeding `max` bytes that ends on a char boundary.
pub fn truncate_str(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            $crate::truncate_str(&$query, 497).trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}

/// Build a [`Parameters`](crate::Parameters) map from `name => value` pairs.
///
/// ```rust
/// use slimsql_core::{Value, params};
/// let parameters = params! { "id" => 1, "name" => "Jon", "deleted" => Value::Null };
/// assert_eq!(parameters.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Parameters::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut parameters = $crate::Parameters::new();
        $(
            parameters.insert(
                ::std::string::String::from($name),
                $crate::AsValue::as_value($value),
            );
        )+
        parameters
    }};
}
