use crate::{Error, Result, SlimError, Value, consume_while, truncate_long};
use std::{
    borrow::Cow,
    collections::HashMap,
    fmt::{self, Display},
};

/// Values for the `@name` placeholders of a statement, keyed by name without the `@`.
pub type Parameters = HashMap<String, Value>;

/// Positional SQL plus the values to bind, in marker order.
///
/// `values` is `None` when the SQL had no placeholder at all. Drivers may treat that
/// differently from `Some(vec![])` (plain text query versus prepared execution).
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStatement {
    pub sql: String,
    pub values: Option<Vec<Value>>,
}

impl CompiledStatement {
    /// A statement passed through without compilation.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            values: None,
        }
    }
}

impl Display for CompiledStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))?;
        if let Some(values) = &self.values {
            write!(f, " with {} bound value(s)", values.len())?;
        }
        Ok(())
    }
}

/// SQL text with named placeholders, ready to be compiled into a [`CompiledStatement`].
///
/// A placeholder is `@` followed by one or more ASCII letters or underscores. Every occurrence
/// is replaced by the positional marker and binds its own copy of the value, so a name used
/// twice is bound twice. Parameters not referenced by the SQL are ignored.
///
/// ```rust
/// use slimsql_core::{PreparedStatement, params};
/// let parameters = params! { "id" => 1, "name" => "Jon" };
/// let compiled = PreparedStatement::new("SELECT * FROM user WHERE id = @id AND name = @name", &parameters)
///     .compile()
///     .unwrap();
/// assert_eq!(compiled.sql, "SELECT * FROM user WHERE id = ? AND name = ?");
/// assert_eq!(compiled.values.unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PreparedStatement<'a> {
    sql: &'a str,
    parameters: &'a Parameters,
    marker: Cow<'a, str>,
}

impl<'a> PreparedStatement<'a> {
    pub const DEFAULT_MARKER: &'static str = "?";

    pub fn new(sql: &'a str, parameters: &'a Parameters) -> Self {
        Self {
            sql,
            parameters,
            marker: Cow::Borrowed(Self::DEFAULT_MARKER),
        }
    }

    /// Use `marker` instead of `?` as the positional marker.
    pub fn with_marker(mut self, marker: impl Into<Cow<'a, str>>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn compile(&self) -> Result<CompiledStatement> {
        let mut sql = String::with_capacity(self.sql.len());
        let mut values = Vec::new();
        let mut rest = self.sql;
        while let Some((before, name, after)) = next_placeholder(rest) {
            let Some(value) = self.parameters.get(name) else {
                return Err(Error::new(SlimError::MissingParameter(name.to_owned())));
            };
            sql.push_str(before);
            sql.push_str(&self.marker);
            values.push(value.clone());
            rest = after;
        }
        sql.push_str(rest);
        Ok(CompiledStatement {
            sql,
            values: if values.is_empty() { None } else { Some(values) },
        })
    }
}

/// Compile `sql` with the default `?` marker.
pub fn compile(sql: &str, parameters: &Parameters) -> Result<CompiledStatement> {
    PreparedStatement::new(sql, parameters).compile()
}

fn is_placeholder_char(c: &char) -> bool {
    c.is_ascii_alphabetic() || *c == '_'
}

/// Finds the first placeholder in `sql`, returning the text before it, its name and the text
/// after it.
fn next_placeholder(sql: &str) -> Option<(&str, &str, &str)> {
    sql.match_indices('@').find_map(|(at, _)| {
        let mut after = &sql[at + 1..];
        let name = consume_while(&mut after, is_placeholder_char);
        if name.is_empty() {
            None
        } else {
            Some((&sql[..at], name, after))
        }
    })
}
