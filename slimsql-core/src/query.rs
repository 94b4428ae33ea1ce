use crate::{AsValue, Error, Result, Value, separated_by, value::json_object};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(names: RowNames, values: Row) -> Self {
        Self {
            labels: names,
            values,
        }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values()[i])
    }
    /// Take the value of column `name` converted into `T`.
    pub fn take_column<T: AsValue>(&mut self, name: &str) -> Result<T> {
        let Some(i) = self.labels.iter().position(|v| v == name) else {
            return Err(Error::msg(format!(
                "Column `{name}` is not part of the row ({})",
                self.labels.join(", ")
            )));
        };
        T::try_from_value(std::mem::take(&mut self.values[i]))
    }
    pub fn to_json(&self) -> Map<String, JsonValue> {
        json_object(self.labels.iter().zip(self.values.iter()))
    }
    /// Deserialize the row into `T`, going through its JSON object form.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(JsonValue::Object(self.to_json())).map_err(|e| {
            Error::new(e).context(format!(
                "Could not decode the row into {}",
                std::any::type_name::<T>()
            ))
        })
    }
}

impl Display for RowLabeled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("{");
        separated_by(
            &mut out,
            self.labels.iter().zip(self.values.iter()),
            |out, (label, value)| {
                out.push_str(label);
                out.push_str(": ");
                out.push_str(&value.to_json().to_string());
            },
            ", ",
        );
        out.push('}');
        f.write_str(&out)
    }
}

/// Effect of a mutation (INSERT, UPDATE, DELETE...).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteResult {
    /// Number of rows affected by the statement.
    pub affected_rows: u64,
    /// Auto-increment value generated for the first inserted row, 0 if none.
    pub insert_id: u64,
    /// Number of existing rows actually modified by the statement.
    pub changed_rows: u64,
}

impl ExecuteResult {
    /// Build the result from the counters MySQL sends back, reading the changed rows from
    /// the info message (`Rows matched: 2  Changed: 1  Warnings: 0`). Only UPDATE reports
    /// `Changed:`, every other statement has 0 changed rows.
    pub fn from_info(affected_rows: u64, insert_id: Option<u64>, info: &str) -> Self {
        Self {
            affected_rows,
            insert_id: insert_id.unwrap_or_default(),
            changed_rows: changed_rows_from_info(info).unwrap_or(0),
        }
    }
}

fn changed_rows_from_info(info: &str) -> Option<u64> {
    let (_, rest) = info.split_once("Changed:")?;
    rest.trim_start()
        .split(|c: char| !c.is_ascii_digit())
        .next()?
        .parse()
        .ok()
}

/// Shape of a raw driver response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Acknowledgement,
    RowSet,
}

/// Structural classification of a raw response: an object exposing both `affectedRows` and
/// `insertId` is an acknowledgement, anything else is a row set.
pub fn classify(raw: &JsonValue) -> ResultKind {
    match raw {
        JsonValue::Object(map) if is_acknowledgement(map) => ResultKind::Acknowledgement,
        _ => ResultKind::RowSet,
    }
}

fn is_acknowledgement(map: &Map<String, JsonValue>) -> bool {
    map.contains_key("affectedRows") && map.contains_key("insertId")
}

/// Response of a driver to one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Rows returned by the statement, possibly none.
    RowSet(Vec<RowLabeled>),
    /// A mutation acknowledgement.
    Acknowledgement(ExecuteResult),
}

impl QueryResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            QueryResult::RowSet(..) => ResultKind::RowSet,
            QueryResult::Acknowledgement(..) => ResultKind::Acknowledgement,
        }
    }

    /// Decode a JSON shaped driver response, classifying it like [`classify`].
    ///
    /// Acknowledgements keep only `affectedRows`, `insertId` and `changedRows` (0 when
    /// missing or null). Row sets are arrays of objects, a lone object is a single row.
    pub fn from_raw(raw: JsonValue) -> Result<QueryResult> {
        match raw {
            JsonValue::Object(map) if is_acknowledgement(&map) => {
                Ok(QueryResult::Acknowledgement(ExecuteResult {
                    affected_rows: counter(&map, "affectedRows")?,
                    insert_id: counter(&map, "insertId")?,
                    changed_rows: counter(&map, "changedRows")?,
                }))
            }
            JsonValue::Object(map) => Ok(QueryResult::RowSet(vec![row_from_json(map)])),
            JsonValue::Array(rows) => rows
                .into_iter()
                .map(|row| match row {
                    JsonValue::Object(map) => Ok(row_from_json(map)),
                    other => Err(Error::msg(format!(
                        "Unexpected row `{other}`, rows must be objects"
                    ))),
                })
                .collect::<Result<_>>()
                .map(QueryResult::RowSet),
            other => Err(Error::msg(format!(
                "Unexpected response `{other}`, expected rows or an acknowledgement"
            ))),
        }
    }
}

fn counter(map: &Map<String, JsonValue>, key: &str) -> Result<u64> {
    match map.get(key) {
        None | Some(JsonValue::Null) => Ok(0),
        Some(v) => v.as_u64().ok_or_else(|| {
            Error::msg(format!(
                "Field `{key}` of the acknowledgement must be a non negative integer, found `{v}`"
            ))
        }),
    }
}

fn row_from_json(map: Map<String, JsonValue>) -> RowLabeled {
    let (labels, values): (Vec<_>, Vec<_>) = map
        .into_iter()
        .map(|(k, v)| {
            let value = Value::from_json(&v);
            (k, value)
        })
        .unzip();
    RowLabeled::new(labels.into(), values.into())
}

impl From<ExecuteResult> for QueryResult {
    fn from(value: ExecuteResult) -> Self {
        QueryResult::Acknowledgement(value)
    }
}

impl From<Vec<RowLabeled>> for QueryResult {
    fn from(value: Vec<RowLabeled>) -> Self {
        QueryResult::RowSet(value)
    }
}
