use crate::{RowWrap, ValueWrap};
use mysql_async::{Params, prelude::Queryable};
use slimsql_core::{ExecuteResult, PoolHandle, QueryResult, Result, Value};

/// Pool of MySQL connections, each statement runs on a connection taken from it.
pub struct MySQLPool {
    pub(crate) pool: mysql_async::Pool,
}

impl MySQLPool {
    pub(crate) fn new(pool: mysql_async::Pool) -> Self {
        Self { pool }
    }
}

/// Reads the first result set: rows when it has columns, an acknowledgement otherwise.
/// Further result sets are discarded.
macro_rules! read_result {
    ($result:expr) => {{
        let mut result = $result;
        let has_columns = result.columns().is_some_and(|v| !v.is_empty());
        let response = if has_columns {
            QueryResult::RowSet(
                result
                    .collect::<RowWrap>()
                    .await?
                    .into_iter()
                    .map(|v| v.0)
                    .collect(),
            )
        } else {
            QueryResult::Acknowledgement(ExecuteResult::from_info(
                result.affected_rows(),
                result.last_insert_id(),
                &result.info(),
            ))
        };
        result.drop_result().await?;
        response
    }};
}

impl PoolHandle for MySQLPool {
    async fn run_query(&self, sql: &str, values: Option<Vec<Value>>) -> Result<QueryResult> {
        let mut connection = self.pool.get_conn().await?;
        Ok(match values {
            // Text protocol
            None => read_result!(connection.query_iter(sql).await?),
            // Binary protocol, the statement is prepared server side
            Some(values) => {
                let params = Params::Positional(
                    values
                        .into_iter()
                        .map(|v| ValueWrap(v).into())
                        .collect(),
                );
                read_result!(connection.exec_iter(sql, params).await?)
            }
        })
    }

    async fn shutdown(self) -> Result<()> {
        self.pool.disconnect().await?;
        Ok(())
    }
}
