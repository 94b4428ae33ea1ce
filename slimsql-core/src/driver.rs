use crate::{PoolConfig, QueryResult, Result, Value};
use std::future::Future;

/// Entry point of a database client.
///
/// The driver owns everything below the statement level: network I/O, authentication and
/// pooling of physical connections. slimsql only talks to it through [`Driver::create_pool`]
/// and the returned [`PoolHandle`].
pub trait Driver: Send + Sync {
    type Pool: PoolHandle;

    /// Name of the backend, also the scheme of its connection strings.
    const NAME: &'static str;
    /// Marker substituted to each `@name` placeholder.
    const POSITIONAL_MARKER: &'static str = "?";

    /// Create a pool for `config`. Physical connections may be established lazily.
    fn create_pool(&self, config: &PoolConfig) -> Result<Self::Pool>;
}

/// A live pool of connections created by a [`Driver`].
pub trait PoolHandle: Send + Sync {
    /// Run one statement with its positional values.
    ///
    /// `values` is `None` when the statement has no marker to bind, the driver can then use
    /// a plain text query. Driver errors must be returned as they are.
    fn run_query(
        &self,
        sql: &str,
        values: Option<Vec<Value>>,
    ) -> impl Future<Output = Result<QueryResult>> + Send;

    /// Close every connection of the pool.
    fn shutdown(self) -> impl Future<Output = Result<()>> + Send;
}
