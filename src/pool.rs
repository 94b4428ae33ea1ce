use serde::de::DeserializeOwned;
use slimsql_core::{
    AsValue, CompiledStatement, ConnectionConfig, Driver, Error, ExecuteResult, Parameters,
    PoolConfig, PoolHandle, PreparedStatement, QueryResult, Result, RowLabeled, SlimError,
    Value, truncate_long,
};

/// Single entry point over a driver pool.
///
/// Statements use `@name` placeholders resolved from a [`Parameters`] map. Row-returning
/// statements go through [`query`](SlimPool::query) and its helpers, mutations through
/// [`execute`](SlimPool::execute), which refuses statements returning rows instead of
/// silently dropping them.
///
/// The pool is created when the `SlimPool` is built; [`close`](SlimPool::close) releases it
/// and [`connect`](SlimPool::connect) opens a new one from the same configuration.
pub struct SlimPool<D: Driver> {
    driver: D,
    config: PoolConfig,
    pool: Option<D::Pool>,
}

impl<D: Driver> SlimPool<D> {
    /// Create the facade and open its pool.
    pub fn new(driver: D, config: impl Into<PoolConfig>) -> Result<Self> {
        let mut result = Self {
            driver,
            config: config.into(),
            pool: None,
        };
        result.connect()?;
        Ok(result)
    }

    /// Parse the connection string with the parser registered for its scheme and open the
    /// pool.
    pub fn from_url(driver: D, url: &str) -> Result<Self> {
        let config: ConnectionConfig = url.parse()?;
        Self::new(driver, config)
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Configuration used by [`connect`](SlimPool::connect).
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Open a new pool. Fails with [`SlimError::PoolAlreadyExists`] while one is open.
    pub fn connect(&mut self) -> Result<()> {
        if self.pool.is_some() {
            let error = Error::new(SlimError::PoolAlreadyExists);
            log::error!("{:#}", error);
            return Err(error);
        }
        let pool = self.driver.create_pool(&self.config).map_err(|e| {
            let error = e.context(format!(
                "While creating a {} pool for `{}`",
                D::NAME,
                self.config.connection.host
            ));
            log::error!("{:#}", error);
            error
        })?;
        log::debug!("Opened a {} pool", D::NAME);
        self.pool = Some(pool);
        Ok(())
    }

    /// Release the pool. The facade is left without pool even when the driver fails to shut
    /// it down. Closing a closed facade does nothing.
    pub async fn close(&mut self) -> Result<()> {
        let Some(pool) = self.pool.take() else {
            return Ok(());
        };
        pool.shutdown().await.inspect_err(|e| log::error!("{:#}", e))?;
        log::debug!("Closed the {} pool", D::NAME);
        Ok(())
    }

    pub fn has_open_pool(&self) -> bool {
        self.pool.is_some()
    }

    /// Compile the statement with the driver marker, SQL without parameters is left as is.
    pub fn prepare(&self, sql: &str, parameters: Option<&Parameters>) -> Result<CompiledStatement> {
        let Some(parameters) = parameters else {
            return Ok(CompiledStatement::raw(sql));
        };
        PreparedStatement::new(sql, parameters)
            .with_marker(D::POSITIONAL_MARKER)
            .compile()
            .inspect_err(|e| log::error!("{:#}", e))
    }

    /// Run any statement and return the driver response untouched.
    pub async fn run(&self, sql: &str, parameters: Option<&Parameters>) -> Result<QueryResult> {
        let statement = self.prepare(sql, parameters)?;
        let Some(pool) = &self.pool else {
            let error = Error::new(SlimError::PoolClosed);
            log::error!("{:#}", error);
            return Err(error);
        };
        log::debug!("Running {}", statement);
        pool.run_query(&statement.sql, statement.values)
            .await
            .inspect_err(|e| {
                log::error!(
                    "{:#}\nWhile running the query:\n{}",
                    e,
                    truncate_long!(statement.sql)
                )
            })
    }

    /// Rows returned by the statement. An acknowledgement yields no rows.
    pub async fn query_rows(
        &self,
        sql: &str,
        parameters: Option<&Parameters>,
    ) -> Result<Vec<RowLabeled>> {
        Ok(match self.run(sql, parameters).await? {
            QueryResult::RowSet(rows) => rows,
            QueryResult::Acknowledgement(..) => Vec::new(),
        })
    }

    /// Rows returned by the statement, each one deserialized into `T`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        sql: &str,
        parameters: Option<&Parameters>,
    ) -> Result<Vec<T>> {
        self.query_rows(sql, parameters)
            .await?
            .iter()
            .map(RowLabeled::decode::<T>)
            .collect()
    }

    /// Run a mutation. Fails with [`SlimError::InvalidExecuteStatement`] when the statement
    /// returns rows, use [`query`](SlimPool::query) for those.
    pub async fn execute(
        &self,
        sql: &str,
        parameters: Option<&Parameters>,
    ) -> Result<ExecuteResult> {
        match self.run(sql, parameters).await? {
            QueryResult::Acknowledgement(result) => Ok(result),
            QueryResult::RowSet(..) => {
                let error = Error::new(SlimError::InvalidExecuteStatement)
                    .context(format!("While executing:\n{}", truncate_long!(sql)));
                log::error!("{:#}", error);
                Err(error)
            }
        }
    }

    /// First row returned by the statement, `None` when there is none.
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        sql: &str,
        parameters: Option<&Parameters>,
    ) -> Result<Option<T>> {
        self.get_one_row(sql, parameters)
            .await?
            .map(|row| row.decode())
            .transpose()
    }

    pub async fn get_one_row(
        &self,
        sql: &str,
        parameters: Option<&Parameters>,
    ) -> Result<Option<RowLabeled>> {
        Ok(self.query_rows(sql, parameters).await?.into_iter().next())
    }

    /// Value of `column` in the first row, `None` when there is no row or the value is NULL.
    pub async fn get_value<V: AsValue>(
        &self,
        column: &str,
        sql: &str,
        parameters: Option<&Parameters>,
    ) -> Result<Option<V>> {
        let Some(mut row) = self.get_one_row(sql, parameters).await? else {
            return Ok(None);
        };
        Option::<V>::try_from_value(row.take_column::<Value>(column)?)
    }

    /// Whether the statement returns at least one row.
    pub async fn exists(&self, sql: &str, parameters: Option<&Parameters>) -> Result<bool> {
        Ok(self.get_one_row(sql, parameters).await?.is_some())
    }
}
