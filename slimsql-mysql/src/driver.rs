use crate::MySQLPool;
use mysql_async::{Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts};
use slimsql_core::{Context, Driver, Error, PoolConfig, Result};

#[derive(Clone, Copy, Default, Debug)]
pub struct MySQLDriver;
impl MySQLDriver {
    pub const fn new() -> Self {
        Self
    }

    /// Translate the configuration into `mysql_async` options.
    ///
    /// The port comes from the host (`host:3306`) or from the `port` option. The
    /// `connectionLimit` option is used when the configuration has no connection limit.
    pub fn opts(config: &PoolConfig) -> Result<Opts> {
        let connection = &config.connection;
        let (host, mut port) = split_host_port(&connection.host)?;
        let mut limit = config.connection_limit;
        for (key, value) in connection.other_config.iter().flatten() {
            match key.as_str() {
                "port" => {
                    if port.is_none() {
                        port = Some(parse_option(key, value)?);
                    }
                }
                "connectionLimit" | "connection_limit" => {
                    if limit.is_none() {
                        limit = Some(parse_option(key, value)?);
                    }
                }
                _ => log::warn!("Ignoring unsupported MySQL option `{key}`"),
            }
        }
        let mut builder = OptsBuilder::default()
            .ip_or_hostname(host)
            .user(Some(&connection.user))
            .pass((!connection.password.is_empty()).then_some(&connection.password))
            .db_name(connection.database.as_ref());
        if let Some(port) = port {
            builder = builder.tcp_port(port);
        }
        if let Some(limit) = limit {
            let constraints = PoolConstraints::new(1, limit).ok_or_else(|| {
                Error::msg(format!(
                    "The connection limit must be at least 1, found {limit}"
                ))
            })?;
            builder = builder.pool_opts(PoolOpts::default().with_constraints(constraints));
        }
        Ok(builder.into())
    }
}

impl Driver for MySQLDriver {
    type Pool = MySQLPool;

    const NAME: &'static str = "mysql";

    fn create_pool(&self, config: &PoolConfig) -> Result<MySQLPool> {
        Ok(MySQLPool::new(Pool::new(Self::opts(config)?)))
    }
}

fn parse_option<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("Invalid value `{value}` for the MySQL option `{key}`"))
}

/// Split `host:port`, `[ipv6]:port` or a bare host.
fn split_host_port(host: &str) -> Result<(&str, Option<u16>)> {
    let (host, port) = if let Some(rest) = host.strip_prefix('[') {
        let Some((address, rest)) = rest.split_once(']') else {
            return Err(Error::msg(format!("Unterminated IPv6 address in `{host}`")));
        };
        (address, rest.strip_prefix(':'))
    } else {
        match host.split_once(':') {
            Some((name, port)) if !port.contains(':') => (name, Some(port)),
            _ => (host, None),
        }
    };
    let port = port
        .map(|v| {
            v.parse::<u16>()
                .with_context(|| format!("Invalid port `{v}` in the host `{host}`"))
        })
        .transpose()?;
    Ok((host, port))
}
