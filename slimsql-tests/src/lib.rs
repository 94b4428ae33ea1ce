mod lifecycle;
mod limits;
mod simple;
mod users;

use crate::{lifecycle::lifecycle, limits::limits, simple::simple, users::users};
use log::LevelFilter;
use slimsql::{Driver, SlimPool};
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run the whole suite against a live database. The pool must be open and will be open again
/// when the suite returns.
pub async fn execute_tests<D: Driver>(pool: &mut SlimPool<D>) {
    simple(pool).await;
    users(pool).await;
    limits(pool).await;
    lifecycle(pool).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        let result = { $($code)+ };
        log::set_max_level(level);
        result
    }};
}
