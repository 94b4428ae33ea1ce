use crate::silent_logs;
use slimsql::{Driver, SlimError, SlimPool};

pub async fn lifecycle<D: Driver>(pool: &mut SlimPool<D>) {
    assert!(pool.has_open_pool());
    assert!(
        pool.exists("SELECT 1", None)
            .await
            .expect("Failed to query the open pool")
    );

    // One pool at a time
    let error = silent_logs! {
        pool.connect().expect_err("Connecting twice must fail")
    };
    assert_eq!(SlimError::of(&error), Some(&SlimError::PoolAlreadyExists));
    assert!(pool.has_open_pool());

    // Close
    pool.close().await.expect("Failed to close the pool");
    assert!(!pool.has_open_pool());
    pool.close().await.expect("Closing a closed pool must succeed");
    let error = silent_logs! {
        pool.query_rows("SELECT 1", None)
            .await
            .expect_err("A closed pool must refuse queries")
    };
    assert_eq!(SlimError::of(&error), Some(&SlimError::PoolClosed));

    // Reconnect with the stored configuration
    pool.connect().expect("Failed to connect again");
    assert!(pool.has_open_pool());
    let value = pool
        .get_value::<i64>("n", "SELECT 41 + 1 AS n", None)
        .await
        .expect("Failed to query the reopened pool");
    assert_eq!(value, Some(42));
}
