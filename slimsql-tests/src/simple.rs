use crate::silent_logs;
use indoc::indoc;
use slimsql::{Driver, SlimError, SlimPool, params};
use std::sync::LazyLock;
use tokio::sync::Mutex;

pub async fn simple<D: Driver>(pool: &mut SlimPool<D>) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    pool.execute("DROP TABLE IF EXISTS slimsql_simple", None)
        .await
        .expect("Failed to drop the slimsql_simple table");
    pool.execute(
        indoc! {"
            CREATE TABLE slimsql_simple (
                id INT AUTO_INCREMENT PRIMARY KEY,
                label VARCHAR(64) NOT NULL,
                amount INT NULL
            )
        "},
        None,
    )
    .await
    .expect("Failed to create the slimsql_simple table");

    // Plain statement, no placeholders
    let result = pool
        .execute(
            "INSERT INTO slimsql_simple (label, amount) VALUES ('first', 10)",
            None,
        )
        .await
        .expect("Failed to insert the first row");
    assert_eq!(result.affected_rows, 1);
    assert_eq!(result.insert_id, 1);
    assert_eq!(result.changed_rows, 0);

    // Named placeholders
    let result = pool
        .execute(
            "INSERT INTO slimsql_simple (label, amount) VALUES (@label, @amount)",
            Some(&params! { "label" => "second", "amount" => 20 }),
        )
        .await
        .expect("Failed to insert the second row");
    assert_eq!(result.affected_rows, 1);
    assert_eq!(result.insert_id, 2);
    assert_eq!(result.changed_rows, 0);

    // Same name used twice, unused parameters ignored
    let count = pool
        .get_value::<i64>(
            "n",
            "SELECT COUNT(*) AS n FROM slimsql_simple WHERE label = @label OR amount = @label",
            Some(&params! { "label" => "first", "unused" => true }),
        )
        .await
        .expect("Failed to count the rows");
    assert_eq!(count, Some(1));

    // Update, changed rows
    let result = pool
        .execute(
            "UPDATE slimsql_simple SET amount = @amount WHERE amount < @amount",
            Some(&params! { "amount" => 15 }),
        )
        .await
        .expect("Failed to update");
    assert_eq!(result.affected_rows, 1);
    assert_eq!(result.changed_rows, 1);
    let result = pool
        .execute(
            "UPDATE slimsql_simple SET amount = @amount WHERE label = @label",
            Some(&params! { "amount" => 15, "label" => "first" }),
        )
        .await
        .expect("Failed to update without changes");
    assert_eq!(result.changed_rows, 0);

    // Rows
    let rows = pool
        .query_rows("SELECT id, label, amount FROM slimsql_simple ORDER BY id", None)
        .await
        .expect("Failed to query the rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].names(), ["id", "label", "amount"]);
    let mut second = rows[1].clone();
    assert_eq!(second.take_column::<String>("label").unwrap(), "second");
    assert_eq!(second.take_column::<i32>("amount").unwrap(), 20);

    // A SELECT is not a mutation
    let error = silent_logs! {
        pool.execute("SELECT * FROM slimsql_simple", None)
            .await
            .expect_err("Execute must refuse statements returning rows")
    };
    assert_eq!(SlimError::of(&error), Some(&SlimError::InvalidExecuteStatement));

    // A mutation through query has no rows
    let rows = pool
        .query_rows(
            "DELETE FROM slimsql_simple WHERE label = @label",
            Some(&params! { "label" => "nobody" }),
        )
        .await
        .expect("Failed to run a mutation through query");
    assert!(rows.is_empty());

    // Missing parameter, nothing reaches the database
    let error = silent_logs! {
        pool.execute(
            "DELETE FROM slimsql_simple WHERE label = @label",
            Some(&params! { "name" => "first" }),
        )
        .await
        .expect_err("A missing parameter must fail")
    };
    assert_eq!(
        SlimError::of(&error),
        Some(&SlimError::MissingParameter("label".into()))
    );
    assert!(
        pool.exists(
            "SELECT 1 FROM slimsql_simple WHERE label = @label",
            Some(&params! { "label" => "first" }),
        )
        .await
        .expect("Failed to check the first row")
    );

    // Invalid SQL, the driver error comes back
    silent_logs! {
        pool.query_rows("SELEC 1", None)
            .await
            .expect_err("Invalid SQL must fail");
    }
}
