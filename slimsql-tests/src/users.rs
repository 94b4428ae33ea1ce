use indoc::indoc;
use rust_decimal::Decimal;
use serde::Deserialize;
use slimsql::{Driver, SlimPool, params};
use std::{str::FromStr, sync::LazyLock};
use time::{Date, Month};
use tokio::sync::Mutex;

#[derive(Deserialize, Debug, PartialEq)]
struct User {
    id: i64,
    name: String,
    email: Option<String>,
}

pub async fn users<D: Driver>(pool: &mut SlimPool<D>) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    pool.execute("DROP TABLE IF EXISTS slimsql_user", None)
        .await
        .expect("Failed to drop the slimsql_user table");
    pool.execute(
        indoc! {"
            CREATE TABLE slimsql_user (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(64) NOT NULL,
                email VARCHAR(128) NULL,
                balance DECIMAL(10, 2) NOT NULL,
                birthday DATE NULL
            )
        "},
        None,
    )
    .await
    .expect("Failed to create the slimsql_user table");

    let birthday = Date::from_calendar_date(1990, Month::May, 17).unwrap();
    for (name, email, balance, birthday) in [
        ("Jon", Some("jon@example.com"), "12.50", Some(birthday)),
        ("Ann", None, "0.00", None),
        ("Eve", Some("eve@example.com"), "-3.75", None),
    ] {
        let result = pool
            .execute(
                indoc! {"
                    INSERT INTO slimsql_user (name, email, balance, birthday)
                    VALUES (@name, @email, @balance, @birthday)
                "},
                Some(&params! {
                    "name" => name,
                    "email" => email,
                    "balance" => Decimal::from_str(balance).unwrap(),
                    "birthday" => birthday,
                }),
            )
            .await
            .expect("Failed to insert a user");
        assert_eq!(result.affected_rows, 1);
    }

    // Typed rows
    let users = pool
        .query::<User>("SELECT id, name, email FROM slimsql_user ORDER BY id", None)
        .await
        .expect("Failed to query the users");
    assert_eq!(
        users,
        [
            User {
                id: 1,
                name: "Jon".into(),
                email: Some("jon@example.com".into()),
            },
            User {
                id: 2,
                name: "Ann".into(),
                email: None,
            },
            User {
                id: 3,
                name: "Eve".into(),
                email: Some("eve@example.com".into()),
            },
        ]
    );

    // First row
    let user = pool
        .get_one::<User>(
            "SELECT id, name, email FROM slimsql_user WHERE name = @name",
            Some(&params! { "name" => "Ann" }),
        )
        .await
        .expect("Failed to get Ann");
    assert_eq!(user.map(|v| v.id), Some(2));
    let user = pool
        .get_one::<User>(
            "SELECT id, name, email FROM slimsql_user WHERE name = @name",
            Some(&params! { "name" => "Nobody" }),
        )
        .await
        .expect("Failed to look for a missing user");
    assert_eq!(user, None);

    // Single values
    let balance = pool
        .get_value::<Decimal>(
            "balance",
            "SELECT balance FROM slimsql_user WHERE name = @name",
            Some(&params! { "name" => "Eve" }),
        )
        .await
        .expect("Failed to get the balance");
    assert_eq!(balance, Some(Decimal::from_str("-3.75").unwrap()));
    let value = pool
        .get_value::<Date>(
            "birthday",
            "SELECT birthday FROM slimsql_user WHERE name = @name",
            Some(&params! { "name" => "Jon" }),
        )
        .await
        .expect("Failed to get the birthday");
    assert_eq!(value, Some(birthday));
    let email = pool
        .get_value::<String>(
            "email",
            "SELECT email FROM slimsql_user WHERE name = @name",
            Some(&params! { "name" => "Ann" }),
        )
        .await
        .expect("Failed to get a null email");
    assert_eq!(email, None);
    let total = pool
        .get_value::<Decimal>("total", "SELECT SUM(balance) AS total FROM slimsql_user", None)
        .await
        .expect("Failed to sum the balances");
    assert_eq!(total, Some(Decimal::from_str("8.75").unwrap()));
    assert!(
        pool.get_value::<i64>("missing", "SELECT id FROM slimsql_user", None)
            .await
            .is_err(),
        "A column not in the row must fail"
    );

    // Existence
    assert!(
        pool.exists(
            "SELECT 1 FROM slimsql_user WHERE email = @email",
            Some(&params! { "email" => "jon@example.com" }),
        )
        .await
        .expect("Failed to check Jon")
    );
    assert!(
        !pool
            .exists(
                "SELECT 1 FROM slimsql_user WHERE email = @email",
                Some(&params! { "email" => "ann@example.com" }),
            )
            .await
            .expect("Failed to check Ann")
    );

    // Delete
    let result = pool
        .execute(
            "DELETE FROM slimsql_user WHERE email IS NULL OR balance < @balance",
            Some(&params! { "balance" => 0 }),
        )
        .await
        .expect("Failed to delete");
    assert_eq!(result.affected_rows, 2);
    let remaining = pool
        .get_value::<i64>("n", "SELECT COUNT(*) AS n FROM slimsql_user", None)
        .await
        .expect("Failed to count the remaining users");
    assert_eq!(remaining, Some(1));
}
