use indoc::indoc;
use slimsql::{Driver, SlimPool, params};
use std::sync::LazyLock;
use time::{Date, Month, PrimitiveDateTime, Time};
use tokio::sync::Mutex;

pub async fn limits<D: Driver>(pool: &mut SlimPool<D>) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    pool.execute("DROP TABLE IF EXISTS slimsql_limits", None)
        .await
        .expect("Failed to drop the slimsql_limits table");
    pool.execute(
        indoc! {"
            CREATE TABLE slimsql_limits (
                id INT PRIMARY KEY,
                flag BOOLEAN NOT NULL,
                int8 TINYINT NOT NULL,
                uint8 TINYINT UNSIGNED NOT NULL,
                int16 SMALLINT NOT NULL,
                int32 INT NOT NULL,
                int64 BIGINT NOT NULL,
                uint64 BIGINT UNSIGNED NOT NULL,
                float64 DOUBLE NOT NULL,
                bytes VARBINARY(16) NOT NULL,
                moment DATETIME(6) NOT NULL,
                clock TIME NOT NULL
            )
        "},
        None,
    )
    .await
    .expect("Failed to create the slimsql_limits table");

    let moment = PrimitiveDateTime::new(
        Date::from_calendar_date(2038, Month::January, 19).unwrap(),
        Time::from_hms_micro(3, 14, 7, 999_999).unwrap(),
    );
    let clock = Time::from_hms(23, 59, 59).unwrap();
    let insert = indoc! {"
        INSERT INTO slimsql_limits
        VALUES (@id, @flag, @int8, @uint8, @int16, @int32, @int64, @uint64, @float64, @bytes, @moment, @clock)
    "};

    // Minimals
    pool.execute(
        insert,
        Some(&params! {
            "id" => 1,
            "flag" => false,
            "int8" => i8::MIN,
            "uint8" => u8::MIN,
            "int16" => i16::MIN,
            "int32" => i32::MIN,
            "int64" => i64::MIN,
            "uint64" => u64::MIN,
            "float64" => -1.5e300,
            "bytes" => Vec::<u8>::new(),
            "moment" => moment,
            "clock" => Time::MIDNIGHT,
        }),
    )
    .await
    .expect("Failed to insert the minimals");

    // Maximals
    pool.execute(
        insert,
        Some(&params! {
            "id" => 2,
            "flag" => true,
            "int8" => i8::MAX,
            "uint8" => u8::MAX,
            "int16" => i16::MAX,
            "int32" => i32::MAX,
            "int64" => i64::MAX,
            "uint64" => u64::MAX,
            "float64" => 1.5e300,
            "bytes" => vec![0u8, 0xff, 0x10],
            "moment" => moment,
            "clock" => clock,
        }),
    )
    .await
    .expect("Failed to insert the maximals");

    // Both protocols must decode the same values
    for parameters in [None, Some(params! { "id" => 2 })] {
        let sql = if parameters.is_some() {
            "SELECT * FROM slimsql_limits WHERE id = @id"
        } else {
            "SELECT * FROM slimsql_limits WHERE id = 2"
        };
        let mut row = pool
            .get_one_row(sql, parameters.as_ref())
            .await
            .expect("Failed to query the maximals")
            .expect("The maximals row must exist");
        assert!(row.take_column::<bool>("flag").unwrap());
        assert_eq!(row.take_column::<i8>("int8").unwrap(), i8::MAX);
        assert_eq!(row.take_column::<u8>("uint8").unwrap(), u8::MAX);
        assert_eq!(row.take_column::<i16>("int16").unwrap(), i16::MAX);
        assert_eq!(row.take_column::<i32>("int32").unwrap(), i32::MAX);
        assert_eq!(row.take_column::<i64>("int64").unwrap(), i64::MAX);
        assert_eq!(row.take_column::<u64>("uint64").unwrap(), u64::MAX);
        assert_eq!(row.take_column::<f64>("float64").unwrap(), 1.5e300);
        assert_eq!(
            row.take_column::<Vec<u8>>("bytes").unwrap(),
            [0u8, 0xff, 0x10]
        );
        assert_eq!(
            row.take_column::<PrimitiveDateTime>("moment").unwrap(),
            moment
        );
        assert_eq!(row.take_column::<Time>("clock").unwrap(), clock);
    }

    let mut row = pool
        .get_one_row("SELECT * FROM slimsql_limits WHERE id = 1", None)
        .await
        .expect("Failed to query the minimals")
        .expect("The minimals row must exist");
    assert!(!row.take_column::<bool>("flag").unwrap());
    assert_eq!(row.take_column::<i8>("int8").unwrap(), i8::MIN);
    assert_eq!(row.take_column::<i16>("int16").unwrap(), i16::MIN);
    assert_eq!(row.take_column::<i32>("int32").unwrap(), i32::MIN);
    assert_eq!(row.take_column::<i64>("int64").unwrap(), i64::MIN);
    assert_eq!(row.take_column::<u64>("uint64").unwrap(), 0);
    assert_eq!(row.take_column::<f64>("float64").unwrap(), -1.5e300);
    assert!(row.take_column::<Vec<u8>>("bytes").unwrap().is_empty());
    assert_eq!(row.take_column::<Time>("clock").unwrap(), Time::MIDNIGHT);

    // Out of range for the requested type
    let value = pool
        .get_value::<i8>("int16", "SELECT int16 FROM slimsql_limits WHERE id = 2", None)
        .await;
    assert!(value.is_err(), "i16::MAX does not fit an i8");
}
