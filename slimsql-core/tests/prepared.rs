#[cfg(test)]
mod tests {
    use indoc::indoc;
    use slimsql_core::{
        CompiledStatement, Parameters, PreparedStatement, SlimError, Value, compile, params,
    };

    #[test]
    fn compile_in_order() {
        let parameters = params! { "id" => 1, "name" => "Jon", "notUsedKey" => true };
        let compiled = compile(
            "select * from table where id = @id and name = @name",
            &parameters,
        )
        .expect("Could not compile the statement");
        assert_eq!(compiled.sql, "select * from table where id = ? and name = ?");
        assert_eq!(
            compiled.values,
            Some(vec![Value::Int32(Some(1)), Value::Varchar(Some("Jon".into()))])
        );
    }

    #[test]
    fn compile_follows_sql_order() {
        let parameters = params! { "b" => 2_i64, "a" => 1_i64, "c" => 3_i64 };
        let compiled = compile("SELECT @c, @a, @b", &parameters).unwrap();
        assert_eq!(compiled.sql, "SELECT ?, ?, ?");
        assert_eq!(
            compiled.values.unwrap(),
            [3_i64, 1, 2].map(|v| Value::Int64(Some(v)))
        );
    }

    #[test]
    fn compile_repeated_placeholder() {
        let parameters = params! { "id" => 7 };
        let compiled = compile(
            "SELECT * FROM node WHERE id = @id OR parent_id = @id",
            &parameters,
        )
        .unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT * FROM node WHERE id = ? OR parent_id = ?"
        );
        assert_eq!(
            compiled.values,
            Some(vec![Value::Int32(Some(7)), Value::Int32(Some(7))])
        );
    }

    #[test]
    fn compile_without_placeholders() {
        let sql = "SELECT * FROM user";
        let parameters = params! { "id" => 1 };
        let compiled = compile(sql, &parameters).unwrap();
        assert_eq!(compiled, CompiledStatement::raw(sql));
        assert_eq!(compiled.values, None);

        let compiled = compile(sql, &Parameters::new()).unwrap();
        assert_eq!(compiled.sql, sql);
        assert!(compiled.values.is_none());
    }

    #[test]
    fn compile_missing_parameter() {
        let parameters = params! { "id" => 1 };
        let error = compile(
            "UPDATE user SET name = @name WHERE id = @id",
            &parameters,
        )
        .expect_err("Must fail because `@name` has no value");
        assert_eq!(
            SlimError::of(&error),
            Some(&SlimError::MissingParameter("name".into()))
        );
        assert!(error.to_string().contains("`@name`"));

        let error = compile("SELECT * FROM user WHERE id = @id", &Parameters::new()).unwrap_err();
        assert!(matches!(
            SlimError::of(&error),
            Some(SlimError::MissingParameter(name)) if name == "id"
        ));
    }

    #[test]
    fn compile_case_sensitive_names() {
        let parameters = params! { "Id" => 1 };
        assert!(compile("SELECT @id", &parameters).is_err());
        assert!(compile("SELECT @Id", &parameters).is_ok());
    }

    #[test]
    fn compile_placeholder_boundaries() {
        let parameters = params! {
            "first_name" => "Ada",
            "a" => 1,
            "limit" => 10,
        };
        // Names stop at the first character outside letters and underscore
        let compiled = compile(
            "SELECT * FROM t WHERE f = @first_name AND x = @a1 LIMIT @limit;",
            &parameters,
        )
        .unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT * FROM t WHERE f = ? AND x = ?1 LIMIT ?;"
        );
        assert_eq!(compiled.values.unwrap().len(), 3);

        // A lone `@` or an `@` followed by a digit is not a placeholder
        let compiled = compile("SELECT '@' AS at, @1 AS n, @ AS space", &parameters).unwrap();
        assert_eq!(compiled.sql, "SELECT '@' AS at, @1 AS n, @ AS space");
        assert!(compiled.values.is_none());
    }

    #[test]
    fn compile_null_values() {
        let parameters = params! { "deleted_at" => Value::Null, "note" => None::<String> };
        let compiled = compile(
            "UPDATE user SET deleted_at = @deleted_at, note = @note",
            &parameters,
        )
        .unwrap();
        let values = compiled.values.unwrap();
        assert_eq!(values, [Value::Null, Value::Varchar(None)]);
        assert!(values.iter().all(Value::is_null));
    }

    #[test]
    fn compile_multiline() {
        let parameters = params! { "name" => "Kettle", "price" => 30.5 };
        let compiled = compile(
            indoc! {"
                INSERT INTO product (name, price)
                VALUES (@name, @price)
            "},
            &parameters,
        )
        .unwrap();
        assert_eq!(
            compiled.sql,
            indoc! {"
                INSERT INTO product (name, price)
                VALUES (?, ?)
            "}
        );
    }

    #[test]
    fn compile_custom_marker() {
        let parameters = params! { "id" => 1, "name" => "Jon" };
        let compiled = PreparedStatement::new("SELECT @id, @name", &parameters)
            .with_marker("$?")
            .compile()
            .unwrap();
        assert_eq!(compiled.sql, "SELECT $?, $?");
        assert_eq!(compiled.values.unwrap().len(), 2);
    }

    #[test]
    fn compile_non_ascii_sql() {
        let parameters = params! { "città" => 1, "città_id" => 2, "id" => 3 };
        // `@città` is read as `@citt` followed by `à`
        let error = compile("SELECT 'perché' FROM città WHERE x = @città", &parameters)
            .unwrap_err();
        assert_eq!(
            SlimError::of(&error),
            Some(&SlimError::MissingParameter("citt".into()))
        );
        let compiled = compile("SELECT 'perché', @id FROM città", &parameters).unwrap();
        assert_eq!(compiled.sql, "SELECT 'perché', ? FROM città");
    }

    #[test]
    fn compiled_display() {
        let parameters = params! { "id" => 1 };
        let compiled = compile("SELECT * FROM t WHERE id = @id", &parameters).unwrap();
        assert_eq!(
            compiled.to_string(),
            "SELECT * FROM t WHERE id = ? with 1 bound value(s)"
        );
        let long = format!("SELECT '{}'", "x".repeat(1000));
        let displayed = CompiledStatement::raw(long).to_string();
        assert!(displayed.len() < 510);
        assert!(displayed.ends_with("..."));
    }
}
