use predsql::qb::SqlQb;
use predsql::{BuildError, Row, Value, Where, delete, insert, select, update};
use serde_json::json;

fn tree(json: serde_json::Value) -> Where {
    Where::from_json(&json).unwrap()
}

fn values(json: serde_json::Value) -> Vec<Value> {
    serde_json::from_value(json).unwrap()
}

// ==================== SELECT ====================

#[test]
fn select_basic_where() {
    let q = select(["*"]).from("books").filter(tree(json!([{"id": 5}])));
    assert_eq!(q.to_sql().unwrap(), "SELECT *\nFROM books\nWHERE id = ?");
    assert_eq!(q.params().unwrap(), values(json!([5])));
}

#[test]
fn select_or_operator() {
    let q = select(["*"])
        .from("books")
        .filter(tree(json!([{"id": 5}, "or", {"id": 3}])));
    assert_eq!(q.to_sql().unwrap(), "SELECT *\nFROM books\nWHERE id = ? OR id = ?");
    assert_eq!(q.params().unwrap(), values(json!([5, 3])));
}

#[test]
fn select_mixed_connectives_and_lists() {
    let q = select(["*"]).from("books").filter(tree(json!([
        {"a": 1, "b": 2},
        "and",
        {"author": ["John A", "John B"]}
    ])));
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT *\nFROM books\nWHERE (a = ? AND b = ?) AND author IN (?, ?)"
    );
    assert_eq!(q.params().unwrap(), values(json!([1, 2, "John A", "John B"])));
}

#[test]
fn select_multiple_nested_conditions() {
    let q = select(["*"]).from("books").filter(tree(json!([
        {"a": 1},
        "or",
        [[{"b": 2}, "and", [[{"c": 3}, "or", {"author": ["John A", "John B"]}]]]]
    ])));
    assert_eq!(
        q.to_sql().unwrap(),
        concat!(
            "SELECT *\nFROM books\nWHERE a = ? OR (\n",
            "    b = ? AND (\n",
            "        c = ? OR author IN (?, ?)\n",
            "    )\n",
            ")"
        )
    );
    assert_eq!(q.params().unwrap(), values(json!([1, 2, 3, "John A", "John B"])));
}

#[test]
fn select_like_with_nulls() {
    let q = select(["*"])
        .from("books")
        .filter(tree(json!([{"%title": ["s", null, "a", null]}])));
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT *\nFROM books\nWHERE (title LIKE ? OR title LIKE ? OR title IS NULL)"
    );
    assert_eq!(q.params().unwrap(), values(json!(["s", "a"])));
}

#[test]
fn select_in_with_multiple_nulls() {
    let q = select(["*"])
        .from("books")
        .filter(tree(json!([{"title": [null, "x", null]}])));
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT *\nFROM books\nWHERE (title IS NULL OR title IN (?))"
    );
    assert_eq!(q.params().unwrap(), values(json!(["x"])));
}

#[test]
fn select_impossible_queries() {
    for (group, expected) in [
        (json!({"title": []}), "1=0"),
        (json!({"%title": []}), "1=2"),
        (json!({"<price": []}), "0=2"),
    ] {
        let q = select(["*"]).from("books").filter(tree(json!([group])));
        assert_eq!(
            q.to_sql().unwrap(),
            format!("SELECT *\nFROM books\nWHERE {expected}")
        );
        assert!(q.params().unwrap().is_empty());
    }
}

#[test]
fn select_comparisons_reject_null() {
    for group in [
        json!({"<price": null}),
        json!({"<price": [5, null]}),
        json!({"<=price": null}),
        json!({">price": [null]}),
        json!({">=price": null}),
    ] {
        let q = select(["*"]).from("books").filter(tree(json!([group])));
        assert!(matches!(
            q.pair(),
            Err(BuildError::NullComparison { .. })
        ));
    }
}

#[test]
fn select_full_layout() {
    let q = select(["id", "name"])
        .column_as("bookTitle", "title")
        .from("books")
        .filter(tree(json!([{"!status": "deleted"}])))
        .order_by("id DESC")
        .limit_offset(40, 20)
        .option("max_matches", 1000);
    assert_eq!(
        q.to_sql().unwrap(),
        concat!(
            "SELECT id, name, bookTitle AS title\n",
            "FROM books\n",
            "WHERE status != ?\n",
            "ORDER BY id DESC\n",
            "LIMIT 40, 20\n",
            "OPTION max_matches=?"
        )
    );
    assert_eq!(q.params().unwrap(), values(json!(["deleted", 1000])));
}

// ==================== INSERT ====================

#[test]
fn insert_rows() {
    let q = insert("fruits").data([
        Row::new().set("color", "red").set("name", "apple"),
        Row::new().set("color", "green").set("name", "mango"),
    ]);
    assert_eq!(
        q.to_sql().unwrap(),
        "INSERT INTO fruits\n(color, name)\nVALUES\n(?, ?),\n(?, ?)"
    );
    assert_eq!(q.params().unwrap(), values(json!(["red", "apple", "green", "mango"])));
}

#[test]
fn insert_columns_then_values() {
    let q = insert("fruits").columns(["color"]).values([["red"]]);
    assert_eq!(q.to_sql().unwrap(), "INSERT INTO fruits\n(color)\nVALUES\n(?)");
    assert_eq!(q.params().unwrap(), values(json!(["red"])));
}

#[test]
fn insert_failures() {
    let err = insert("fruits").to_sql().unwrap_err();
    assert!(err.to_string().starts_with("No data found"));

    let err = insert("fruits")
        .data([Row::new().set("color", "red"), Row::new().set("name", "mango")])
        .to_sql()
        .unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Data array should have all objects in the same shape"));
}

// ==================== UPDATE ====================

#[test]
fn update_with_nested_where() {
    let q = update("fruits")
        .set("color", "red")
        .filter(tree(json!([{"a": 1}, "or", [[{"b": 2}, "and", {"c": 3}]]])));
    assert_eq!(
        q.to_sql().unwrap(),
        "UPDATE fruits\nSET color = ?\nWHERE a = ? OR (\n    b = ? AND c = ?\n)"
    );
    assert_eq!(q.params().unwrap(), values(json!(["red", 1, 2, 3])));
}

#[test]
fn update_skips_empty_where() {
    let q = update("fruits").set("color", "red").filter(tree(json!([{}])));
    assert_eq!(q.to_sql().unwrap(), "UPDATE fruits\nSET color = ?");
    assert_eq!(q.params().unwrap(), values(json!(["red"])));
}

#[test]
fn update_requires_set_data() {
    let err = update("fruits").set_opt("color", None::<&str>).to_sql().unwrap_err();
    assert!(err.to_string().starts_with("No data found"));
}

// ==================== DELETE ====================

#[test]
fn delete_variants() {
    let cases = [
        (json!([{"id": [1, 2, 3]}]), "id IN (?, ?, ?)", json!([1, 2, 3])),
        (json!([{"%name": "app%"}]), "name LIKE ?", json!(["app%"])),
        (json!([{"<price": 100}]), "price < ?", json!([100])),
        (json!([{"<>price": [10, 100]}]), "(price >= ? AND price <= ?)", json!([10, 100])),
        (json!([{"deletedat": null}]), "deletedat IS NULL", json!([])),
    ];
    for (filter, where_sql, params) in cases {
        let q = delete("fruits").filter(tree(filter));
        let (sql, bound) = q.pair().unwrap();
        assert_eq!(sql, format!("DELETE FROM fruits\nWHERE {where_sql}"));
        assert_eq!(bound, values(params));
    }
}

#[test]
fn delete_without_where() {
    let q = delete("fruits");
    assert_eq!(q.to_sql().unwrap(), "DELETE FROM fruits");
    assert!(q.params().unwrap().is_empty());
}
