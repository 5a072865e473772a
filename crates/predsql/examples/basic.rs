//! Basic usage example for predsql
//!
//! Run with: cargo run --example basic -p predsql

use predsql::{
    BuildError, FormatConfig, Group, Placeholder, Row, SqlQb, Where, compile, compile_with,
    delete, insert, select, update,
};

fn main() -> Result<(), BuildError> {
    // A tree built in code: (a = ? AND b = ?) OR (title LIKE ? OR title IS NULL)
    let tree = Where::new(Group::new().with("a", 1).with("b", 2))
        .or(Group::new().with("%title", vec![Some("rust%"), None]));
    let fragment = compile(&tree)?;
    println!("WHERE {}\n  params: {:?}\n", fragment.sql, fragment.params);

    // The same tree from JSON, numbered for PostgreSQL.
    let json = serde_json::json!([
        {"!status": "deleted"},
        "and",
        [[{"<>price": [10, 100]}, "or", {"author": ["A", "B", null]}]]
    ]);
    let tree = Where::from_json(&json)?;
    let pg = FormatConfig::new().with_placeholder(Placeholder::Dollar);
    let fragment = compile_with(&tree, &pg, 0)?;
    println!("WHERE {}\n  params: {:?}\n", fragment.sql, fragment.params);

    let q = select(["id", "title"])
        .from("books")
        .filter(tree)
        .order_by("id DESC")
        .limit_offset(0, 20);
    let (sql, params) = q.pair()?;
    println!("{sql}\n  params: {params:?}\n");

    let q = insert("fruits").data([
        Row::new().set("name", "apple").set("color", "red"),
        Row::new().set("name", "mango").set("color", "green"),
    ]);
    println!("{}\n", q.to_sql()?);

    let q = update("fruits")
        .set("color", "yellow")
        .filter(Where::new(Group::new().with("name", "mango")));
    println!("{}\n", q.to_sql()?);

    // Groups whose values are all absent disappear, taking the WHERE with them.
    let q = delete("fruits").filter(Where::new(Group::new().with_opt("id", None::<i64>)));
    println!("{}", q.to_sql()?);

    // Table names are checked before anything is rendered.
    if let Err(e) = delete("fruits; DROP TABLE fruits").to_sql() {
        println!("\nrejected: {e}");
    }

    Ok(())
}
