//! End-to-end tests through the public `Engine` API

use proptest::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use storeql::sql::{parse_query, Statement};
use storeql::{
    Engine, EngineConfig, FileBackend, MemoryBackend, Namespace, Result, Row, StorageBackend,
    StoreError, Value,
};
use tempfile::TempDir;

fn column(rows: &[Row], field: &str) -> Vec<Value> {
    rows.iter()
        .map(|row| row.get(field).cloned().unwrap_or(Value::Null))
        .collect()
}

fn numbers(values: &[i64]) -> Vec<Value> {
    values.iter().map(|&n| Value::from(n)).collect()
}

fn engine_with_rows(n: i64) -> Engine {
    let mut engine = Engine::in_memory();
    for id in 1..=n {
        engine
            .query(&format!("INSERT INTO t (id, active) VALUES ({}, {})", id, id % 2))
            .unwrap();
    }
    engine
}

#[test]
fn literal_keywords_are_not_rewritten() {
    let mut engine = Engine::in_memory();
    engine
        .query("INSERT INTO words (w, note) VALUES ('select', \"delete from where and or\")")
        .unwrap();

    let result = engine.query("SELECT * FROM words WHERE w = 'select'").unwrap();
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0]["w"], Value::from("select"));
    assert_eq!(result.rows[0]["note"], Value::from("delete from where and or"));
}

#[test]
fn literal_punctuation_is_preserved() {
    let mut engine = Engine::in_memory();
    engine
        .query("INSERT INTO t (s) VALUES ('a  =  b, (c) != d')")
        .unwrap();
    let result = engine.query("SELECT s FROM t").unwrap();
    assert_eq!(result.rows[0]["s"], Value::from("a  =  b, (c) != d"));
}

#[test]
fn keyword_shaped_names_and_values_are_kept() {
    let mut engine = Engine::in_memory();
    engine.query("INSERT INTO local.desc (a) VALUES (1)").unwrap();
    assert!(engine.table_exists("local.desc").unwrap());
    assert_eq!(engine.list_tables(Namespace::Local), vec!["desc".to_string()]);

    engine.query("insert into t (tag) values (rock-and-roll)").unwrap();
    engine.query("INSERT INTO t (tag) VALUES ('desc')").unwrap();

    let result = engine.query("SELECT * FROM t WHERE tag = 'rock-and-roll'").unwrap();
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0]["tag"], Value::from("rock-and-roll"));

    // An unquoted comparand keeps its spelling even when it reads like a keyword
    let result = engine.query("select * from t where tag = desc").unwrap();
    assert_eq!(column(&result.rows, "tag"), vec![Value::from("desc")]);
}

#[test]
fn literal_touching_a_keyword() {
    let mut engine = Engine::in_memory();
    engine.query("INSERT INTO t (a, b) VALUES ('x', 1)").unwrap();
    engine.query("INSERT INTO t (a, b) VALUES ('x', 2)").unwrap();

    let result = engine.query("SELECT b FROM t WHERE a='x'AND b=1").unwrap();
    assert_eq!(column(&result.rows, "b"), numbers(&[1]));

    let result = engine.query("SELECT b FROM t WHERE a='x'LIMIT 1").unwrap();
    assert_eq!(column(&result.rows, "b"), numbers(&[1]));
}

#[test]
fn trailing_backslash_in_literal() {
    let mut engine = Engine::in_memory();
    engine.query(r"INSERT INTO files (path) VALUES ('C:')").unwrap();
    let result = engine.query(r"SELECT * FROM files WHERE path = 'C:'").unwrap();
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0]["path"], Value::from(r"C:"));
}

#[test]
fn nested_parentheses() {
    let mut engine = Engine::in_memory();
    engine.query("INSERT INTO t (id, active) VALUES (5, 1)").unwrap();
    engine.query("INSERT INTO t (id, active) VALUES (50, 1)").unwrap();
    engine.query("INSERT INTO t (id, active) VALUES (95, 0)").unwrap();

    let result = engine
        .query("SELECT id FROM t WHERE (id<10 OR id>90) AND active=1")
        .unwrap();
    assert_eq!(column(&result.rows, "id"), numbers(&[5]));
}

#[test]
fn deeply_nested_groups() {
    let mut engine = engine_with_rows(10);
    let result = engine
        .query("SELECT id FROM t WHERE ((id = 1 OR id = 2) OR (id > 8 AND (active = 0))) ORDERBY id")
        .unwrap();
    assert_eq!(column(&result.rows, "id"), numbers(&[1, 2, 10]));
}

#[test]
fn no_precedence_between_and_or() {
    let mut engine = engine_with_rows(4);
    // Left to right: once `id = 1` is false the AND stops the chain
    let result = engine
        .query("SELECT id FROM t WHERE id = 1 AND active = 1 OR id = 4")
        .unwrap();
    assert_eq!(column(&result.rows, "id"), numbers(&[1]));
}

#[test]
fn order_by_cascade() {
    let mut engine = Engine::in_memory();
    engine.query("INSERT INTO t (a, b) VALUES (1, 2)").unwrap();
    engine.query("INSERT INTO t (a, b) VALUES (1, 1)").unwrap();
    engine.query("INSERT INTO t (a, b) VALUES (0, 5)").unwrap();

    let result = engine.query("SELECT * FROM t ORDERBY a,b ASC").unwrap();
    assert_eq!(column(&result.rows, "a"), numbers(&[0, 1, 1]));
    assert_eq!(column(&result.rows, "b"), numbers(&[5, 1, 2]));

    let result = engine.query("SELECT * FROM t ORDERBY a, b DESC").unwrap();
    assert_eq!(column(&result.rows, "b"), numbers(&[2, 1, 5]));
}

#[test]
fn insert_validation_with_auto_increment() {
    let mut engine = Engine::in_memory();
    engine.define_table("t", &["id auto_inc", "x"]).unwrap();

    engine.query("INSERT INTO t (x) VALUES (5)").unwrap();
    let table = engine.get_table("t").unwrap();
    let mut expected = Row::new();
    expected.insert("id".into(), Value::from(1));
    expected.insert("x".into(), Value::from(5));
    assert_eq!(table.rows, vec![expected]);

    let result = engine.query("INSERT INTO t (id, x) VALUES (100, 6)").unwrap();
    assert_eq!(column(&result.rows, "id"), numbers(&[1, 2]));
}

#[test]
fn limit_after_filter_and_sort() {
    let mut engine = engine_with_rows(5);
    let result = engine.query("SELECT * FROM t LIMIT 2").unwrap();
    assert_eq!(column(&result.rows, "id"), numbers(&[1, 2]));

    let result = engine
        .query("SELECT * FROM t WHERE active = 1 ORDERBY id DESC LIMIT 2")
        .unwrap();
    assert_eq!(column(&result.rows, "id"), numbers(&[5, 3]));

    let result = engine.query("SELECT * FROM t LIMIT 0").unwrap();
    assert!(result.rows.is_empty());
}

#[test]
fn delete_without_where_empties_table() {
    let mut engine = engine_with_rows(3);
    let result = engine.query("DELETE FROM t").unwrap();
    assert_eq!(result.affected_rows, 3);
    assert!(result.rows.is_empty());
    assert!(engine.query("SELECT * FROM t").unwrap().rows.is_empty());
}

#[test]
fn update_only_touches_named_fields() {
    let mut engine = Engine::in_memory();
    engine.define_table("t", &["id auto_inc", "name", "stamp timestamp"]).unwrap();
    engine.query("INSERT INTO t (name) VALUES ('ann')").unwrap();
    let stamp = engine.get_table("t").unwrap().rows[0]["stamp"].clone();
    assert!(matches!(stamp, Value::Number(ms) if ms > 0.0));

    engine.query("UPDATE t SET name = 'bea' WHERE id = 1").unwrap();
    let row = &engine.get_table("t").unwrap().rows[0];
    assert_eq!(row["name"], Value::from("bea"));
    assert_eq!(row["stamp"], stamp);
    assert_eq!(row["id"], Value::from(1));
}

#[test]
fn select_results_are_copies() {
    let mut engine = engine_with_rows(2);
    let result = engine.query("SELECT id FROM t").unwrap();
    assert!(result.rows.iter().all(|row| row.len() == 1));

    let again = engine.query("SELECT * FROM t").unwrap();
    assert!(again.rows.iter().all(|row| row.contains_key("active")));
}

#[test]
fn malformed_queries_fail_fast() {
    let mut engine = Engine::in_memory();
    for sql in ["EXPLODE t", "", "SELECT * FROM t WHERE (a = 1", "SELECT * FROM t LIMIT x"] {
        assert!(
            matches!(engine.query(sql), Err(StoreError::MalformedQuery(_))),
            "{:?} should be rejected",
            sql
        );
    }
    assert!(matches!(
        engine.query("SELECT * FROM t WHERE a = 'open"),
        Err(StoreError::MalformedQuery(_))
    ));
}

#[test]
fn committed_state_survives_reopen() {
    let backend = Arc::new(MemoryBackend::new());
    {
        let mut engine = Engine::open(backend.clone(), EngineConfig::default()).unwrap();
        engine.define_table("session.cart", &["id auto_inc", "item"]).unwrap();
        engine.query("INSERT INTO session.cart (item) VALUES ('tea')").unwrap();
        engine.query("INSERT INTO users (name) VALUES ('ann')").unwrap();
    }

    let mut engine = Engine::open(backend, EngineConfig::default()).unwrap();
    assert_eq!(engine.show_tables(), "[local]\n\tusers\n[session]\n\tcart");

    engine.query("INSERT INTO session.cart (item) VALUES ('milk')").unwrap();
    let result = engine.query("SELECT id FROM session.cart WHERE item = 'milk'").unwrap();
    assert_eq!(column(&result.rows, "id"), numbers(&[2]));
}

#[test]
fn file_backend_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig::default();
    {
        let backend = Arc::new(FileBackend::from_config(dir.path(), &config));
        let mut engine = Engine::open(backend, config.clone()).unwrap();
        engine.query("INSERT INTO notes (text) VALUES ('hello world')").unwrap();
    }
    assert!(dir.path().join("storeql.local.json").exists());
    assert!(!dir.path().join("storeql.session.json").exists());

    let backend = Arc::new(FileBackend::from_config(dir.path(), &config));
    let mut engine = Engine::open(backend, config).unwrap();
    let result = engine.query("SELECT * FROM notes").unwrap();
    assert_eq!(result.rows[0]["text"], Value::from("hello world"));
}

/// Backend whose saves can be switched off
#[derive(Default)]
struct FlakyBackend {
    inner: MemoryBackend,
    broken: AtomicBool,
}

impl StorageBackend for FlakyBackend {
    fn load(&self, namespace: Namespace) -> Result<Option<String>> {
        self.inner.load(namespace)
    }

    fn save(&self, namespace: Namespace, blob: &str) -> Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Persistence("storage unavailable".to_string()));
        }
        self.inner.save(namespace, blob)
    }
}

#[test]
fn failed_commit_is_surfaced() {
    let backend = Arc::new(FlakyBackend::default());
    let mut engine = Engine::open(backend.clone(), EngineConfig::default()).unwrap();
    engine.query("INSERT INTO t (a) VALUES (1)").unwrap();

    backend.broken.store(true, Ordering::SeqCst);
    assert!(matches!(
        engine.query("INSERT INTO t (a) VALUES (2)"),
        Err(StoreError::Persistence(_))
    ));
    // Reads never commit
    assert!(engine.query("SELECT * FROM t").is_ok());

    // The in-memory write is kept even though the commit failed
    assert_eq!(engine.get_table("t").unwrap().rows.len(), 2);
    let persisted = backend.inner.blob(Namespace::Local).unwrap();
    assert!(!persisted.contains("2.0"));
}

fn spaced(parts: &[&str], gaps: &[usize]) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        out.push_str(part);
        out.push_str(&" ".repeat(gaps[i % gaps.len()]));
    }
    out
}

proptest! {
    #[test]
    fn whitespace_does_not_change_parse(
        gaps in prop::collection::vec(0usize..4, 1..8),
        a in 0i64..1000,
        b in "[a-z]{1,8}",
    ) {
        let a = a.to_string();
        let parts: [&str; 20] = [
            "UPDATE ", "t ", "SET ", "x", "=", a.as_str(), ",", "y", "=", b.as_str(),
            " WHERE ", "(", "id", ">=", "3", " OR ", "id", "<", "1", ")",
        ];
        let canonical = parse_query(&parts.concat(), "LIT").unwrap();
        let reparsed = parse_query(&spaced(&parts, &gaps), "LIT").unwrap();
        prop_assert_eq!(&canonical, &reparsed);
        prop_assert!(matches!(canonical, Statement::Update(_)));
    }
}
