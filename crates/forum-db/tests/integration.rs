use forum_db::{create_pool, initialize_schema, DbRuntimeSettings};

#[test]
fn db_initialization_works() {
    let pool = create_pool(":memory:", DbRuntimeSettings::default()).expect("failed to create pool");
    let conn = pool.get().expect("failed to get connection");
    initialize_schema(&conn).expect("failed to initialize schema");

    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
        .expect("failed to prepare table query");
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .expect("failed to execute table query")
        .map(|r| r.expect("failed to read table name"))
        .collect();

    assert_eq!(tables, vec!["answers".to_string(), "questions".to_string()]);
}

#[test]
fn schema_survives_reopen_of_file_store() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("forum.db");
    let path = path.to_str().expect("temp path should be utf-8");

    {
        let pool = create_pool(path, DbRuntimeSettings::default()).unwrap();
        let conn = pool.get().unwrap();
        initialize_schema(&conn).unwrap();
        conn.execute("INSERT INTO questions (title) VALUES ('persisted')", [])
            .unwrap();
    }

    let pool = create_pool(path, DbRuntimeSettings::default()).unwrap();
    let conn = pool.get().unwrap();
    initialize_schema(&conn).expect("re-initialization should be a no-op");

    let title: String = conn
        .query_row("SELECT title FROM questions", [], |row| row.get(0))
        .unwrap();
    assert_eq!(title, "persisted");
}

#[test]
fn pooled_connections_enforce_cascade() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forum.db");
    let settings = DbRuntimeSettings {
        busy_timeout_ms: 1_000,
        pool_max_size: 2,
        ..Default::default()
    };
    let pool = create_pool(path.to_str().unwrap(), settings).unwrap();

    {
        let conn = pool.get().unwrap();
        initialize_schema(&conn).unwrap();
        conn.execute("INSERT INTO questions (title) VALUES ('q')", [])
            .unwrap();
        conn.execute("INSERT INTO answers (question_id, content) VALUES (1, 'a')", [])
            .unwrap();
    }

    // Hold one connection so the delete runs on the other.
    let _held = pool.get().unwrap();
    let conn = pool.get().unwrap();
    conn.execute("DELETE FROM questions WHERE id = 1", []).unwrap();
    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM answers", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
}
