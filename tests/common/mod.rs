#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use rowport::prelude::*;

/// Executor fake that records every statement and replays scripted query
/// results in order. Queries with no scripted result return an empty set.
pub struct RecordingExecutor {
    statements: Mutex<Vec<String>>,
    queries: Mutex<Vec<String>>,
    results: Mutex<VecDeque<ResultSet>>,
    fail: bool,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            results: Mutex::new(VecDeque::new()),
            fail: false,
        }
    }

    /// An executor whose every call reports failure
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Queue a result set for the next unanswered query
    pub fn push_result(&self, result: ResultSet) {
        self.results.lock().unwrap().push_back(result);
    }

    /// Statements passed to `execute`, in call order
    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    /// Statements passed to `query`, in call order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn execute(&self, sql: &str) -> Result<()> {
        if self.fail {
            return Err(Error::execution_failed_with_sql("scripted failure", sql));
        }
        self.statements.lock().unwrap().push(sql.to_string());
        Ok(())
    }

    async fn query(&self, sql: &str) -> Result<ResultSet> {
        if self.fail {
            return Err(Error::execution_failed_with_sql("scripted failure", sql));
        }
        self.queries.lock().unwrap().push(sql.to_string());
        let result = self.results.lock().unwrap().pop_front();
        Ok(result.unwrap_or_default())
    }
}

/// In-memory single-table executor that interprets the narrow statement
/// grammar the crate generates, enough to run export/import round trips
/// without a database.
///
/// The parser assumes test values free of `", "` sequences; that is the one
/// shape it cannot split past.
pub struct MemoryTable {
    rows: Mutex<Vec<Vec<(String, String)>>>,
    inserts: Mutex<u32>,
    updates: Mutex<u32>,
    selects: Mutex<u32>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            inserts: Mutex::new(0),
            updates: Mutex::new(0),
            selects: Mutex::new(0),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn insert_count(&self) -> u32 {
        *self.inserts.lock().unwrap()
    }

    pub fn update_count(&self) -> u32 {
        *self.updates.lock().unwrap()
    }

    pub fn select_count(&self) -> u32 {
        *self.selects.lock().unwrap()
    }

    fn apply_insert(&self, sql: &str) {
        // INSERT INTO t (a, b) VALUES("1", "2") [ON DUPLICATE KEY UPDATE ...]
        let rest = sql.strip_prefix("INSERT INTO ").expect("insert prefix");
        let (_table, rest) = rest.split_once(" (").expect("column list");
        let (columns, rest) = rest.split_once(") VALUES(").expect("values list");
        let values = match rest.split_once(") ON DUPLICATE KEY UPDATE ") {
            Some((values, _)) => values,
            None => rest.strip_suffix(')').expect("closing paren"),
        };

        let columns: Vec<&str> = columns.split(", ").collect();
        let values: Vec<String> = split_literals(values);
        assert_eq!(columns.len(), values.len(), "malformed insert: {sql}");

        let row = columns
            .into_iter()
            .map(str::to_string)
            .zip(values)
            .collect();
        self.rows.lock().unwrap().push(row);
        *self.inserts.lock().unwrap() += 1;
    }

    fn apply_update(&self, sql: &str) {
        // UPDATE t SET a="1", b="2" [WHERE ...]
        let rest = sql.strip_prefix("UPDATE ").expect("update prefix");
        let (_table, rest) = rest.split_once(" SET ").expect("set clause");
        let (assignments, conditions) = match rest.split_once(" WHERE ") {
            Some((set, cond)) => (set, parse_pairs(cond, " AND ")),
            None => (rest, Vec::new()),
        };
        let assignments = parse_pairs(assignments, ", ");

        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut().filter(|row| matches(row, &conditions)) {
            for (column, value) in &assignments {
                match row.iter_mut().find(|(c, _)| c == column) {
                    Some(entry) => entry.1 = value.clone(),
                    None => row.push((column.clone(), value.clone())),
                }
            }
        }
        *self.updates.lock().unwrap() += 1;
    }

    fn run_select(&self, sql: &str) -> ResultSet {
        // SELECT a, b FROM t [WHERE ...]
        let rest = sql.strip_prefix("SELECT ").expect("select prefix");
        let (projection, rest) = rest.split_once(" FROM ").expect("from clause");
        let conditions = match rest.split_once(" WHERE ") {
            Some((_table, cond)) => parse_pairs(cond, " AND "),
            None => Vec::new(),
        };

        *self.selects.lock().unwrap() += 1;
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| matches(row, &conditions))
            .map(|row| project(row, projection))
            .collect()
    }
}

fn matches(row: &[(String, String)], conditions: &[(String, String)]) -> bool {
    conditions.iter().all(|(column, value)| {
        row.iter()
            .any(|(c, v)| c.eq_ignore_ascii_case(column) && v == value)
    })
}

fn project(row: &[(String, String)], projection: &str) -> Row {
    if projection == "*" {
        return row.iter().cloned().collect();
    }
    projection
        .split(", ")
        .filter_map(|column| {
            row.iter()
                .find(|(c, _)| c.eq_ignore_ascii_case(column))
                .cloned()
        })
        .collect()
}

/// Split a `"v1", "v2"` literal list into unquoted values
fn split_literals(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split("\", \"")
        .map(|part| unquote(part.trim_start_matches('"').trim_end_matches('"')))
        .collect()
}

/// Split `a="1"<sep>b="2"` into (column, unquoted value) pairs
fn parse_pairs(text: &str, sep: &str) -> Vec<(String, String)> {
    text.split(sep)
        .map(|pair| {
            let (column, quoted) = pair.split_once('=').expect("assignment");
            let value = quoted
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .expect("quoted literal");
            (column.to_string(), unquote(value))
        })
        .collect()
}

fn unquote(value: &str) -> String {
    value
        .replace("\\\"", "\"")
        .replace("\\'", "'")
        .replace("\\\\", "\\")
}

#[async_trait]
impl Executor for MemoryTable {
    async fn execute(&self, sql: &str) -> Result<()> {
        if sql.starts_with("INSERT INTO ") {
            self.apply_insert(sql);
        } else if sql.starts_with("UPDATE ") {
            self.apply_update(sql);
        } else {
            return Err(Error::execution_failed_with_sql(
                "unsupported statement",
                sql,
            ));
        }
        Ok(())
    }

    async fn query(&self, sql: &str) -> Result<ResultSet> {
        if !sql.starts_with("SELECT ") {
            return Err(Error::execution_failed_with_sql("unsupported query", sql));
        }
        Ok(self.run_select(sql))
    }
}
