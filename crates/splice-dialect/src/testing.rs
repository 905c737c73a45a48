//! Scripted connection for unit tests.

use async_trait::async_trait;

use crate::core::traits::Connection;
use crate::core::value::RowSet;
use crate::error::{ReflectError, Result};

/// Answers each query with the first registered result whose SQL fragment
/// it contains, and records every statement it was asked to run.
#[derive(Debug, Default)]
pub struct ScriptedConnection {
    responses: Vec<(String, RowSet)>,
    failures: Vec<String>,
    pub executed: Vec<String>,
}

impl ScriptedConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, fragment: &str, result: RowSet) -> Self {
        self.responses.push((fragment.to_string(), result));
        self
    }

    pub fn fail_on(mut self, fragment: &str) -> Self {
        self.failures.push(fragment.to_string());
        self
    }
}

#[async_trait]
impl Connection for ScriptedConnection {
    async fn execute(&mut self, sql: &str) -> Result<RowSet> {
        self.executed.push(sql.to_string());
        if self.failures.iter().any(|f| sql.contains(f.as_str())) {
            return Err(ReflectError::catalog(sql, "scripted failure"));
        }
        Ok(self
            .responses
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, result)| result.clone())
            .unwrap_or_default())
    }
}

/// A one-column result set.
pub fn single_column(header: &str, values: &[&str]) -> RowSet {
    RowSet::from_text(&[header], values.iter().map(|v| vec![Some(*v)]).collect())
}
