use std::error::Error as StdError;

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SortError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// One row of the audit log. The field set is the fixed column layout of
/// every sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: String,
    pub operation: String,
    pub arguments: Value,
    pub options: Option<Value>,
    pub outcome: Outcome,
    pub result: Option<Value>,
    pub error_type: Option<String>,
    pub error_message: Option<String>,
    /// Messages of the error's `source()` chain, outermost cause first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_chain: Vec<String>,
}

impl AuditRecord {
    #[must_use]
    pub fn success(
        operation: &str,
        arguments: Value,
        options: Option<Value>,
        result: Option<Value>,
    ) -> Self {
        Self {
            timestamp: now(),
            operation: operation.to_string(),
            arguments,
            options,
            outcome: Outcome::Success,
            result,
            error_type: None,
            error_message: None,
            error_chain: Vec::new(),
        }
    }

    #[must_use]
    pub fn failure(
        operation: &str,
        arguments: Value,
        options: Option<Value>,
        error: &SortError,
    ) -> Self {
        let mut error_chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            error_chain.push(cause.to_string());
            source = cause.source();
        }

        Self {
            timestamp: now(),
            operation: operation.to_string(),
            arguments,
            options,
            outcome: Outcome::Failure,
            result: None,
            error_type: Some(error.kind().to_string()),
            error_message: Some(error.to_string()),
            error_chain,
        }
    }
}

fn now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
