//! Explicit logging middleware around fallible and infallible operations.

use log::{debug, error, warn};
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

use super::{record::AuditRecord, sink::AuditSink};

/// Description of one call: operation name, positional arguments, and
/// optional settings that shaped the call.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub operation: &'static str,
    pub arguments: Value,
    pub options: Option<Value>,
}

impl Invocation {
    #[must_use]
    pub fn new(operation: &'static str, arguments: Value) -> Self {
        Self {
            operation,
            arguments,
            options: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

/// Wraps operations and reports them to an injected [`AuditSink`].
///
/// Failures are always recorded and handed back to the caller unchanged.
/// Successes are logged at debug level and recorded only when
/// `record_successes` is on. A sink that fails to append is logged and
/// otherwise ignored.
#[derive(Debug)]
pub struct Audited<S> {
    sink: S,
    record_successes: bool,
}

impl<S: AuditSink> Audited<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            record_successes: false,
        }
    }

    #[must_use]
    pub fn record_successes(mut self, enabled: bool) -> Self {
        self.record_successes = enabled;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run a fallible operation.
    ///
    /// # Errors
    ///
    /// Returns whatever error `op` returns, after it has been recorded.
    pub fn call<T, F>(&self, invocation: Invocation, op: F) -> Result<T>
    where
        T: Serialize,
        F: FnOnce() -> Result<T>,
    {
        match op() {
            Ok(value) => {
                self.succeeded(invocation, &value);
                Ok(value)
            }
            Err(e) => {
                error!(
                    "Error in '{}' (arguments: {}): {}",
                    invocation.operation, invocation.arguments, e
                );
                let record = AuditRecord::failure(
                    invocation.operation,
                    invocation.arguments,
                    invocation.options,
                    &e,
                );
                self.append(&record);
                Err(e)
            }
        }
    }

    /// Run an operation that cannot fail.
    pub fn observe<T, F>(&self, invocation: Invocation, op: F) -> T
    where
        T: Serialize,
        F: FnOnce() -> T,
    {
        let value = op();
        self.succeeded(invocation, &value);
        value
    }

    fn succeeded<T: Serialize>(&self, invocation: Invocation, value: &T) {
        let result = match serde_json::to_value(value) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(
                    "Could not serialize result of '{}': {}",
                    invocation.operation, e
                );
                None
            }
        };

        debug!(
            "'{}' (arguments: {}) -> {}",
            invocation.operation,
            invocation.arguments,
            result.as_ref().unwrap_or(&Value::Null)
        );

        if self.record_successes {
            let record = AuditRecord::success(
                invocation.operation,
                invocation.arguments,
                invocation.options,
                result,
            );
            self.append(&record);
        }
    }

    fn append(&self, record: &AuditRecord) {
        if let Err(e) = self.sink.append(record) {
            warn!(
                "Failed to record '{}' in audit log: {}",
                record.operation, e
            );
        }
    }
}
