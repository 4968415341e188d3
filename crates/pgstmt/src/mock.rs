//! Scripted in-memory client for unit tests.

use crate::client::{DispatchError, Fetched, GenericClient};
use crate::error::StmtError;
use crate::row::{Record, Rows};
use crate::value::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replies to each dispatch with the next scripted response and records what
/// was sent. Once the script runs out every dispatch returns zero rows.
#[derive(Default)]
pub(crate) struct MockClient {
    responses: Mutex<VecDeque<Result<Fetched, DispatchError>>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn returning(self, records: Vec<Record>) -> Self {
        self.reply(Ok(Ok(Rows::from_records(records))))
    }

    /// Zero rows, but with a known column list.
    pub(crate) fn returning_nothing(self, columns: &[&str]) -> Self {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        self.reply(Ok(Ok(Rows::new(columns, Vec::new()))))
    }

    pub(crate) fn failing(self, err: DispatchError) -> Self {
        self.reply(Err(err))
    }

    /// The server runs the statement, but a column of the result cannot be
    /// decoded.
    pub(crate) fn undecodable(self, column: &str, message: &str) -> Self {
        self.reply(Ok(Err(StmtError::decode(column, message))))
    }

    fn reply(self, response: Result<Fetched, DispatchError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl GenericClient for MockClient {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Fetched, DispatchError> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Ok(Rows::default())))
    }
}

/// Build a record from `(column, value)` pairs.
pub(crate) fn record<V: Into<Value>>(pairs: impl IntoIterator<Item = (&'static str, V)>) -> Record {
    pairs.into_iter().collect()
}
