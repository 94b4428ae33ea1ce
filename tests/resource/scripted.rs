use slimsql::{Driver, Error, PoolConfig, PoolHandle, QueryResult, Result, Value};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// Statement received by a [`ScriptedPool`].
pub type Call = (String, Option<Vec<Value>>);

#[derive(Default, Debug)]
pub struct Script {
    pub calls: Vec<Call>,
    pub responses: VecDeque<Result<QueryResult>>,
    pub pools_created: usize,
    pub pools_closed: usize,
    pub refuse_connections: bool,
}

/// Driver answering with queued responses and recording every statement it receives.
/// An empty queue answers with no rows.
#[derive(Clone, Default)]
pub struct ScriptedDriver {
    pub script: Arc<Mutex<Script>>,
}

impl ScriptedDriver {
    pub fn respond(&self, response: impl Into<QueryResult>) -> &Self {
        self.script
            .lock()
            .unwrap()
            .responses
            .push_back(Ok(response.into()));
        self
    }

    pub fn fail(&self, message: &'static str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .responses
            .push_back(Err(Error::msg(message)));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }
}

impl Driver for ScriptedDriver {
    type Pool = ScriptedPool;

    const NAME: &'static str = "scripted";

    fn create_pool(&self, _config: &PoolConfig) -> Result<ScriptedPool> {
        let mut script = self.script.lock().unwrap();
        if script.refuse_connections {
            return Err(Error::msg("Connection refused"));
        }
        script.pools_created += 1;
        Ok(ScriptedPool {
            script: self.script.clone(),
        })
    }
}

pub struct ScriptedPool {
    script: Arc<Mutex<Script>>,
}

impl PoolHandle for ScriptedPool {
    async fn run_query(&self, sql: &str, values: Option<Vec<Value>>) -> Result<QueryResult> {
        let mut script = self.script.lock().unwrap();
        script.calls.push((sql.to_owned(), values));
        script
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(QueryResult::RowSet(Vec::new())))
    }

    async fn shutdown(self) -> Result<()> {
        self.script.lock().unwrap().pools_closed += 1;
        Ok(())
    }
}
