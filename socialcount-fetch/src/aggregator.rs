//! Concurrent fan-out over every registered source.

use socialcount_core::{AggregateReport, CountResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{Id, JoinSet};
use tracing::{debug, error, info, instrument};

use crate::cancel::CancelSignal;
use crate::source::SourceClient;

/// Queries every registered source concurrently for one handle.
///
/// The set of clients is fixed at construction.
pub struct Aggregator {
    clients: Vec<Arc<dyn SourceClient>>,
}

impl Aggregator {
    /// Creates an aggregator over the given clients.
    pub fn new(clients: Vec<Arc<dyn SourceClient>>) -> Self {
        Self { clients }
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns true if no source is registered.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Platform names of the registered sources.
    pub fn platforms(&self) -> Vec<&str> {
        self.clients.iter().map(|c| c.platform()).collect()
    }

    /// Fetches the count for `handle` from every source.
    ///
    /// Waits for every source to finish, or for `cancel`. A cancelled query
    /// returns the entries that had already been decided and sets
    /// [`AggregateReport::cancelled`]. A source task that panics is logged
    /// and left out of the report.
    #[instrument(skip(self, cancel), fields(sources = self.clients.len()))]
    pub async fn query(&self, handle: &str, cancel: &CancelSignal) -> AggregateReport {
        let (mut tasks, platforms) = self.spawn_all(handle, cancel);
        let mut results = Vec::with_capacity(self.clients.len());
        let mut cancelled = false;

        loop {
            let joined = tokio::select! {
                biased;
                () = cancel.cancelled(), if !cancelled => {
                    info!("Query cancelled, collecting completed sources");
                    cancelled = true;
                    tasks.abort_all();
                    continue;
                }
                joined = tasks.join_next() => joined,
            };

            let Some(joined) = joined else {
                break;
            };

            match joined {
                Ok(result) if result.is_settled() => results.push(result),
                Ok(result) => debug!(platform = %result.source, "Source did not finish"),
                Err(e) if e.is_cancelled() => debug!("Source task aborted"),
                Err(e) => error!(
                    platform = platforms.get(&e.id()).copied().unwrap_or("unknown"),
                    error = %e,
                    "Source task failed unexpectedly"
                ),
            }
        }

        debug!(
            entries = results.len(),
            successes = results.iter().filter(|r| r.success).count(),
            cancelled,
            "Query complete"
        );
        AggregateReport::new(handle, results, cancelled)
    }

    /// Spawns one task per source, keyed back to its platform by task id.
    fn spawn_all(
        &self,
        handle: &str,
        cancel: &CancelSignal,
    ) -> (JoinSet<CountResult>, HashMap<Id, &str>) {
        let mut tasks = JoinSet::new();
        let mut platforms = HashMap::with_capacity(self.clients.len());

        for client in &self.clients {
            let task_client = Arc::clone(client);
            let handle = handle.to_string();
            let cancel = cancel.clone();
            let task = tasks.spawn(async move { task_client.get_count(&handle, &cancel).await });
            platforms.insert(task.id(), client.platform());
        }

        (tasks, platforms)
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("platforms", &self.platforms())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
