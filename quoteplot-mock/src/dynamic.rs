use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use quoteplot_core::{DataRequest, PairKey, QuotePlotError, QuoteRecord, QuoteSource};

/// Instruction for how a fetch should behave for a given pair.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided records immediately.
    Return(Vec<QuoteRecord>),
    /// Return the provided records after sleeping.
    Delay(Duration, Vec<QuoteRecord>),
    /// Fail immediately with the provided error.
    Fail(QuotePlotError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    sticky: HashMap<PairKey, MockBehavior>,
    queued: HashMap<PairKey, VecDeque<MockBehavior>>,
    requests: Vec<DataRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for every fetch of `pair` that has no queued behavior.
    pub async fn set_behavior(&self, pair: PairKey, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.sticky.insert(pair, behavior);
    }

    /// Queue a one-shot behavior for the next fetch of `pair`. Queued
    /// behaviors are consumed in order before the sticky one applies.
    pub async fn enqueue(&self, pair: PairKey, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.queued.entry(pair).or_default().push_back(behavior);
    }

    /// Return a copy of every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<DataRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.sticky.clear();
        guard.queued.clear();
        guard.requests.clear();
    }
}

/// A source that defers all behavior to an external controller.
///
/// A fetch for a pair with no configured behavior returns no records.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        (Arc::new(Self { name, state }), controller)
    }
}

#[async_trait]
impl QuoteSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, req: &DataRequest) -> Result<Vec<QuoteRecord>, QuotePlotError> {
        // Take the behavior without holding the lock across await points.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(req.clone());
            let queued = guard
                .queued
                .get_mut(&req.pair)
                .and_then(VecDeque::pop_front);
            queued.or_else(|| guard.sticky.get(&req.pair).cloned())
        };

        match behavior {
            Some(MockBehavior::Return(records)) => Ok(records),
            Some(MockBehavior::Delay(d, records)) => {
                tokio::time::sleep(d).await;
                Ok(records)
            }
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Ok(Vec::new()),
        }
    }
}
