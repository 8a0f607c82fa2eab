//! Progress reporting. The runner emits one event per finished problem, in
//! completion order; the console layer consumes them through a sink.

use std::sync::Arc;

/// How many problems are done out of the total.
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent {
    pub done: usize,
    pub total: usize,
}

pub type ProgressSink = Arc<dyn Fn(ProgressEvent) + Send + Sync>;
