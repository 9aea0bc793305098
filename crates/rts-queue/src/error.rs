use thiserror::Error;

use crate::HeapHandle;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("handle {0} does not address a queued element")]
    InvalidHandle(HeapHandle),

    #[error("new priority for {0} does not compare strictly less than the current one")]
    PriorityNotDecreased(HeapHandle),

    #[error("queue is empty")]
    EmptyQueue,
}

pub type QueueResult<T> = Result<T, QueueError>;
