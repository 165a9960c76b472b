use thiserror::Error;

/// Errors raised by the category hierarchy engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("duplicate category id: {0}")]
    DuplicateId(String),

    #[error("category not found: {0}")]
    NotFound(String),

    #[error("edge already exists: {child} -> {parent}")]
    DuplicateEdge { child: String, parent: String },

    #[error("cycle rejected: {parent} is a descendant of {child}")]
    CycleDetected { child: String, parent: String },
}

pub type TaxonomyResult<T> = Result<T, TaxonomyError>;

/// Errors raised by the task board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("duplicate task id: {0}")]
    DuplicateId(String),

    #[error("task not found: {0}")]
    NotFound(String),

    #[error("no queued tasks to execute")]
    QueueEmpty,

    #[error("no queued tasks in domain: {0}")]
    EmptyDomain(String),

    #[error("task not completed yet: {0}")]
    NotCompleted(String),
}

pub type TaskResult<T> = Result<T, TaskError>;
