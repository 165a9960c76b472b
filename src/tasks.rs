use std::collections::{HashMap, HashSet, VecDeque};

use itertools::Itertools;
use tracing::instrument;

use crate::errors::{TaskError, TaskResult};

/// A unit of work tracked by the [`TaskBoard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub domain: String,
    /// Estimated effort in minutes
    pub effort: u32,
}

impl Task {
    pub fn new(id: &str, name: &str, domain: &str, effort: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            domain: domain.to_string(),
            effort,
        }
    }
}

/// FIFO work-item queue with a side set of completed tasks.
///
/// The queue holds ids only; the board's map owns the tasks. No structural
/// invariants beyond membership bookkeeping: a task is either pending (in
/// the queue) or completed, never both.
#[derive(Debug, Default)]
pub struct TaskBoard {
    /// Pending task ids in execution order
    queue: VecDeque<String>,
    /// Ids of tasks that have been executed
    completed: HashSet<String>,
    /// All registered tasks, pending and completed
    tasks: HashMap<String, Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a new task at the tail.
    #[instrument(level = "debug", skip(self, task), fields(id = %task.id))]
    pub fn add(&mut self, task: Task) -> TaskResult<()> {
        if self.tasks.contains_key(&task.id) {
            return Err(TaskError::DuplicateId(task.id));
        }
        self.queue.push_back(task.id.clone());
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn get(&self, id: &str) -> TaskResult<&Task> {
        self.tasks
            .get(id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Drops a task entirely, whether pending or completed.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, id: &str) -> TaskResult<()> {
        if self.tasks.remove(id).is_none() {
            return Err(TaskError::NotFound(id.to_string()));
        }
        if !self.completed.remove(id) {
            self.queue.retain(|queued| queued != id);
        }
        Ok(())
    }

    /// Pops the front of the queue, marks it completed and returns it.
    #[instrument(level = "debug", skip(self))]
    pub fn execute_next(&mut self) -> TaskResult<Task> {
        let id = self.queue.pop_front().ok_or(TaskError::QueueEmpty)?;
        self.completed.insert(id.clone());
        Ok(self.tasks[&id].clone())
    }

    /// Moves a completed task back to the queue tail.
    #[instrument(level = "debug", skip(self))]
    pub fn reschedule(&mut self, id: &str) -> TaskResult<()> {
        if !self.tasks.contains_key(id) {
            return Err(TaskError::NotFound(id.to_string()));
        }
        if !self.completed.remove(id) {
            return Err(TaskError::NotCompleted(id.to_string()));
        }
        self.queue.push_back(id.to_string());
        Ok(())
    }

    /// All registered tasks, effort descending, ties broken by name length
    /// ascending.
    pub fn all_by_effort_then_name_len(&self) -> Vec<&Task> {
        self.tasks
            .values()
            .sorted_by(|a, b| {
                b.effort
                    .cmp(&a.effort)
                    .then_with(|| a.name.len().cmp(&b.name.len()))
            })
            .collect()
    }

    /// Pending tasks of one domain in queue order. Errors when the domain
    /// has nothing queued.
    pub fn domain_tasks(&self, domain: &str) -> TaskResult<Vec<&Task>> {
        let tasks: Vec<&Task> = self
            .queue
            .iter()
            .map(|id| &self.tasks[id])
            .filter(|t| t.domain == domain)
            .collect();
        if tasks.is_empty() {
            return Err(TaskError::EmptyDomain(domain.to_string()));
        }
        Ok(tasks)
    }

    /// Pending tasks with effort within `[lower, upper]`, queue order.
    pub fn in_effort_range(&self, lower: u32, upper: u32) -> Vec<&Task> {
        self.queue
            .iter()
            .map(|id| &self.tasks[id])
            .filter(|t| t.effort >= lower && t.effort <= upper)
            .collect()
    }

    /// Number of pending tasks. Completed tasks do not count.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
