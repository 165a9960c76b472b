//! Tests for the FIFO task board

use rstax::errors::TaskError;
use rstax::tasks::{Task, TaskBoard};

fn board_with(tasks: &[(&str, &str, &str, u32)]) -> TaskBoard {
    let mut board = TaskBoard::new();
    for (id, name, domain, effort) in tasks {
        board.add(Task::new(id, name, domain, *effort)).unwrap();
    }
    board
}

// ============================================================
// Membership Tests
// ============================================================

#[test]
fn given_new_task_when_added_then_pending_and_contained() {
    let board = board_with(&[("t1", "write docs", "docs", 30)]);
    assert!(board.contains("t1"));
    assert_eq!(board.len(), 1);
    assert_eq!(board.get("t1").unwrap().effort, 30);
}

#[test]
fn given_taken_id_when_adding_then_duplicate_id() {
    let mut board = board_with(&[("t1", "write docs", "docs", 30)]);
    let err = board.add(Task::new("t1", "other", "docs", 5)).unwrap_err();
    assert_eq!(err, TaskError::DuplicateId("t1".to_string()));
    assert_eq!(board.len(), 1);
}

#[test]
fn given_unknown_id_when_getting_or_deleting_then_not_found() {
    let mut board = TaskBoard::new();
    assert!(matches!(board.get("ghost"), Err(TaskError::NotFound(_))));
    assert!(matches!(board.delete("ghost"), Err(TaskError::NotFound(_))));
}

// ============================================================
// Execution Tests
// ============================================================

#[test]
fn given_queued_tasks_when_executing_then_fifo_order() {
    let mut board = board_with(&[
        ("t1", "first", "a", 1),
        ("t2", "second", "a", 2),
        ("t3", "third", "b", 3),
    ]);

    assert_eq!(board.execute_next().unwrap().id, "t1");
    assert_eq!(board.execute_next().unwrap().id, "t2");
    assert_eq!(board.execute_next().unwrap().id, "t3");
    assert!(board.is_empty());
}

#[test]
fn given_empty_queue_when_executing_then_queue_empty_error() {
    let mut board = TaskBoard::new();
    assert_eq!(board.execute_next().unwrap_err(), TaskError::QueueEmpty);
}

#[test]
fn given_executed_task_when_counting_then_pending_only() {
    let mut board = board_with(&[("t1", "first", "a", 1), ("t2", "second", "a", 2)]);
    board.execute_next().unwrap();

    // completed tasks stay registered but no longer count as pending
    assert_eq!(board.len(), 1);
    assert!(board.contains("t1"));
}

#[test]
fn given_completed_task_when_rescheduling_then_back_at_queue_tail() {
    let mut board = board_with(&[("t1", "first", "a", 1), ("t2", "second", "a", 2)]);
    board.execute_next().unwrap();

    board.reschedule("t1").unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board.execute_next().unwrap().id, "t2");
    assert_eq!(board.execute_next().unwrap().id, "t1");
}

#[test]
fn given_pending_task_when_rescheduling_then_not_completed_error() {
    let mut board = board_with(&[("t1", "first", "a", 1)]);
    assert_eq!(
        board.reschedule("t1").unwrap_err(),
        TaskError::NotCompleted("t1".to_string())
    );
    // no duplicate queue entry snuck in
    assert_eq!(board.len(), 1);
}

#[test]
fn given_completed_task_when_deleting_then_gone() {
    let mut board = board_with(&[("t1", "first", "a", 1)]);
    board.execute_next().unwrap();
    board.delete("t1").unwrap();

    assert!(!board.contains("t1"));
    assert!(matches!(board.reschedule("t1"), Err(TaskError::NotFound(_))));
}

#[test]
fn given_pending_task_when_deleting_then_skipped_in_execution() {
    let mut board = board_with(&[("t1", "first", "a", 1), ("t2", "second", "a", 2)]);
    board.delete("t1").unwrap();
    assert_eq!(board.execute_next().unwrap().id, "t2");
}

// ============================================================
// View Tests
// ============================================================

#[test]
fn given_tasks_when_sorting_then_effort_desc_then_name_len_asc() {
    let board = board_with(&[
        ("t1", "aaaa", "a", 10),
        ("t2", "bb", "a", 20),
        ("t3", "c", "a", 10),
    ]);

    let ids: Vec<_> = board
        .all_by_effort_then_name_len()
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(ids, vec!["t2", "t3", "t1"]);
}

#[test]
fn given_domain_when_filtering_then_pending_in_queue_order() {
    let mut board = board_with(&[
        ("t1", "first", "infra", 1),
        ("t2", "second", "docs", 2),
        ("t3", "third", "infra", 3),
    ]);
    board.execute_next().unwrap(); // t1 leaves the queue

    let ids: Vec<_> = board
        .domain_tasks("infra")
        .unwrap()
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(ids, vec!["t3"]);
}

#[test]
fn given_empty_domain_when_filtering_then_error() {
    let board = board_with(&[("t1", "first", "infra", 1)]);
    assert_eq!(
        board.domain_tasks("docs").unwrap_err(),
        TaskError::EmptyDomain("docs".to_string())
    );
}

#[test]
fn given_effort_range_when_filtering_then_inclusive_bounds() {
    let board = board_with(&[
        ("t1", "first", "a", 5),
        ("t2", "second", "a", 10),
        ("t3", "third", "a", 15),
        ("t4", "fourth", "a", 20),
    ]);

    let ids: Vec<_> = board
        .in_effort_range(10, 15)
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(ids, vec!["t2", "t3"]);
}
