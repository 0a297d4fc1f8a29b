//! Ready-made payloads for tests

use chrono::NaiveDate;
use task_core::models::NewTask;

/// Minimal payload: just a title, everything else on defaults
pub fn task_payload(title: &str) -> NewTask {
    NewTask::new(title)
}

/// Payload with an explicit priority
pub fn payload_with_priority(title: &str, priority: i64) -> NewTask {
    NewTask {
        priority,
        ..NewTask::new(title)
    }
}

/// Payload already marked completed
pub fn completed_payload(title: &str) -> NewTask {
    NewTask {
        is_completed: true,
        ..NewTask::new(title)
    }
}

/// Payload with a due date
pub fn payload_with_due_date(title: &str, year: i32, month: u32, day: u32) -> NewTask {
    NewTask {
        due_date: NaiveDate::from_ymd_opt(year, month, day),
        ..NewTask::new(title)
    }
}

/// A batch of distinct payloads, titled `task-00` through `task-NN`
pub fn sample_payloads(count: usize) -> Vec<NewTask> {
    (0..count)
        .map(|i| NewTask::new(format!("task-{i:02}")))
        .collect()
}
