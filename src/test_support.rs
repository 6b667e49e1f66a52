//! Test helpers: a scripted in-memory task service
//!
//! `MockTaskService` behaves like a faithful server over a seeded task
//! set: it applies requested changes, enforces the blocked-close guard,
//! and records every call. A single failure can be injected for the
//! next call to exercise rollback paths.

use crate::service::{ServiceError, TaskService};
use crate::types::{ProjectId, SprintId, Status, Task, TaskId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// One recorded service call
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    UpdateStatus {
        task: TaskId,
        status: Status,
        sprint: Option<SprintId>,
    },
    Close {
        task: TaskId,
    },
    CloseAll {
        status: Status,
    },
    Reopen {
        task: TaskId,
    },
    Pin {
        task: TaskId,
        pinned: bool,
    },
    Subscribe {
        task: TaskId,
        subscribed: bool,
    },
}

/// In-memory stand-in for the remote persistence service
#[derive(Default)]
pub struct MockTaskService {
    tasks: Mutex<HashMap<TaskId, Task>>,
    calls: Mutex<Vec<ServiceCall>>,
    fail_next: Mutex<Option<ServiceError>>,
    delay_next: Mutex<Option<std::time::Duration>>,
}

impl MockTaskService {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock seeded with the server-side task set
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let mock = Self::new();
        {
            let mut map = mock.tasks.lock().unwrap();
            for task in tasks {
                map.insert(task.id.clone(), task);
            }
        }
        mock
    }

    /// Fail the next call with the given error
    pub fn fail_next(&self, error: ServiceError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    /// Hold the next status update for the given duration before
    /// responding, to let another request overtake it
    pub fn delay_next(&self, delay: std::time::Duration) {
        *self.delay_next.lock().unwrap() = Some(delay);
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The server-side copy of a task
    pub fn server_task(&self, id: &TaskId) -> Option<Task> {
        self.tasks.lock().unwrap().get(id).cloned()
    }

    fn record(&self, call: ServiceCall) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(call);
        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }
        Ok(())
    }

    fn with_task<F>(&self, id: &TaskId, f: F) -> Result<Task, ServiceError>
    where
        F: FnOnce(&mut Task),
    {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks.get_mut(id).ok_or_else(|| ServiceError::Transport {
            message: format!("unknown task {id}"),
        })?;
        f(task);
        Ok(task.clone())
    }

    /// Server-side blocked-close guard: rejected when the blocker is
    /// not itself closed
    fn close_rejected(tasks: &HashMap<TaskId, Task>, task: &Task) -> bool {
        match &task.blocked_by {
            Some(blocker) => tasks.get(blocker).map(|b| !b.closed).unwrap_or(false),
            None => false,
        }
    }
}

#[async_trait]
impl TaskService for MockTaskService {
    async fn update_task_status(
        &self,
        _project: &ProjectId,
        task: &TaskId,
        status: &Status,
        sprint: Option<&SprintId>,
    ) -> Result<Task, ServiceError> {
        let delay = self.delay_next.lock().unwrap().take();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.record(ServiceCall::UpdateStatus {
            task: task.clone(),
            status: status.clone(),
            sprint: sprint.cloned(),
        })?;
        self.with_task(task, |t| {
            t.status = status.clone();
            t.sprint = sprint.cloned();
        })
    }

    async fn close_task(&self, _project: &ProjectId, task: &TaskId) -> Result<Task, ServiceError> {
        self.record(ServiceCall::Close { task: task.clone() })?;

        let mut tasks = self.tasks.lock().unwrap();
        let current = tasks.get(task).cloned().ok_or_else(|| ServiceError::Transport {
            message: format!("unknown task {task}"),
        })?;
        if Self::close_rejected(&tasks, &current) {
            return Err(ServiceError::Blocked { id: task.clone() });
        }
        let entry = tasks.get_mut(task).ok_or_else(|| ServiceError::Transport {
            message: format!("unknown task {task}"),
        })?;
        entry.closed = true;
        Ok(entry.clone())
    }

    async fn close_tasks(
        &self,
        _project: &ProjectId,
        status: &Status,
    ) -> Result<Vec<Task>, ServiceError> {
        self.record(ServiceCall::CloseAll {
            status: status.clone(),
        })?;

        let mut tasks = self.tasks.lock().unwrap();
        let eligible: Vec<TaskId> = tasks
            .values()
            .filter(|t| &t.status == status && !t.closed)
            .filter(|t| !Self::close_rejected(&tasks, t))
            .map(|t| t.id.clone())
            .collect();

        let mut closed = Vec::new();
        for id in eligible {
            if let Some(task) = tasks.get_mut(&id) {
                task.closed = true;
                closed.push(task.clone());
            }
        }
        closed.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(closed)
    }

    async fn reopen_task(&self, _project: &ProjectId, task: &TaskId) -> Result<Task, ServiceError> {
        self.record(ServiceCall::Reopen { task: task.clone() })?;
        self.with_task(task, |t| t.closed = false)
    }

    async fn update_task_pin(
        &self,
        _project: &ProjectId,
        task: &TaskId,
        pinned: bool,
    ) -> Result<Task, ServiceError> {
        self.record(ServiceCall::Pin {
            task: task.clone(),
            pinned,
        })?;
        self.with_task(task, |t| t.pinned = pinned)
    }

    async fn update_task_subscription(
        &self,
        _project: &ProjectId,
        task: &TaskId,
        subscribed: bool,
    ) -> Result<Task, ServiceError> {
        self.record(ServiceCall::Subscribe {
            task: task.clone(),
            subscribed,
        })?;
        self.with_task(task, |t| t.viewer_is_subscribed = subscribed)
    }
}
