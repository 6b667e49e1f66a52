//! BoardContext - data access primitives for board commands
//!
//! The context provides access to the authoritative working list, the
//! derived board projection and the persistence service. No business
//! logic lives here; commands do all the work.

use crate::builder::{build_board, SprintContext};
use crate::error::{BoardError, Result};
use crate::filter::FilterSet;
use crate::schema::WorkflowSchema;
use crate::service::TaskService;
use crate::types::{Board, Epic, Project, Sprint, Task, TaskId};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::RwLock;

/// Everything the projection is derived from, kept under one lock so
/// the board snapshot never disagrees with the list it came from
struct EngineState {
    tasks: Vec<Task>,
    sprints: Vec<Sprint>,
    epics: Vec<Epic>,
    filters: FilterSet,
    sprint_context: SprintContext,
    board: Board,
}

impl EngineState {
    fn rebuild(&mut self, schema: &WorkflowSchema) {
        self.board = build_board(
            &self.tasks,
            &self.filters,
            schema,
            &self.sprints,
            &self.epics,
            &self.sprint_context,
        );
    }
}

/// Context passed to every command - provides access, not logic
pub struct BoardContext {
    project: Project,
    schema: WorkflowSchema,
    service: Arc<dyn TaskService>,
    state: RwLock<EngineState>,
    /// Per-task move epochs; a response belonging to a superseded move
    /// is discarded
    move_epochs: Mutex<HashMap<TaskId, u64>>,
}

impl BoardContext {
    /// Create a context for a project backed by the given service
    pub fn new(project: Project, service: Arc<dyn TaskService>) -> Self {
        let schema = WorkflowSchema::for_project(&project);
        let mut state = EngineState {
            tasks: Vec::new(),
            sprints: Vec::new(),
            epics: Vec::new(),
            filters: FilterSet::new(),
            sprint_context: SprintContext::default(),
            board: Board::default(),
        };
        state.rebuild(&schema);

        Self {
            project,
            schema,
            service,
            state: RwLock::new(state),
            move_epochs: Mutex::new(HashMap::new()),
        }
    }

    /// The project this context serves
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// The project's workflow schema
    pub fn schema(&self) -> &WorkflowSchema {
        &self.schema
    }

    /// The persistence service
    pub fn service(&self) -> &dyn TaskService {
        self.service.as_ref()
    }

    // =========================================================================
    // Authoritative data
    // =========================================================================

    /// Replace the whole working task list and rebuild the board
    pub async fn replace_tasks(&self, tasks: Vec<Task>) {
        let mut state = self.state.write().await;
        state.tasks = tasks;
        for task in &mut state.tasks {
            task.normalize();
        }
        state.rebuild(&self.schema);
    }

    /// Replace the known sprints and rebuild the board
    pub async fn replace_sprints(&self, sprints: Vec<Sprint>) {
        let mut state = self.state.write().await;
        state.sprints = sprints;
        state.rebuild(&self.schema);
    }

    /// Replace the known epics and rebuild the board
    pub async fn replace_epics(&self, epics: Vec<Epic>) {
        let mut state = self.state.write().await;
        state.epics = epics;
        state.rebuild(&self.schema);
    }

    /// Read a task from the working list
    pub async fn read_task(&self, id: &TaskId) -> Result<Task> {
        let state = self.state.read().await;
        state
            .tasks
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })
    }

    /// All tasks in the working list
    pub async fn tasks(&self) -> Vec<Task> {
        self.state.read().await.tasks.clone()
    }

    /// Merge an authoritative server response into the working list and
    /// rebuild the board. Unknown tasks are appended.
    pub async fn merge_task(&self, server: Task) -> Result<Task> {
        let mut state = self.state.write().await;
        let merged = match state.tasks.iter_mut().find(|t| t.id == server.id) {
            Some(existing) => {
                existing.merge_from(server);
                existing.clone()
            }
            None => {
                let mut task = server;
                task.normalize();
                state.tasks.push(task.clone());
                task
            }
        };
        state.rebuild(&self.schema);
        Ok(merged)
    }

    /// Merge a batch of authoritative responses, rebuilding once
    pub async fn merge_tasks(&self, servers: Vec<Task>) -> Result<usize> {
        let mut state = self.state.write().await;
        let count = servers.len();
        for server in servers {
            match state.tasks.iter_mut().find(|t| t.id == server.id) {
                Some(existing) => existing.merge_from(server),
                None => {
                    let mut task = server;
                    task.normalize();
                    state.tasks.push(task);
                }
            }
        }
        state.rebuild(&self.schema);
        Ok(count)
    }

    // =========================================================================
    // View settings
    // =========================================================================

    /// Change the filter set and rebuild the board
    pub async fn set_filters(&self, filters: FilterSet) {
        let mut state = self.state.write().await;
        state.filters = filters;
        state.rebuild(&self.schema);
    }

    /// Change the sprint context and rebuild the board
    pub async fn set_sprint_context(&self, sprint_context: SprintContext) {
        let mut state = self.state.write().await;
        state.sprint_context = sprint_context;
        state.rebuild(&self.schema);
    }

    // =========================================================================
    // Projection
    // =========================================================================

    /// Snapshot of the current board projection
    pub async fn board(&self) -> Board {
        self.state.read().await.board.clone()
    }

    /// Mutate the projection only. Used for optimistic placement; the
    /// working list is untouched.
    pub async fn apply_board<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Board) -> R,
    {
        let mut state = self.state.write().await;
        f(&mut state.board)
    }

    /// Throw the projection away and recompute it from the working
    /// list. Rollback is exactly this: with the list untouched, the
    /// rebuilt board is the pre-move board. Idempotent.
    pub async fn rebuild(&self) {
        let mut state = self.state.write().await;
        state.rebuild(&self.schema);
    }

    // =========================================================================
    // Move sequencing
    // =========================================================================

    /// Start a move for a task, superseding any in-flight move of the
    /// same task. Returns the epoch the caller must present when the
    /// response arrives.
    pub fn begin_move(&self, id: &TaskId) -> u64 {
        let mut epochs = self.move_epochs.lock().unwrap_or_else(|e| e.into_inner());
        let epoch = epochs.entry(id.clone()).or_insert(0);
        *epoch += 1;
        *epoch
    }

    /// Check whether a move response is still the latest for its task
    pub fn is_current_move(&self, id: &TaskId, epoch: u64) -> bool {
        let epochs = self.move_epochs.lock().unwrap_or_else(|e| e.into_inner());
        epochs.get(id).copied() == Some(epoch)
    }
}
