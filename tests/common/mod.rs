//! Common test utilities for integration tests
//!
//! In-memory fakes for the two ports. Both count every call so tests can
//! assert on side effects, not just return values.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use motion_relay::domain::errors::{DomainError, DomainResult};
use motion_relay::domain::models::{
    InsertOutcome, Issue, IssueTaskMapping, RemoteProject, RepoProjectMapping, Repository,
    TaskPatch, TaskPayload, TaskUpdate, Workspace, WorkspaceStatus, WorkspaceStatusConfig,
};
use motion_relay::domain::ports::{MappingStore, MotionApi};

pub const WORKSPACE: &str = "ws_1";
pub const OWNER: &str = "octocat";

/// Setup test logging
#[allow(dead_code)]
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn repository() -> Repository {
    Repository {
        id: 7,
        name: "hello".to_string(),
        full_name: "octocat/hello".to_string(),
    }
}

pub fn issue(state: &str) -> Issue {
    Issue {
        id: 11,
        title: "Crash on start".to_string(),
        body: Some("Steps to reproduce".to_string()),
        state: state.to_string(),
        html_url: "https://github.com/octocat/hello/issues/1".to_string(),
    }
}

pub fn todo_done_statuses() -> Vec<WorkspaceStatus> {
    vec![
        WorkspaceStatus {
            name: "Backlog".to_string(),
            is_default_status: false,
            is_resolved_status: false,
        },
        WorkspaceStatus {
            name: "Todo".to_string(),
            is_default_status: true,
            is_resolved_status: false,
        },
        WorkspaceStatus {
            name: "Done".to_string(),
            is_default_status: false,
            is_resolved_status: true,
        },
    ]
}

// ---------------------------------------------------------------------------
// Mapping store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeMappingStore {
    projects: Mutex<HashMap<i64, RepoProjectMapping>>,
    tasks: Mutex<HashMap<i64, IssueTaskMapping>>,
    workspaces: Mutex<HashMap<String, WorkspaceStatusConfig>>,

    /// Rows written by a "concurrent" writer just before the next insert.
    racing_project: Mutex<Option<RepoProjectMapping>>,
    racing_task: Mutex<Option<IssueTaskMapping>>,

    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl FakeMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst) + self.writes.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn seed_project(&self, mapping: RepoProjectMapping) {
        self.projects.lock().unwrap().insert(mapping.repo_id, mapping);
    }

    pub fn seed_task(&self, mapping: IssueTaskMapping) {
        self.tasks.lock().unwrap().insert(mapping.issue_id, mapping);
    }

    pub fn seed_workspace(&self, config: WorkspaceStatusConfig) {
        self.workspaces
            .lock()
            .unwrap()
            .insert(config.workspace_id.clone(), config);
    }

    pub fn race_next_project_insert(&self, winner: RepoProjectMapping) {
        *self.racing_project.lock().unwrap() = Some(winner);
    }

    pub fn race_next_task_insert(&self, winner: IssueTaskMapping) {
        *self.racing_task.lock().unwrap() = Some(winner);
    }

    pub fn project(&self, repo_id: i64) -> Option<RepoProjectMapping> {
        self.projects.lock().unwrap().get(&repo_id).cloned()
    }

    pub fn task(&self, issue_id: i64) -> Option<IssueTaskMapping> {
        self.tasks.lock().unwrap().get(&issue_id).cloned()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn workspace(&self, workspace_id: &str) -> Option<WorkspaceStatusConfig> {
        self.workspaces.lock().unwrap().get(workspace_id).cloned()
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MappingStore for FakeMappingStore {
    async fn get_project_mapping(&self, repo_id: i64) -> DomainResult<Option<RepoProjectMapping>> {
        self.read();
        Ok(self.project(repo_id))
    }

    async fn insert_project_mapping(
        &self,
        mapping: &RepoProjectMapping,
    ) -> DomainResult<InsertOutcome<RepoProjectMapping>> {
        self.write();
        if let Some(winner) = self.racing_project.lock().unwrap().take() {
            self.seed_project(winner);
        }
        let mut projects = self.projects.lock().unwrap();
        if let Some(existing) = projects.get(&mapping.repo_id) {
            return Ok(InsertOutcome::AlreadyExists(existing.clone()));
        }
        projects.insert(mapping.repo_id, mapping.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn update_project_mapping(
        &self,
        repo_id: i64,
        owner_user_id: &str,
        project_id: &str,
    ) -> DomainResult<()> {
        self.write();
        let mut projects = self.projects.lock().unwrap();
        if let Some(mapping) = projects.get_mut(&repo_id) {
            if mapping.owner_user_id == owner_user_id {
                mapping.project_id = project_id.to_string();
            }
        }
        Ok(())
    }

    async fn get_task_mapping(&self, issue_id: i64) -> DomainResult<Option<IssueTaskMapping>> {
        self.read();
        Ok(self.task(issue_id))
    }

    async fn insert_task_mapping(
        &self,
        mapping: &IssueTaskMapping,
    ) -> DomainResult<InsertOutcome<IssueTaskMapping>> {
        self.write();
        if let Some(winner) = self.racing_task.lock().unwrap().take() {
            self.seed_task(winner);
        }
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(existing) = tasks.get(&mapping.issue_id) {
            return Ok(InsertOutcome::AlreadyExists(existing.clone()));
        }
        tasks.insert(mapping.issue_id, mapping.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn update_task_mapping(&self, issue_id: i64, task_id: &str) -> DomainResult<()> {
        self.write();
        if let Some(mapping) = self.tasks.lock().unwrap().get_mut(&issue_id) {
            mapping.task_id = task_id.to_string();
        }
        Ok(())
    }

    async fn get_workspace_config(
        &self,
        workspace_id: &str,
    ) -> DomainResult<Option<WorkspaceStatusConfig>> {
        self.read();
        Ok(self.workspace(workspace_id))
    }

    async fn insert_workspace_config(
        &self,
        config: &WorkspaceStatusConfig,
    ) -> DomainResult<InsertOutcome<WorkspaceStatusConfig>> {
        self.write();
        let mut workspaces = self.workspaces.lock().unwrap();
        if let Some(existing) = workspaces.get(&config.workspace_id) {
            return Ok(InsertOutcome::AlreadyExists(existing.clone()));
        }
        workspaces.insert(config.workspace_id.clone(), config.clone());
        Ok(InsertOutcome::Inserted)
    }
}

// ---------------------------------------------------------------------------
// Motion
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeMotion {
    projects: Mutex<HashSet<String>>,
    tasks: Mutex<HashMap<String, TaskPatch>>,
    statuses: Mutex<Vec<WorkspaceStatus>>,
    next_id: AtomicUsize,
    fail_all: Mutex<Option<String>>,

    pub get_project_calls: AtomicUsize,
    pub create_project_calls: AtomicUsize,
    pub create_task_calls: AtomicUsize,
    pub update_task_calls: AtomicUsize,
    pub list_statuses_calls: AtomicUsize,
    pub created_tasks: Mutex<Vec<TaskPayload>>,
}

impl FakeMotion {
    pub fn with_statuses(statuses: Vec<WorkspaceStatus>) -> Self {
        let motion = Self::default();
        *motion.statuses.lock().unwrap() = statuses;
        motion
    }

    pub fn add_project(&self, project_id: &str) {
        self.projects.lock().unwrap().insert(project_id.to_string());
    }

    pub fn delete_project(&self, project_id: &str) {
        self.projects.lock().unwrap().remove(project_id);
    }

    pub fn add_task(&self, task_id: &str) {
        self.tasks.lock().unwrap().insert(
            task_id.to_string(),
            TaskPatch {
                name: String::new(),
                description: String::new(),
                status: String::new(),
                project_id: String::new(),
            },
        );
    }

    pub fn delete_task(&self, task_id: &str) {
        self.tasks.lock().unwrap().remove(task_id);
    }

    pub fn task(&self, task_id: &str) -> Option<TaskPatch> {
        self.tasks.lock().unwrap().get(task_id).cloned()
    }

    /// Make every subsequent call fail with the given message.
    pub fn fail_with(&self, message: &str) {
        *self.fail_all.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn remote_writes(&self) -> usize {
        Self::calls(&self.create_project_calls)
            + Self::calls(&self.create_task_calls)
            + Self::calls(&self.update_task_calls)
    }

    pub fn total_calls(&self) -> usize {
        self.remote_writes()
            + Self::calls(&self.get_project_calls)
            + Self::calls(&self.list_statuses_calls)
    }

    fn check(&self) -> DomainResult<()> {
        match self.fail_all.lock().unwrap().as_ref() {
            Some(message) => Err(DomainError::RemoteRequestFailed(message.clone())),
            None => Ok(()),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}_{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl MotionApi for FakeMotion {
    async fn get_project(&self, project_id: &str) -> DomainResult<Option<RemoteProject>> {
        self.get_project_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .projects
            .lock()
            .unwrap()
            .contains(project_id)
            .then(|| RemoteProject {
                id: project_id.to_string(),
                name: String::new(),
                workspace_id: None,
            }))
    }

    async fn create_project(&self, _name: &str, _workspace_id: &str) -> DomainResult<String> {
        self.create_project_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let id = self.next_id("proj");
        self.add_project(&id);
        Ok(id)
    }

    async fn create_task(&self, task: &TaskPayload) -> DomainResult<String> {
        self.create_task_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let id = self.next_id("task");
        self.tasks
            .lock()
            .unwrap()
            .insert(id.clone(), task.without_workspace());
        self.created_tasks.lock().unwrap().push(task.clone());
        Ok(id)
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> DomainResult<TaskUpdate> {
        self.update_task_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.get_mut(task_id) {
            Some(existing) => {
                *existing = patch.clone();
                Ok(TaskUpdate::Updated)
            }
            None => Ok(TaskUpdate::NotFound),
        }
    }

    async fn list_workspace_statuses(
        &self,
        _workspace_id: &str,
    ) -> DomainResult<Vec<WorkspaceStatus>> {
        self.list_statuses_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.statuses.lock().unwrap().clone())
    }

    async fn list_workspaces(&self) -> DomainResult<Vec<Workspace>> {
        self.check()?;
        Ok(vec![Workspace {
            id: WORKSPACE.to_string(),
            name: "Personal".to_string(),
        }])
    }
}
