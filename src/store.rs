//! High-level store API for the task tracker.

use crate::id::generate_id;
use crate::storage::{FileState, TaskFile, TaskMap};
use crate::types::{Status, Task, ValidationError, parse_due_date, require_text};
use chrono::{Local, NaiveDateTime, SubsecRound};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Errors that abort a store operation without mutating anything.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Task not found.
    TaskNotFound(String),
    /// Validation error.
    Validation(ValidationError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::TaskNotFound(id) => write!(f, "task not found: {}", id),
            StoreError::Validation(e) => write!(f, "validation error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<ValidationError> for StoreError {
    fn from(e: ValidationError) -> Self {
        StoreError::Validation(e)
    }
}

/// Non-fatal conditions the caller must surface to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreWarning {
    /// The tasks file could not be written; the in-memory store still holds the change.
    Persistence { path: PathBuf, reason: String },
    /// The tasks file could not be parsed; the store was reset to empty.
    CorruptState { path: PathBuf, reason: String },
    /// The tasks file exists but could not be read; the store was reset to empty.
    Unreadable { path: PathBuf, reason: String },
}

impl std::fmt::Display for StoreWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreWarning::Persistence { path, reason } => write!(
                f,
                "could not save tasks to {} ({}); changes are kept for this session only",
                path.display(),
                reason
            ),
            StoreWarning::CorruptState { path, reason } => write!(
                f,
                "tasks file {} is corrupted ({}); starting with an empty task list",
                path.display(),
                reason
            ),
            StoreWarning::Unreadable { path, reason } => write!(
                f,
                "could not read tasks file {} ({}); starting with an empty task list",
                path.display(),
                reason
            ),
        }
    }
}

/// Value produced by a mutating operation, plus any warning from persisting it.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed<T> {
    pub value: T,
    pub warning: Option<StoreWarning>,
}

impl<T> Committed<T> {
    /// True when the change also reached disk.
    pub fn is_durable(&self) -> bool {
        self.warning.is_none()
    }
}

/// A freshly loaded store.
#[derive(Debug)]
pub struct Loaded {
    pub store: TaskStore,
    pub warning: Option<StoreWarning>,
}

/// Caller's answer to "really delete?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

impl Confirmation {
    /// Only `y` or `yes` (any case) confirm.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Confirmation::Yes,
            _ => Confirmation::No,
        }
    }
}

/// Outcome of a delete request.
#[derive(Debug, Clone, PartialEq)]
pub enum Deletion {
    /// The task was removed.
    Removed(Committed<Task>),
    /// The caller declined; nothing changed.
    Cancelled,
}

/// Field changes for `TaskStore::update`. Blank or absent means "keep".
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskUpdate<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub due_date: Option<&'a str>,
}

/// Treat blank input as absent.
fn supplied(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// The task store: the authoritative in-memory map plus its JSON mirror.
#[derive(Debug)]
pub struct TaskStore {
    file: TaskFile,
    tasks: TaskMap,
}

impl TaskStore {
    /// Load the store from `path`.
    ///
    /// A missing file yields an empty store that is persisted right away. An
    /// unreadable or malformed file yields an empty store and a warning.
    pub fn load(path: impl Into<PathBuf>) -> Loaded {
        let file = TaskFile::new(path);

        let (tasks, warning, fresh) = match file.read() {
            Ok(FileState::Loaded(tasks)) => {
                info!("Loaded {} task(s) from {}", tasks.len(), file.path().display());
                (tasks, None, false)
            }
            Ok(FileState::Missing) => {
                info!("No tasks file at {}, starting empty", file.path().display());
                (TaskMap::new(), None, true)
            }
            Ok(FileState::Corrupt(reason)) => {
                warn!("Tasks file {} is corrupted: {}", file.path().display(), reason);
                let warning = StoreWarning::CorruptState {
                    path: file.path().to_path_buf(),
                    reason,
                };
                (TaskMap::new(), Some(warning), false)
            }
            Err(e) => {
                warn!("Failed to read tasks file {}: {}", file.path().display(), e);
                let warning = StoreWarning::Unreadable {
                    path: file.path().to_path_buf(),
                    reason: e.to_string(),
                };
                (TaskMap::new(), Some(warning), false)
            }
        };

        let store = Self { file, tasks };
        let warning = if fresh { store.persist() } else { warning };

        Loaded { store, warning }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Write the whole store to disk. Returns a warning instead of failing.
    pub fn persist(&self) -> Option<StoreWarning> {
        match self.file.write(&self.tasks) {
            Ok(()) => {
                debug!("Persisted {} task(s) to {}", self.tasks.len(), self.file.path().display());
                None
            }
            Err(e) => {
                warn!("Failed to persist tasks to {}: {}", self.file.path().display(), e);
                Some(StoreWarning::Persistence {
                    path: self.file.path().to_path_buf(),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn commit<T>(&self, value: T) -> Committed<T> {
        Committed {
            value,
            warning: self.persist(),
        }
    }

    /// Create a new task and return its id.
    pub fn create(&mut self, title: &str, description: &str, due_date: &str) -> Result<Committed<String>, StoreError> {
        let now = now();
        let title = require_text(title, ValidationError::EmptyTitle)?;
        let description = require_text(description, ValidationError::EmptyDescription)?;
        let due_date = parse_due_date(due_date, now)?;

        let id = generate_id();
        let task = Task {
            title,
            description,
            due_date,
            status: Status::Incomplete,
            created_date: now,
        };

        self.tasks.insert(id.clone(), task);
        info!("Created task {}", id);

        Ok(self.commit(id))
    }

    /// Get a task by ID.
    pub fn get(&self, id: &str) -> Result<&Task, StoreError> {
        self.tasks
            .get(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))
    }

    /// Iterate over all tasks in creation order.
    pub fn list(&self) -> impl Iterator<Item = (&str, &Task)> + '_ {
        self.tasks.iter().map(|(id, task)| (id.as_str(), task))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Update a task's fields. Validation happens before any field changes.
    pub fn update(&mut self, id: &str, changes: TaskUpdate<'_>) -> Result<Committed<Task>, StoreError> {
        if !self.tasks.contains_key(id) {
            return Err(StoreError::TaskNotFound(id.to_string()));
        }

        let due_date = supplied(changes.due_date)
            .map(|raw| parse_due_date(raw, now()))
            .transpose()?;

        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;

        if let Some(title) = supplied(changes.title) {
            task.title = title.to_string();
        }
        if let Some(description) = supplied(changes.description) {
            task.description = description.to_string();
        }
        if let Some(due_date) = due_date {
            task.due_date = due_date;
        }

        let updated = task.clone();
        info!("Updated task {}", id);

        Ok(self.commit(updated))
    }

    /// Mark a task complete. Completing a completed task is a no-op success.
    pub fn complete(&mut self, id: &str) -> Result<Committed<Task>, StoreError> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;

        debug_assert!(task.status.can_transition_to(&Status::Complete));
        task.status = Status::Complete;

        let updated = task.clone();
        info!("Completed task {}", id);

        Ok(self.commit(updated))
    }

    /// Delete a task once the caller has confirmed.
    pub fn delete(&mut self, id: &str, confirmation: Confirmation) -> Result<Deletion, StoreError> {
        if !self.tasks.contains_key(id) {
            return Err(StoreError::TaskNotFound(id.to_string()));
        }

        if confirmation == Confirmation::No {
            debug!("Deletion of task {} cancelled", id);
            return Ok(Deletion::Cancelled);
        }

        let removed = self
            .tasks
            .shift_remove(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        info!("Deleted task {}", id);

        Ok(Deletion::Removed(self.commit(removed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;

    fn tomorrow() -> String {
        (Local::now().date_naive() + Duration::days(1)).format("%Y-%m-%d").to_string()
    }

    fn setup_test_store() -> (TempDir, TaskStore) {
        let temp_dir = TempDir::new().unwrap();
        let loaded = TaskStore::load(temp_dir.path().join("tasks.json"));
        assert!(loaded.warning.is_none());
        (temp_dir, loaded.store)
    }

    #[test]
    fn test_create_and_get() {
        let (_temp_dir, mut store) = setup_test_store();

        let created = store.create("Test task", "A description", &tomorrow()).unwrap();
        assert!(created.is_durable());

        let task = store.get(&created.value).unwrap();
        assert_eq!(task.title, "Test task");
        assert_eq!(task.description, "A description");
        assert_eq!(task.status, Status::Incomplete);
    }

    #[test]
    fn test_create_trims_text() {
        let (_temp_dir, mut store) = setup_test_store();

        let id = store.create("  Padded  ", "\tdesc\n", &tomorrow()).unwrap().value;
        let task = store.get(&id).unwrap();
        assert_eq!(task.title, "Padded");
        assert_eq!(task.description, "desc");
    }

    #[test]
    fn test_create_validation_order() {
        let (_temp_dir, mut store) = setup_test_store();

        assert_eq!(
            store.create("", "", "bad").unwrap_err(),
            StoreError::Validation(ValidationError::EmptyTitle)
        );
        assert_eq!(
            store.create("t", " ", "bad").unwrap_err(),
            StoreError::Validation(ValidationError::EmptyDescription)
        );
        assert_eq!(
            store.create("t", "d", "bad").unwrap_err(),
            StoreError::Validation(ValidationError::InvalidDateFormat("bad".to_string()))
        );
        assert_eq!(
            store.create("t", "d", "2000-01-01").unwrap_err(),
            StoreError::Validation(ValidationError::DueDateInPast(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_partial() {
        let (_temp_dir, mut store) = setup_test_store();

        let id = store.create("Original", "Keep me", &tomorrow()).unwrap().value;
        let updated = store
            .update(
                &id,
                TaskUpdate {
                    title: Some("Updated title"),
                    description: Some("   "),
                    due_date: None,
                },
            )
            .unwrap()
            .value;

        assert_eq!(updated.title, "Updated title");
        assert_eq!(updated.description, "Keep me");
        assert_eq!(store.get(&id).unwrap(), &updated);
    }

    #[test]
    fn test_update_bad_date_applies_nothing() {
        let (_temp_dir, mut store) = setup_test_store();

        let id = store.create("Original", "Desc", &tomorrow()).unwrap().value;
        let before = store.get(&id).unwrap().clone();

        let result = store.update(
            &id,
            TaskUpdate {
                title: Some("New title"),
                description: Some("New desc"),
                due_date: Some("1999-12-31"),
            },
        );

        assert!(matches!(
            result,
            Err(StoreError::Validation(ValidationError::DueDateInPast(_)))
        ));
        assert_eq!(store.get(&id).unwrap(), &before);
    }

    #[test]
    fn test_complete_is_idempotent() {
        let (_temp_dir, mut store) = setup_test_store();

        let id = store.create("Task", "Desc", &tomorrow()).unwrap().value;
        let once = store.complete(&id).unwrap().value;
        let twice = store.complete(&id).unwrap().value;

        assert_eq!(once.status, Status::Complete);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (_temp_dir, mut store) = setup_test_store();

        let id = store.create("Task", "Desc", &tomorrow()).unwrap().value;

        assert_eq!(store.delete(&id, Confirmation::No).unwrap(), Deletion::Cancelled);
        assert_eq!(store.len(), 1);

        let deletion = store.delete(&id, Confirmation::Yes).unwrap();
        assert!(matches!(deletion, Deletion::Removed(ref c) if c.value.title == "Task"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_missing_reports_not_found_before_confirmation() {
        let (_temp_dir, mut store) = setup_test_store();

        assert_eq!(
            store.delete("nope", Confirmation::No).unwrap_err(),
            StoreError::TaskNotFound("nope".to_string())
        );
    }

    #[test]
    fn test_confirmation_from_answer() {
        assert_eq!(Confirmation::from_answer("y"), Confirmation::Yes);
        assert_eq!(Confirmation::from_answer(" YES "), Confirmation::Yes);
        assert_eq!(Confirmation::from_answer("n"), Confirmation::No);
        assert_eq!(Confirmation::from_answer(""), Confirmation::No);
        assert_eq!(Confirmation::from_answer("yep"), Confirmation::No);
    }

    #[test]
    fn test_list_is_restartable() {
        let (_temp_dir, mut store) = setup_test_store();

        store.create("A", "a", &tomorrow()).unwrap();
        store.create("B", "b", &tomorrow()).unwrap();

        let first: Vec<_> = store.list().map(|(id, _)| id.to_string()).collect();
        let second: Vec<_> = store.list().map(|(id, _)| id.to_string()).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_missing_file_creates_it() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");

        let loaded = TaskStore::load(&path);
        assert!(loaded.warning.is_none());
        assert!(loaded.store.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
    }
}
