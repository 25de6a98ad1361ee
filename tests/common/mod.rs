//! Shared test infrastructure for taskbook integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use chrono::{Duration, Local};
use std::path::PathBuf;
use taskbook::{Status, Task, TaskStore};
use tempfile::TempDir;

/// `YYYY-MM-DD` for today plus `days`.
pub fn date_in(days: i64) -> String {
    (Local::now().date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

pub fn tomorrow() -> String {
    date_in(1)
}

pub fn yesterday() -> String {
    date_in(-1)
}

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub store: TaskStore,
}

impl TestEnv {
    /// Create a new test environment with a freshly loaded, empty store.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let loaded = TaskStore::load(temp_dir.path().join("tasks.json"));
        assert!(loaded.warning.is_none(), "unexpected warning: {:?}", loaded.warning);
        Self {
            temp_dir,
            store: loaded.store,
        }
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.temp_dir.path().join("tasks.json")
    }

    /// Create a task due tomorrow and return its id.
    pub fn create_task(&mut self, title: &str) -> String {
        self.store
            .create(title, "Some description", &tomorrow())
            .expect("Failed to create task")
            .value
    }

    /// Create a task with description.
    pub fn create_task_with_desc(&mut self, title: &str, description: &str) -> String {
        self.store
            .create(title, description, &tomorrow())
            .expect("Failed to create task")
            .value
    }

    /// Load a second store from the same file.
    pub fn reload(&self) -> TaskStore {
        let loaded = TaskStore::load(self.tasks_path());
        assert!(loaded.warning.is_none(), "unexpected warning: {:?}", loaded.warning);
        loaded.store
    }

    /// Snapshot of every (id, task) pair.
    pub fn snapshot(&self) -> Vec<(String, Task)> {
        snapshot(&self.store)
    }

    /// Raw file contents parsed as JSON.
    pub fn file_json(&self) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.tasks_path()).expect("Failed to read tasks file");
        serde_json::from_str(&raw).expect("Tasks file is not JSON")
    }

    pub fn total_count(&self) -> usize {
        self.store.len()
    }

    pub fn count_by_status(&self, status: Status) -> usize {
        self.store.list().filter(|(_, t)| t.status == status).count()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub fn snapshot(store: &TaskStore) -> Vec<(String, Task)> {
    store.list().map(|(id, task)| (id.to_string(), task.clone())).collect()
}
