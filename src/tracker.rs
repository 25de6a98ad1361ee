//! Interactive task menu.

use crate::console::{Console, is_input_closed};
use crate::store::{Committed, Confirmation, Deletion, StoreWarning, TaskStore, TaskUpdate};
use crate::types::{CREATED_DATE_FORMAT, DUE_DATE_FORMAT, Status, Task};
use colored::{ColoredString, Colorize};
use eyre::Result;
use log::info;
use std::io::{BufRead, Write};

/// Menu entries, numbered from 1 in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMenu {
    Add,
    ViewAll,
    ViewOne,
    Update,
    MarkComplete,
    Delete,
    Exit,
}

impl TaskMenu {
    pub const ALL: [TaskMenu; 7] = [
        TaskMenu::Add,
        TaskMenu::ViewAll,
        TaskMenu::ViewOne,
        TaskMenu::Update,
        TaskMenu::MarkComplete,
        TaskMenu::Delete,
        TaskMenu::Exit,
    ];

    pub fn from_choice(choice: usize) -> Option<Self> {
        choice.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskMenu::Add => "Add Task",
            TaskMenu::ViewAll => "View All Tasks",
            TaskMenu::ViewOne => "View Task",
            TaskMenu::Update => "Update Task",
            TaskMenu::MarkComplete => "Mark Task Complete",
            TaskMenu::Delete => "Delete Task",
            TaskMenu::Exit => "Exit",
        }
    }
}

fn format_status(status: &Status) -> ColoredString {
    match status {
        Status::Incomplete => "incomplete".yellow(),
        Status::Complete => "complete".green(),
    }
}

/// Write the task list as an aligned table.
pub fn write_task_table<'a>(out: &mut impl Write, tasks: impl Iterator<Item = (&'a str, &'a Task)>) -> Result<()> {
    let mut tasks = tasks.peekable();
    if tasks.peek().is_none() {
        writeln!(out, "No tasks found.")?;
        return Ok(());
    }

    writeln!(out, "{:<36}  {:<24}  {:<10}  {:<10}", "ID", "Title", "Due Date", "Status")?;
    writeln!(out, "{}", "-".repeat(86))?;
    for (id, task) in tasks {
        writeln!(
            out,
            "{:<36}  {:<24}  {:<10}  {}",
            id,
            truncate(&task.title, 24),
            task.due_date.format(DUE_DATE_FORMAT),
            format_status(&task.status)
        )?;
    }
    Ok(())
}

/// Write every field of one task.
pub fn write_task_details(out: &mut impl Write, id: &str, task: &Task) -> Result<()> {
    writeln!(out, "{}: {}", "ID".bold(), id.cyan())?;
    writeln!(out, "{}: {}", "Title".bold(), task.title)?;
    writeln!(out, "{}: {}", "Description".bold(), task.description)?;
    writeln!(out, "{}: {}", "Due Date".bold(), task.due_date.format(DUE_DATE_FORMAT))?;
    writeln!(out, "{}: {}", "Status".bold(), format_status(&task.status))?;
    writeln!(out, "{}: {}", "Created".bold(), task.created_date.format(CREATED_DATE_FORMAT))?;
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// The task tracker's menu loop. Owns the store for the whole session.
pub struct TaskShell<R, W> {
    store: TaskStore,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> TaskShell<R, W> {
    pub fn new(store: TaskStore, console: Console<R, W>) -> Self {
        Self { store, console }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn into_parts(self) -> (TaskStore, Console<R, W>) {
        (self.store, self.console)
    }

    /// Print a warning left over from loading the store.
    pub fn report_warning(&mut self, warning: Option<&StoreWarning>) -> Result<()> {
        if let Some(warning) = warning {
            self.console.warning(warning)?;
        }
        Ok(())
    }

    fn report_commit<T>(&mut self, committed: &Committed<T>) -> Result<()> {
        self.report_warning(committed.warning.as_ref())
    }

    fn display_menu(&mut self) -> Result<()> {
        self.console.heading("Task Tracker")?;
        for (i, entry) in TaskMenu::ALL.iter().enumerate() {
            self.console.line(format!("{}. {}", i + 1, entry.label()))?;
        }
        Ok(())
    }

    /// Run until Exit is chosen or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.display_menu()?;

            let step = self
                .console
                .menu_choice(TaskMenu::ALL.len())
                .and_then(|choice| match TaskMenu::from_choice(choice) {
                    Some(TaskMenu::Exit) | None => Ok(false),
                    Some(entry) => self.dispatch(entry).map(|()| true),
                });

            match step {
                Ok(true) => {}
                Ok(false) => {
                    self.console.info("Exiting Task Tracker. Goodbye!")?;
                    return Ok(());
                }
                Err(e) if is_input_closed(&e) => {
                    info!("Input closed, leaving task menu");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn dispatch(&mut self, entry: TaskMenu) -> Result<()> {
        match entry {
            TaskMenu::Add => self.add_task(),
            TaskMenu::ViewAll => self.view_all_tasks(),
            TaskMenu::ViewOne => self.view_task(),
            TaskMenu::Update => self.update_task(),
            TaskMenu::MarkComplete => self.mark_task_complete(),
            TaskMenu::Delete => self.delete_task(),
            TaskMenu::Exit => Ok(()),
        }
    }

    fn add_task(&mut self) -> Result<()> {
        self.console.heading("Add New Task")?;
        let title = self.console.prompt("Enter task title: ")?;
        let description = self.console.prompt("Enter task description: ")?;
        let due_date = self.console.prompt("Enter due date (YYYY-MM-DD): ")?;

        match self.store.create(&title, &description, &due_date) {
            Ok(created) => {
                self.console.success(&format!("Task {} added successfully!", created.value))?;
                self.report_commit(&created)
            }
            Err(e) => self.console.error(e),
        }
    }

    fn view_all_tasks(&mut self) -> Result<()> {
        self.console.heading("All Tasks")?;
        let mut buf = Vec::new();
        write_task_table(&mut buf, self.store.list())?;
        self.console.line(String::from_utf8_lossy(&buf).trim_end())
    }

    fn view_task(&mut self) -> Result<()> {
        self.console.heading("View Task")?;
        let id = self.console.prompt("Enter task ID: ")?;
        let id = id.trim();

        let Self { store, console } = self;
        match store.get(id) {
            Ok(task) => {
                let mut buf = Vec::new();
                write_task_details(&mut buf, id, task)?;
                console.line(String::from_utf8_lossy(&buf).trim_end())
            }
            Err(e) => console.error(e),
        }
    }

    fn update_task(&mut self) -> Result<()> {
        self.console.heading("Update Task")?;
        let id = self.console.prompt("Enter task ID: ")?;
        let id = id.trim();

        let current = match self.store.get(id) {
            Ok(task) => task.clone(),
            Err(e) => return self.console.error(e),
        };

        self.console.info("Leave field empty to keep current value.")?;
        self.console.line(format!("Current Title: {}", current.title))?;
        let title = self.console.prompt("New Title: ")?;
        self.console.line(format!("Current Description: {}", current.description))?;
        let description = self.console.prompt("New Description: ")?;
        self.console
            .line(format!("Current Due Date: {}", current.due_date.format(DUE_DATE_FORMAT)))?;
        let due_date = self.console.prompt("New Due Date (YYYY-MM-DD): ")?;

        let changes = TaskUpdate {
            title: Some(title.as_str()),
            description: Some(description.as_str()),
            due_date: Some(due_date.as_str()),
        };

        match self.store.update(id, changes) {
            Ok(updated) => {
                self.console.success(&format!("Task {} updated successfully!", id))?;
                self.report_commit(&updated)
            }
            Err(e) => self.console.error(e),
        }
    }

    fn mark_task_complete(&mut self) -> Result<()> {
        self.console.heading("Mark Task Complete")?;
        let id = self.console.prompt("Enter task ID: ")?;
        let id = id.trim();

        match self.store.complete(id) {
            Ok(completed) => {
                self.console.success(&format!("Task {} marked as complete!", id))?;
                self.report_commit(&completed)
            }
            Err(e) => self.console.error(e),
        }
    }

    fn delete_task(&mut self) -> Result<()> {
        self.console.heading("Delete Task")?;
        let id = self.console.prompt("Enter task ID: ")?;
        let id = id.trim();

        if let Err(e) = self.store.get(id) {
            return self.console.error(e);
        }

        let answer = self
            .console
            .prompt(&format!("Are you sure you want to delete task {}? (y/n): ", id))?;

        match self.store.delete(id, Confirmation::from_answer(&answer)) {
            Ok(Deletion::Removed(removed)) => {
                self.console.success(&format!("Task {} deleted successfully!", id))?;
                self.report_commit(&removed)
            }
            Ok(Deletion::Cancelled) => self.console.info("Task deletion cancelled."),
            Err(e) => self.console.error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_from_choice() {
        assert_eq!(TaskMenu::from_choice(1), Some(TaskMenu::Add));
        assert_eq!(TaskMenu::from_choice(5), Some(TaskMenu::MarkComplete));
        assert_eq!(TaskMenu::from_choice(7), Some(TaskMenu::Exit));
        assert_eq!(TaskMenu::from_choice(0), None);
        assert_eq!(TaskMenu::from_choice(8), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("a much longer title", 10), "a much ...");
    }

    #[test]
    fn test_empty_table() {
        let mut buf = Vec::new();
        write_task_table(&mut buf, std::iter::empty()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No tasks found.\n");
    }
}
