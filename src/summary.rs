//! Display aggregates for the home view.

use chrono::NaiveDate;
use tracing::instrument;

use crate::list_store::{ListStore, StoreError};
use crate::models::{Habit, Task};
use crate::quotes;
use crate::storage::KeyValueStore;

/// Number of today's tasks shown on the home view
pub const DEFAULT_PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskProgress {
    pub completed: usize,
    pub total: usize,
}

impl TaskProgress {
    pub fn percentage(&self) -> u32 {
        completion_percentage(self.completed, self.total)
    }

    /// One-line progress text
    pub fn summary(&self) -> String {
        if self.total == 0 {
            "No tasks for today".to_string()
        } else {
            format!(
                "{} of {} tasks complete ({}%)",
                self.completed,
                self.total,
                self.percentage()
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPreview<'a> {
    pub tasks: Vec<&'a Task>,
    /// Matching tasks left out of `tasks`
    pub overflow: usize,
}

/// Tasks dated `date`, in stored order
pub fn tasks_on<'a>(tasks: &'a [Task], date: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
    tasks.iter().filter(move |task| task.date == date)
}

pub fn todays_tasks(tasks: &[Task], today: &str) -> TaskProgress {
    tasks_on(tasks, today).fold(TaskProgress::default(), |mut progress, task| {
        progress.total += 1;
        if task.completed {
            progress.completed += 1;
        }
        progress
    })
}

/// `completed / total` as a whole percentage, halves rounded up. Zero when
/// there is nothing to complete.
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed * 200 + total) / (total * 2)) as u32
}

pub fn preview_list<'a>(tasks: &'a [Task], today: &str, limit: usize) -> TaskPreview<'a> {
    let mut preview = TaskPreview {
        tasks: Vec::with_capacity(limit.min(tasks.len())),
        overflow: 0,
    };
    for task in tasks.iter().filter(|task| task.date == today) {
        if preview.tasks.len() < limit {
            preview.tasks.push(task);
        } else {
            preview.overflow += 1;
        }
    }
    preview
}

/// Everything the home view shows, read fresh from storage
#[derive(Debug, Clone)]
pub struct HomeOverview {
    pub user_name: String,
    pub today: String,
    pub progress: TaskProgress,
    pub preview: Vec<Task>,
    pub overflow: usize,
    pub habits: Vec<Habit>,
    pub quote: &'static str,
}

impl HomeOverview {
    /// Re-read tasks and habits from `backend` and aggregate them for `today`
    #[instrument(level = "debug", skip(backend))]
    pub fn load(
        backend: &dyn KeyValueStore,
        user_name: &str,
        today: NaiveDate,
        preview_limit: usize,
    ) -> Result<Self, StoreError> {
        let tasks: ListStore<Task> = ListStore::open(backend)?;
        let habits: ListStore<Habit> = ListStore::open(backend)?;

        let today_str = today.format("%Y-%m-%d").to_string();
        let progress = todays_tasks(tasks.items(), &today_str);
        let preview = preview_list(tasks.items(), &today_str, preview_limit);

        Ok(Self {
            user_name: user_name.to_string(),
            progress,
            preview: preview.tasks.into_iter().cloned().collect(),
            overflow: preview.overflow,
            habits: habits.items().to_vec(),
            quote: quotes::quote_of_the_day(today),
            today: today_str,
        })
    }
}
