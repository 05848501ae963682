use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::list_store::Record;
use crate::utils::{date_or_today, new_id, parse_date};

/// Storage key of the agenda task list
pub const TASKS_KEY: &str = "@agenda_tasks";
/// Storage key of the habit list
pub const HABITS_KEY: &str = "@habits";
/// Storage key of the journal entry list
pub const JOURNAL_KEY: &str = "@journal_entries";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Task title must not be empty")]
    EmptyTitle,
    #[error("Habit name must not be empty")]
    EmptyName,
    #[error("Journal entry needs a title or some content")]
    EmptyJournalEntry,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Unknown priority '{0}', expected high, medium or low")]
    UnknownPriority(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(name)
    }
}

impl FromStr for Priority {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            other => Err(RecordError::UnknownPriority(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String, // YYYY-MM-DD
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    pub date: String, // YYYY-MM-DD
}

impl Task {
    /// Create an open, medium priority task. A missing or blank date means today.
    pub fn new(title: String, date: Option<String>) -> Self {
        Self {
            id: new_id(),
            title: title.trim().to_string(),
            description: String::new(),
            date: date_or_today(date),
            completed: false,
            priority: Priority::default(),
        }
    }

    /// Flip the completion flag, keeping everything else
    pub fn toggle_completed(self) -> Self {
        Self {
            completed: !self.completed,
            ..self
        }
    }
}

impl Habit {
    pub fn new(name: String) -> Self {
        Self {
            id: new_id(),
            name: name.trim().to_string(),
        }
    }
}

impl JournalEntry {
    pub fn new(title: Option<String>, content: String, date: Option<String>) -> Self {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self {
            id: new_id(),
            title,
            content: content.trim().to_string(),
            date: date_or_today(date),
        }
    }

    /// Title for listings; untitled entries fall back to their date
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.date,
        }
    }
}

/// Stored days must be exactly `YYYY-MM-DD`, since filters compare them as text
fn check_date(date: &str) -> Result<(), RecordError> {
    match parse_date(date) {
        Ok(parsed) if parsed.format("%Y-%m-%d").to_string() == date => Ok(()),
        _ => Err(RecordError::InvalidDate(date.to_string())),
    }
}

impl Record for Task {
    const STORAGE_KEY: &'static str = TASKS_KEY;
    const KIND: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordError> {
        if self.title.trim().is_empty() {
            return Err(RecordError::EmptyTitle);
        }
        check_date(&self.date)
    }
}

impl Record for Habit {
    const STORAGE_KEY: &'static str = HABITS_KEY;
    const KIND: &'static str = "habit";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }
        Ok(())
    }
}

impl Record for JournalEntry {
    const STORAGE_KEY: &'static str = JOURNAL_KEY;
    const KIND: &'static str = "journal entry";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordError> {
        let has_title = self.title.as_deref().is_some_and(|t| !t.trim().is_empty());
        if !has_title && self.content.trim().is_empty() {
            return Err(RecordError::EmptyJournalEntry);
        }
        check_date(&self.date)
    }
}
