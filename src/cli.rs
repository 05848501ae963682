use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::list_store::{ListStore, Placement, Record, StoreError};
use crate::models::{Habit, JournalEntry, Priority, Task};
use crate::quotes::{self, QuoteError, QuoteSource};
use crate::storage::KeyValueStore;
use crate::summary::{HomeOverview, tasks_on};
use crate::utils::{canonical_date, get_current_date_string};
use crate::weather::{City, CurrentWeather, ForecastSource, WeatherError, WeatherState};
use crate::weather::{fetch_weather, find_city};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "wellday")]
#[command(about = "Agenda, habits and journal - a small wellness companion")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    /// Mirror log output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show today's overview (default if no subcommand)
    Home,
    /// Add a task to the agenda
    AddTask {
        /// Task title
        title: String,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
        /// Day of the task (YYYY-MM-DD), today if omitted
        #[arg(long)]
        date: Option<String>,
        /// high, medium or low
        #[arg(long, default_value_t = Priority::Medium)]
        priority: Priority,
    },
    /// List agenda tasks
    Tasks {
        /// Only tasks on this day (YYYY-MM-DD)
        #[arg(long, conflicts_with = "today")]
        date: Option<String>,
        /// Only today's tasks
        #[arg(long)]
        today: bool,
    },
    /// Mark a task done, or not done again
    ToggleTask {
        id: String,
    },
    /// Delete a task
    RemoveTask {
        id: String,
    },
    /// Start tracking a habit
    AddHabit {
        name: String,
    },
    /// List tracked habits
    Habits {
        /// File holding a quote service response
        #[arg(long)]
        quote: Option<PathBuf>,
    },
    /// Stop tracking a habit
    RemoveHabit {
        id: String,
    },
    /// Write a journal entry
    AddJournal {
        /// Journal content
        content: String,
        /// Journal title
        #[arg(long)]
        title: Option<String>,
        /// Day of the entry (YYYY-MM-DD), today if omitted
        #[arg(long)]
        date: Option<String>,
    },
    /// List journal entries
    Journal {
        /// File holding a quote service response
        #[arg(long)]
        quote: Option<PathBuf>,
    },
    /// Delete a journal entry
    RemoveJournal {
        id: String,
    },
    /// Change the name shown on the home view
    SetName {
        name: String,
    },
    /// Print the quote of the day
    Quote,
    /// Describe the weather from a forecast response (read from stdin by default)
    Weather {
        /// City name, defaults to the configured city
        #[arg(long)]
        city: Option<String>,
        /// File holding the forecast response
        #[arg(long)]
        input: Option<PathBuf>,
        /// Only print the forecast request URL for the city
        #[arg(long)]
        url: bool,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    StoreError(#[from] StoreError),
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("No {kind} with ID {id}")]
    NotFound { kind: &'static str, id: String },
}

fn checked_date(date: Option<String>) -> Result<Option<String>, CliError> {
    match date {
        Some(date) if !date.trim().is_empty() => {
            let date = canonical_date(&date).map_err(|e| {
                CliError::DateParseError(format!("Invalid date format '{}': {}", date.trim(), e))
            })?;
            Ok(Some(date))
        }
        _ => Ok(None),
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(names: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(names));
    table
}

/// Handle the home command
pub fn handle_home(config: &Config, backend: &dyn KeyValueStore) -> Result<(), CliError> {
    let today = chrono::Utc::now().date_naive();
    let home = HomeOverview::load(backend, &config.user_name, today, config.preview_limit)?;

    println!("Welcome, {}!", home.user_name);
    println!();
    println!("Tasks Today");
    println!("  {}", home.progress.summary());
    if home.progress.total == 0 {
        println!("  Add tasks with `wellday add-task`");
    } else {
        for task in &home.preview {
            let mark = if task.completed { "✓" } else { "○" };
            println!("  {} {}", mark, task.title);
        }
        if home.overflow > 0 {
            println!("  +{} more...", home.overflow);
        }
    }
    println!();
    println!("Habits");
    if home.habits.is_empty() {
        println!("  No habits yet");
    } else {
        for habit in &home.habits {
            println!("  • {}", habit.name);
        }
    }
    println!();
    println!("\"{}\"", home.quote);

    Ok(())
}

/// Handle the add-task command
pub fn handle_add_task(
    title: String,
    description: Option<String>,
    date: Option<String>,
    priority: Priority,
    backend: &dyn KeyValueStore,
) -> Result<(), CliError> {
    let date = checked_date(date)?;

    let mut task = Task::new(title, date);
    task.description = description.map(|d| d.trim().to_string()).unwrap_or_default();
    task.priority = priority;
    let id = task.id.clone();

    let mut tasks: ListStore<Task> = ListStore::open(backend)?;
    tasks.add(task, Placement::Back)?;
    println!("Task created successfully (ID: {})", id);

    Ok(())
}

/// Handle the tasks command
pub fn handle_list_tasks(
    date: Option<String>,
    today: bool,
    backend: &dyn KeyValueStore,
) -> Result<(), CliError> {
    let date = if today {
        Some(get_current_date_string())
    } else {
        checked_date(date)?
    };

    let tasks: ListStore<Task> = ListStore::open(backend)?;
    let shown: Vec<&Task> = match date.as_deref() {
        Some(day) => tasks_on(tasks.items(), day).collect(),
        None => tasks.items().iter().collect(),
    };

    if shown.is_empty() {
        println!("{}", no_tasks_message(date.as_deref()));
        return Ok(());
    }

    let mut table = new_table(&["ID", "Done", "Title", "Date", "Priority", "Description"]);
    for task in shown {
        table.add_row(vec![
            task.id.clone(),
            if task.completed { "✓".to_string() } else { String::new() },
            task.title.clone(),
            task.date.clone(),
            task.priority.to_string().to_uppercase(),
            task.description.clone(),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn no_tasks_message(day: Option<&str>) -> String {
    match day {
        Some(day) => format!("No tasks on {day}"),
        None => "No tasks yet. Add one with `wellday add-task`".to_string(),
    }
}

/// Handle the toggle-task command
pub fn handle_toggle_task(id: String, backend: &dyn KeyValueStore) -> Result<(), CliError> {
    let mut tasks: ListStore<Task> = ListStore::open(backend)?;
    if tasks.get(&id).is_none() {
        return Err(CliError::NotFound { kind: "task", id });
    }

    tasks.update(&id, Task::toggle_completed)?;
    if let Some(task) = tasks.get(&id) {
        let state = if task.completed { "done" } else { "not done" };
        println!("Task '{}' marked {}", task.title, state);
    }

    Ok(())
}

/// Handle the remove-task command
pub fn handle_remove_task(id: String, backend: &dyn KeyValueStore) -> Result<(), CliError> {
    remove_by_id::<Task>(id, backend)
}

/// Handle the add-habit command
pub fn handle_add_habit(name: String, backend: &dyn KeyValueStore) -> Result<(), CliError> {
    let habit = Habit::new(name);
    let id = habit.id.clone();

    let mut habits: ListStore<Habit> = ListStore::open(backend)?;
    habits.add(habit, Placement::Front)?;
    println!("Habit added successfully (ID: {})", id);

    Ok(())
}

/// Handle the habits command
pub fn handle_list_habits(
    quote: Option<PathBuf>,
    backend: &dyn KeyValueStore,
) -> Result<(), CliError> {
    let habits: ListStore<Habit> = ListStore::open(backend)?;
    if habits.is_empty() {
        println!("No habits yet. Add one with `wellday add-habit`");
    } else {
        let mut table = new_table(&["ID", "Habit"]);
        for habit in habits.items() {
            table.add_row(vec![habit.id.clone(), habit.name.clone()]);
        }
        println!("{table}");
    }
    println!();
    println!("\"{}\"", view_quote(quote.as_deref(), quotes::HABIT_FALLBACK));

    Ok(())
}

/// Handle the remove-habit command
pub fn handle_remove_habit(id: String, backend: &dyn KeyValueStore) -> Result<(), CliError> {
    remove_by_id::<Habit>(id, backend)
}

/// Handle the add-journal command
pub fn handle_add_journal(
    content: String,
    title: Option<String>,
    date: Option<String>,
    backend: &dyn KeyValueStore,
) -> Result<(), CliError> {
    let date = checked_date(date)?;
    let entry = JournalEntry::new(title, content, date);
    let id = entry.id.clone();

    let mut entries: ListStore<JournalEntry> = ListStore::open(backend)?;
    entries.add(entry, Placement::Back)?;
    println!("Journal entry created successfully (ID: {})", id);

    Ok(())
}

/// Handle the journal command
pub fn handle_list_journal(
    quote: Option<PathBuf>,
    backend: &dyn KeyValueStore,
) -> Result<(), CliError> {
    let entries: ListStore<JournalEntry> = ListStore::open(backend)?;
    if entries.is_empty() {
        println!("No journal entries yet. Write one with `wellday add-journal`");
    } else {
        let mut table = new_table(&["ID", "Date", "Title", "Content"]);
        for entry in entries.items() {
            table.add_row(vec![
                entry.id.clone(),
                entry.date.clone(),
                entry.display_title().to_string(),
                entry.content.clone(),
            ]);
        }
        println!("{table}");
    }
    println!();
    println!("\"{}\"", view_quote(quote.as_deref(), quotes::JOURNAL_FALLBACK));

    Ok(())
}

/// Handle the remove-journal command
pub fn handle_remove_journal(id: String, backend: &dyn KeyValueStore) -> Result<(), CliError> {
    remove_by_id::<JournalEntry>(id, backend)
}

fn remove_by_id<T: Record>(
    id: String,
    backend: &dyn KeyValueStore,
) -> Result<(), CliError> {
    let mut store: ListStore<T> = ListStore::open(backend)?;
    if store.get(&id).is_none() {
        return Err(CliError::NotFound { kind: T::KIND, id });
    }

    store.remove(&id)?;
    println!("Deleted {} {}", T::KIND, id);

    Ok(())
}

/// Handle the set-name command. Blank names leave the config untouched.
pub fn handle_set_name(
    name: String,
    config: &mut Config,
    save: impl FnOnce(&mut Config) -> Result<(), ConfigError>,
) -> Result<(), CliError> {
    if !config.set_user_name(&name) {
        println!("Name unchanged ({})", config.user_name);
        return Ok(());
    }

    save(config)?;
    println!("Welcome, {}!", config.user_name);

    Ok(())
}

/// Handle the quote command
pub fn handle_quote() -> Result<(), CliError> {
    println!("{}", quotes::quote_of_the_day(chrono::Utc::now().date_naive()));
    Ok(())
}

/// Quote service response handed over as a file
struct QuoteInput<'a> {
    path: Option<&'a Path>,
}

impl QuoteSource for QuoteInput<'_> {
    fn random_quote(&self) -> Result<String, QuoteError> {
        let path = self
            .path
            .ok_or_else(|| QuoteError::Unavailable("no quote response given".to_string()))?;
        let body = std::fs::read_to_string(path)
            .map_err(|e| QuoteError::Unavailable(e.to_string()))?;
        quotes::parse_quote(&body)
    }
}

/// Quote for a list view: the one in `input` if it reads cleanly, else `fallback`
pub fn view_quote(input: Option<&Path>, fallback: &str) -> String {
    quotes::quote_or_fallback(&QuoteInput { path: input }, fallback)
}

/// Forecast response handed over as text, from a file or stdin
struct ResponseInput<'a> {
    path: Option<&'a Path>,
}

impl ForecastSource for ResponseInput<'_> {
    fn current_weather(&self, _city: &City) -> Result<CurrentWeather, WeatherError> {
        let body = match self.path {
            Some(path) => std::fs::read_to_string(path),
            None => std::io::read_to_string(std::io::stdin()),
        }
        .map_err(|e| WeatherError::Unavailable(e.to_string()))?;
        CurrentWeather::from_response(&body)
    }
}

/// Handle the weather command
pub fn handle_weather(
    city: Option<String>,
    input: Option<PathBuf>,
    url: bool,
    config: &Config,
) -> Result<(), CliError> {
    let city = find_city(city.as_deref().unwrap_or(&config.city));
    if url {
        println!("{}", city.forecast_url());
        return Ok(());
    }

    let source = ResponseInput {
        path: input.as_deref(),
    };
    match fetch_weather(&source, city) {
        WeatherState::Loaded(report) => {
            println!("Weather Today in {}", report.city);
            println!("  {}°C", report.temperature);
            println!("  {}", report.condition);
            println!("  {}", report.advice);
        }
        WeatherState::Failed { message } => {
            println!("{}", message);
            println!("Run the command again to retry");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_names_the_filtered_day() {
        assert_eq!(no_tasks_message(Some("2025-05-20")), "No tasks on 2025-05-20");
        assert_eq!(
            no_tasks_message(None),
            "No tasks yet. Add one with `wellday add-task`"
        );
    }
}
