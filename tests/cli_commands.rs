use wellday::cli::{
    CliError, handle_add_habit, handle_add_journal, handle_add_task, handle_list_habits,
    handle_list_journal, handle_list_tasks, handle_remove_habit, handle_remove_journal,
    handle_remove_task, handle_set_name, handle_toggle_task, handle_weather, view_quote,
};
use wellday::quotes::{HABIT_FALLBACK, JOURNAL_FALLBACK};
use wellday::list_store::StoreError;
use wellday::models::RecordError;
use wellday::utils::get_current_date_string;
use wellday::summary::HomeOverview;
use wellday::{Config, Database, Habit, JournalEntry, ListStore, Priority, Task};

fn temp_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("wellday.db")).unwrap();
    (dir, db)
}

fn tasks(db: &Database) -> Vec<Task> {
    ListStore::<Task>::open(db).unwrap().items().to_vec()
}

#[test]
fn add_task_defaults_date_and_priority() {
    let (_dir, db) = temp_db();
    handle_add_task("Morning walk".into(), None, None, Priority::Medium, &db).unwrap();

    let tasks = tasks(&db);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Morning walk");
    assert_eq!(tasks[0].date, get_current_date_string());
    assert_eq!(tasks[0].priority, Priority::Medium);
    assert!(!tasks[0].completed);
}

#[test]
fn add_task_keeps_details_and_appends() {
    let (_dir, db) = temp_db();
    handle_add_task("First".into(), None, Some("2025-07-01".into()), Priority::Low, &db).unwrap();
    handle_add_task(
        "Second".into(),
        Some(" bring water ".into()),
        Some("2025-07-02".into()),
        Priority::High,
        &db,
    )
    .unwrap();

    let tasks = tasks(&db);
    assert_eq!(tasks[0].title, "First");
    assert_eq!(tasks[1].title, "Second");
    assert_eq!(tasks[1].description, "bring water");
    assert_eq!(tasks[1].priority, Priority::High);
    assert_eq!(tasks[1].date, "2025-07-02");
}

#[test]
fn add_task_rejects_bad_date_and_blank_title() {
    let (_dir, db) = temp_db();
    let err = handle_add_task("Read".into(), None, Some("07/01/2025".into()), Priority::Low, &db)
        .unwrap_err();
    assert!(matches!(err, CliError::DateParseError(_)));

    let err = handle_add_task("   ".into(), None, None, Priority::Low, &db).unwrap_err();
    assert!(matches!(
        err,
        CliError::StoreError(StoreError::Invalid(RecordError::EmptyTitle))
    ));
    assert!(tasks(&db).is_empty());
}

#[test]
fn unpadded_date_lands_on_its_day() {
    let (_dir, db) = temp_db();
    handle_add_task("Walk".into(), None, Some("2025-8-1".into()), Priority::Medium, &db).unwrap();
    assert_eq!(tasks(&db)[0].date, "2025-08-01");

    let day = chrono::NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    let home = HomeOverview::load(&db, "Sam", day, 3).unwrap();
    assert_eq!(home.progress.total, 1);
    assert_eq!(home.preview[0].title, "Walk");

    handle_add_journal("Hot day".into(), None, Some("2025-8-1".into()), &db).unwrap();
    let entries = ListStore::<JournalEntry>::open(&db).unwrap();
    assert_eq!(entries.items()[0].date, "2025-08-01");
}

#[test]
fn toggle_and_remove_task() {
    let (_dir, db) = temp_db();
    handle_add_task("Stretch".into(), None, None, Priority::Medium, &db).unwrap();
    let id = tasks(&db)[0].id.clone();

    handle_toggle_task(id.clone(), &db).unwrap();
    assert!(tasks(&db)[0].completed);
    handle_toggle_task(id.clone(), &db).unwrap();
    assert!(!tasks(&db)[0].completed);

    handle_remove_task(id.clone(), &db).unwrap();
    assert!(tasks(&db).is_empty());

    let err = handle_remove_task(id, &db).unwrap_err();
    assert!(matches!(err, CliError::NotFound { kind: "task", .. }));
}

#[test]
fn toggle_unknown_task_is_reported() {
    let (_dir, db) = temp_db();
    let err = handle_toggle_task("missing".into(), &db).unwrap_err();
    assert_eq!(err.to_string(), "No task with ID missing");
}

#[test]
fn habits_are_listed_newest_first() {
    let (_dir, db) = temp_db();
    handle_add_habit("Drink water".into(), &db).unwrap();
    handle_add_habit("Read 10 pages".into(), &db).unwrap();
    handle_list_habits(None, &db).unwrap();

    let habits = ListStore::<Habit>::open(&db).unwrap();
    let names: Vec<&str> = habits.items().iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Read 10 pages", "Drink water"]);

    let id = habits.items()[1].id.clone();
    handle_remove_habit(id, &db).unwrap();
    assert_eq!(ListStore::<Habit>::open(&db).unwrap().len(), 1);
}

#[test]
fn journal_entries_need_text() {
    let (_dir, db) = temp_db();
    let err = handle_add_journal("  ".into(), Some(" ".into()), None, &db).unwrap_err();
    assert!(matches!(
        err,
        CliError::StoreError(StoreError::Invalid(RecordError::EmptyJournalEntry))
    ));

    handle_add_journal("Felt calm today".into(), None, Some("2025-07-03".into()), &db).unwrap();
    handle_add_journal(String::new(), Some("Gratitude".into()), None, &db).unwrap();
    handle_list_journal(None, &db).unwrap();

    let entries = ListStore::<JournalEntry>::open(&db).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries.items()[0].content, "Felt calm today");
    assert_eq!(entries.items()[0].date, "2025-07-03");
    assert_eq!(entries.items()[1].title.as_deref(), Some("Gratitude"));

    let id = entries.items()[0].id.clone();
    handle_remove_journal(id, &db).unwrap();
    assert_eq!(ListStore::<JournalEntry>::open(&db).unwrap().len(), 1);
}

#[test]
fn listing_filters_by_date() {
    let (_dir, db) = temp_db();
    handle_add_task("Old".into(), None, Some("2020-01-01".into()), Priority::Low, &db).unwrap();
    handle_list_tasks(Some("2020-01-01".into()), false, &db).unwrap();
    handle_list_tasks(None, true, &db).unwrap();
    assert!(matches!(
        handle_list_tasks(Some("yesterday".into()), false, &db),
        Err(CliError::DateParseError(_))
    ));
}

#[test]
fn set_name_saves_only_real_names() {
    let mut config = Config::default();
    let mut saves = 0;

    handle_set_name("   ".into(), &mut config, |_| {
        saves += 1;
        Ok(())
    })
    .unwrap();
    assert_eq!(config.user_name, "User");

    handle_set_name(" Jordan ".into(), &mut config, |_| {
        saves += 1;
        Ok(())
    })
    .unwrap();
    assert_eq!(config.user_name, "Jordan");
    assert_eq!(saves, 1);
}

#[test]
fn weather_reads_forecast_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forecast.json");
    std::fs::write(
        &path,
        r#"{"current_weather":{"temperature":4.5,"weathercode":61}}"#,
    )
    .unwrap();

    let config = Config::default();
    handle_weather(Some("Halifax".into()), Some(path), false, &config).unwrap();
    handle_weather(None, None, true, &config).unwrap();
}

#[test]
fn weather_failure_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nothing.json");
    handle_weather(None, Some(missing), false, &Config::default()).unwrap();
}

#[test]
fn list_views_show_quote_or_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("quote.json");
    std::fs::write(&good, r#"{"content":"Start where you are.","author":"Arthur Ashe"}"#).unwrap();
    let bad = dir.path().join("broken.json");
    std::fs::write(&bad, "<html>rate limited</html>").unwrap();

    assert_eq!(view_quote(Some(good.as_path()), HABIT_FALLBACK), "Start where you are.");
    assert_eq!(view_quote(Some(bad.as_path()), JOURNAL_FALLBACK), JOURNAL_FALLBACK);
    assert_eq!(view_quote(None, HABIT_FALLBACK), HABIT_FALLBACK);
    let missing = dir.path().join("missing.json");
    assert_eq!(view_quote(Some(missing.as_path()), HABIT_FALLBACK), HABIT_FALLBACK);

    let (_db_dir, db) = temp_db();
    handle_list_habits(Some(good), &db).unwrap();
    handle_list_journal(Some(bad), &db).unwrap();
}
