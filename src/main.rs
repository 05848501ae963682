use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use wellday::{
    Config, Database, Profile,
    cli::{self, Cli, Commands},
    logging, utils,
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev switches to the separate dev config/database
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config_path = match &cli.config {
        Some(path) => utils::expand_path(path),
        None => Config::get_config_path(profile)?,
    };
    let mut config = Config::load_from_path(&config_path, profile)?;

    let log_dir = utils::get_data_dir(profile)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logs");
    logging::enable_logging(&log_dir, &config.log_level, cli.verbose)?;
    tracing::debug!(config = %config_path.display(), "configuration loaded");

    let db = Database::new(config.get_database_path())?;

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Home) {
        Commands::Home => cli::handle_home(&config, &db)?,
        Commands::AddTask { title, description, date, priority } => {
            cli::handle_add_task(title, description, date, priority, &db)?;
        }
        Commands::Tasks { date, today } => cli::handle_list_tasks(date, today, &db)?,
        Commands::ToggleTask { id } => cli::handle_toggle_task(id, &db)?,
        Commands::RemoveTask { id } => cli::handle_remove_task(id, &db)?,
        Commands::AddHabit { name } => cli::handle_add_habit(name, &db)?,
        Commands::Habits { quote } => cli::handle_list_habits(quote, &db)?,
        Commands::RemoveHabit { id } => cli::handle_remove_habit(id, &db)?,
        Commands::AddJournal { content, title, date } => {
            cli::handle_add_journal(content, title, date, &db)?;
        }
        Commands::Journal { quote } => cli::handle_list_journal(quote, &db)?,
        Commands::RemoveJournal { id } => cli::handle_remove_journal(id, &db)?,
        Commands::SetName { name } => {
            cli::handle_set_name(name, &mut config, |config| config.save_to_path(&config_path))?;
        }
        Commands::Quote => cli::handle_quote()?,
        Commands::Weather { city, input, url } => cli::handle_weather(city, input, url, &config)?,
    }

    Ok(())
}
