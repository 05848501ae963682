use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    /// Directory name used for config and data of this profile
    pub fn app_name(self) -> &'static str {
        match self {
            Profile::Dev => "wellday-dev",
            Profile::Prod => "wellday",
        }
    }
}

/// Get the configuration directory path for wellday
/// If profile is Dev, uses "wellday-dev" instead of "wellday"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "wellday", profile.app_name())
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for wellday
/// If profile is Dev, uses "wellday-dev" instead of "wellday"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "wellday", profile.app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate, chrono::ParseError> {
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Get the current date as an ISO 8601 string (YYYY-MM-DD)
pub fn get_current_date_string() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Rewrite a parseable day as zero-padded `YYYY-MM-DD`
pub fn canonical_date(date_str: &str) -> Result<String, chrono::ParseError> {
    parse_date(date_str.trim()).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Use `date` when it has content, otherwise today's date. Parseable days are
/// zero-padded; anything else is kept as typed for validation to reject.
pub fn date_or_today(date: Option<String>) -> String {
    date.map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .map(|d| canonical_date(&d).unwrap_or(d))
        .unwrap_or_else(get_current_date_string)
}

/// Generate a new record id.
///
/// UUIDv7 embeds a millisecond timestamp ahead of random bits, so ids created
/// later sort after earlier ones and two creations in the same millisecond
/// still differ.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_days_only() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn date_or_today_falls_back_on_blank_input() {
        let today = get_current_date_string();
        assert_eq!(date_or_today(None), today);
        assert_eq!(date_or_today(Some("   ".to_string())), today);
        assert_eq!(date_or_today(Some(" 2025-01-02 ".to_string())), "2025-01-02");
        assert_eq!(date_or_today(Some("2025-8-1".to_string())), "2025-08-01");
        assert_eq!(date_or_today(Some("someday".to_string())), "someday");
    }

    #[test]
    fn canonical_date_pads_month_and_day() {
        assert_eq!(canonical_date("2025-8-1").unwrap(), "2025-08-01");
        assert_eq!(canonical_date("2025-12-31").unwrap(), "2025-12-31");
        assert!(canonical_date("2025-13-01").is_err());
    }

    #[test]
    fn new_ids_are_unique_and_ordered() {
        let ids: Vec<String> = (0..64).map(|_| new_id()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn expand_path_leaves_plain_paths_alone() {
        assert_eq!(expand_path("/tmp/wellday.db"), PathBuf::from("/tmp/wellday.db"));
    }
}
