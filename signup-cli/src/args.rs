use std::path::PathBuf;

use clap::Parser;
use signup_form::draft::FieldName;
use signup_lib::DEFAULT_BASE_URL;
use simplelog::LevelFilter;

/// Register a user with the signup backend.
#[derive(Debug, Parser)]
#[command(name = "signup", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the backend
    #[arg(long, env = "SIGNUP_API_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Request timeout in seconds
    #[arg(long, env = "SIGNUP_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Also require state, country and a YYYY-MM-DD date of birth
    #[arg(long)]
    pub strict: bool,

    /// Prompt for missing fields and re-prompt for rejected ones
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(long)]
    pub name: Option<String>,

    /// Date of birth
    #[arg(long)]
    pub dob: Option<String>,

    /// Photo reference sent as text
    #[arg(long, conflicts_with = "photo_file")]
    pub photo: Option<String>,

    /// Photo file uploaded as a file part
    #[arg(long)]
    pub photo_file: Option<PathBuf>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    /// Log level written to the log file
    #[arg(long, env = "SIGNUP_LOG", default_value = "debug")]
    pub log_level: LevelFilter,
}

impl Cli {
    /// Field values given on the command line.
    pub fn values(&self) -> Vec<(FieldName, &str)> {
        FieldName::ALL
            .into_iter()
            .filter_map(|field| self.value(field).map(|v| (field, v)))
            .collect()
    }

    fn value(&self, field: FieldName) -> Option<&str> {
        match field {
            FieldName::Name => self.name.as_deref(),
            FieldName::Dob => self.dob.as_deref(),
            FieldName::Photo => self.photo.as_deref(),
            FieldName::State => self.state.as_deref(),
            FieldName::Country => self.country.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_values_follow_render_order() {
        let cli = Cli::parse_from([
            "signup",
            "--country",
            "US",
            "--name",
            "Alice Wonderland",
            "--dob",
            "2000-01-01",
        ]);

        assert_eq!(
            cli.values(),
            vec![
                (FieldName::Name, "Alice Wonderland"),
                (FieldName::Dob, "2000-01-01"),
                (FieldName::Country, "US"),
            ]
        );
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_photo_and_photo_file_conflict() {
        let result = Cli::try_parse_from(["signup", "--photo", "p.jpg", "--photo-file", "p.jpg"]);
        assert!(result.is_err());
    }
}
