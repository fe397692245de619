mod args;
mod paths;
mod prompt;

use std::fs::{self, File};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use signup_form::prelude::*;
use signup_lib::SignupClient;
use signup_lib::model::FilePart;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::args::Cli;
use crate::prompt::Prompter;

const EXIT_FAILED: u8 = 1;
const EXIT_INVALID: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILED)
        }
    }
}

/// Rotate old logs and write this run's log to the cache dir.
fn init_logging(level: LevelFilter) {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else { return };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("Could not create log file {}: {}", path.display(), e),
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let client = SignupClient::builder()
        .url(cli.url.clone())
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .context("Invalid backend URL")?;
    log::info!("Using backend {}", client.base_url());

    let toasts = ToastQueue::new();
    let mut form = SignupForm::new(client.user_create(), toasts.clone(), client.clone());
    if cli.strict {
        form = form.with_schema(SignupSchema::strict());
    }

    for (field, value) in cli.values() {
        form.on_field_change(field, value)?;
    }
    if let Some(path) = &cli.photo_file {
        let file = FilePart::from_path(path)
            .await
            .with_context(|| format!("Could not read photo {}", path.display()))?;
        form.attach_photo(file)?;
    }

    let mut prompter = cli.interactive.then(Prompter::stdin);
    if let Some(prompter) = prompter.as_mut() {
        let missing = prompt::missing_fields(&form);
        prompter.fill(&form, &missing).await?;
    }

    loop {
        let outcome = form.on_submit().await?;
        print_toasts(&toasts);

        match outcome {
            SubmitOutcome::Created(created) => {
                println!("{}", created.body);
                return Ok(ExitCode::SUCCESS);
            }
            SubmitOutcome::Failed(_) => return Ok(ExitCode::from(EXIT_FAILED)),
            SubmitOutcome::Invalid(errors) => {
                for error in errors.errors() {
                    eprintln!("{}: {}", error.field_name, error.message);
                }

                let Some(prompter) = prompter.as_mut() else {
                    return Ok(ExitCode::from(EXIT_INVALID));
                };
                let rejected: Vec<FieldName> = errors
                    .errors()
                    .iter()
                    .filter_map(|e| e.field_name.parse().ok())
                    .collect();
                if !prompter.fill(&form, &rejected).await? {
                    return Ok(ExitCode::from(EXIT_INVALID));
                }
            }
        }
    }
}

fn print_toasts(toasts: &ToastQueue) {
    for toast in toasts.drain() {
        match toast.level {
            ToastLevel::Error | ToastLevel::Warning => eprintln!("{}", toast.title),
            ToastLevel::Info | ToastLevel::Success => println!("{}", toast.title),
        }
        if let Some(body) = toast.body {
            println!("{}", body);
        }
    }
}
