//! CLI command implementations

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::path::PathBuf;

use crate::analysis::{AnalysisOutcome, CallAnalyzer, CallInput};
use crate::cli::args::{Cli, ConfigCommand};
use crate::config::Settings;
use crate::contacts::ContactStore;
use crate::storage::{AnalysisRecord, Database};

/// Options for the analyze command
#[derive(Debug, Default)]
pub struct AnalyzeOptions {
    pub phone: String,
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub contacts: Option<PathBuf>,
    pub model: Option<String>,
    pub json: bool,
    pub no_save: bool,
}

/// Analyze one call and print the post-call summary
pub async fn analyze_call(settings: &Settings, options: AnalyzeOptions) -> Result<()> {
    let call_text = match (options.text, &options.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read call transcript: {}", path.display()))?,
        (None, None) => anyhow::bail!("Provide the call text with --text or --file"),
    };

    let mut settings = settings.clone();
    if let Some(model) = options.model {
        settings.llm.model = model;
    }
    let store_path = options.contacts.unwrap_or_else(|| settings.contacts_path());

    let analyzer = CallAnalyzer::from_settings(&settings)?;
    let input = CallInput::new(call_text, options.phone, store_path);
    let outcome = analyzer.analyze(&input).await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if let Some(summary) = outcome.summary() {
        println!("{}", summary);
    }

    // History is best effort; the outcome has already been printed.
    if settings.history.enabled && !options.no_save {
        if let Err(e) = record_outcome(&settings, &input, &outcome) {
            tracing::warn!("Failed to save analysis to history: {:#}", e);
        }
    }

    match outcome {
        AnalysisOutcome::Success(_) => Ok(()),
        AnalysisOutcome::Failure(err) => {
            if let Some(raw) = err.raw_response() {
                eprintln!("Raw response:\n{}", raw);
            }
            anyhow::bail!("Analysis failed ({}): {}", err.kind(), err)
        }
    }
}

fn record_outcome(settings: &Settings, input: &CallInput, outcome: &AnalysisOutcome) -> Result<()> {
    let db = Database::open(settings)?;
    let record = AnalysisRecord::from_outcome(input, outcome);
    db.insert_analysis(&record)?;
    tracing::info!("Analysis {} saved to history", &record.id[..8]);
    Ok(())
}

/// Show the contact matching a phone number
pub async fn lookup_contact(
    settings: &Settings,
    phone: &str,
    contacts: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let store_path = contacts.unwrap_or_else(|| settings.contacts_path());
    let store = ContactStore::load(&store_path, &settings.contacts.phone_column)?;

    let record = store
        .find_by_phone(phone)
        .with_context(|| format!("No matching contact found for phone number '{}'", phone.trim()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("{}: {}", settings.contacts.phone_column, record.phone_number);
    for (column, value) in &record.fields {
        println!("{}: {}", column, value);
    }

    Ok(())
}

/// List recent analyses
pub async fn show_history(settings: &Settings, limit: usize) -> Result<()> {
    let db = Database::open(settings)?;
    let records = db.list_analyses(limit)?;

    if records.is_empty() {
        println!("No analyses found");
        return Ok(());
    }

    println!(
        "{:<10} {:<17} {:<18} {:<16} {}",
        "ID", "Date", "Phone", "Status", "Result"
    );
    println!("{}", "-".repeat(90));

    for record in records {
        let result = record
            .summary
            .as_deref()
            .or(record.error.as_deref())
            .unwrap_or("");
        println!(
            "{:<10} {:<17} {:<18} {:<16} {}",
            &record.id[..8],
            record.created_at.format("%Y-%m-%d %H:%M"),
            truncate(&record.phone_number, 18),
            record.status,
            truncate(result, 60)
        );
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(&redacted(settings))?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Print the completion script for the requested shell to stdout.
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let command_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, command_name, &mut std::io::stdout());
}

// Helper functions

fn redacted(settings: &Settings) -> Settings {
    let mut settings = settings.clone();
    if !settings.llm.api_key.is_empty() {
        settings.llm.api_key = "<redacted>".to_string();
    }
    settings
}

fn truncate(s: &str, max_len: usize) -> String {
    let flat = s.replace('\n', " ");
    if flat.chars().count() <= max_len {
        flat
    } else {
        let head: String = flat.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_flattens_and_shortens() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("line one\nline two", 40), "line one line two");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }

    #[test]
    fn redacted_hides_api_key() {
        let mut settings = Settings::default();
        settings.llm.api_key = "secret".to_string();
        assert_eq!(redacted(&settings).llm.api_key, "<redacted>");
        assert_eq!(redacted(&Settings::default()).llm.api_key, "");
    }
}
