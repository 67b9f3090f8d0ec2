use std::io;

use anyhow::{Context, Result};
use clap::{Command, CommandFactory};
use clap_complete::{generate, Generator};
use colored::Colorize;
use tracing::instrument;

use crate::application::{update, update_all};
use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::infrastructure::HttpFetcher;

pub fn execute_command(cli: &Cli) -> Result<()> {
    let mut settings = Settings::load().context("loading configuration")?;
    if let Some(data_dir) = &cli.data_dir {
        settings.data_dir = data_dir.clone();
    }

    match &cli.command {
        Some(Commands::Update {
            language,
            pages_percentile,
            max_depth,
        }) => {
            if let Some(percentile) = pages_percentile {
                settings.pages_percentile = *percentile;
            }
            if let Some(depth) = max_depth {
                settings.max_depth = Some(*depth);
            }
            _update(&settings, language)
        }
        Some(Commands::UpdateAll) => _update_all(&settings),
        Some(Commands::Languages) => _languages(&settings),
        Some(Commands::Completion { shell }) => {
            print_completions(*shell, &mut Cli::command());
            Ok(())
        }
        None => Ok(()),
    }
}

#[instrument(skip(settings))]
fn _update(settings: &Settings, language: &str) -> Result<()> {
    let fetcher = HttpFetcher::new(&settings.fetch);
    update(settings, &fetcher, language)
        .with_context(|| format!("updating {}wiki", language))?;
    println!(
        "{}",
        format!(
            "Updated {}wiki in {}",
            language,
            settings.data_dir.display()
        )
        .green()
    );
    Ok(())
}

#[instrument(skip(settings))]
fn _update_all(settings: &Settings) -> Result<()> {
    let fetcher = HttpFetcher::new(&settings.fetch);
    update_all(settings, &fetcher).context("updating all languages")?;
    println!(
        "{}",
        format!("Dataset rebuilt in {}", settings.data_dir.display()).green()
    );
    Ok(())
}

fn _languages(settings: &Settings) -> Result<()> {
    for language in &settings.languages {
        println!("{}", language);
    }
    Ok(())
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
