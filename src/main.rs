use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use readme_generator::{
    api::ReadmeRequest, logging, utils::normalize_repo_input, Config, ReadmeService,
    SectionSelection, Tone,
};

#[derive(Parser)]
#[command(author, version, about = "Generate a README.md for a public GitHub repository", long_about = None)]
struct Cli {
    /// Repository URL, host/owner/repo or owner/repo
    #[arg(short, long)]
    url: String,

    /// Writing tone: professional, friendly, technical or marketing
    #[arg(short, long, default_value = "professional")]
    tone: String,

    /// Language the README is written in
    #[arg(short, long, default_value = "English")]
    language: String,

    /// Comma-separated section keys (default: all sections)
    #[arg(short, long)]
    sections: Option<String>,

    /// Write the README to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    logging::init(cli.log_level.as_deref().unwrap_or(&config.log_level));

    let sections = match cli.sections.as_deref() {
        Some(list) => SectionSelection::parse_list(list)?,
        None => SectionSelection::all(),
    };
    if sections.is_empty() {
        anyhow::bail!("At least one section must be selected");
    }

    let request = ReadmeRequest {
        repo_url: normalize_repo_input(&cli.url),
        sections,
        tone: cli.tone.parse::<Tone>()?,
        language: cli.language,
    };

    let service = ReadmeService::from_config(&config)?;

    println!(
        "{} {}",
        "Generating README for".bright_green(),
        request.repo_url.bright_white()
    );
    let pb = create_spinner();
    pb.set_message(format!("Processing {}", request.repo_url));

    let result = service.generate(&request).await;
    pb.finish_and_clear();

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".bright_red(), e.to_string().bright_red());
            std::process::exit(1);
        }
    };

    let stack = &response.metadata.detected_tech_stack;
    eprintln!(
        "{} {} ({})",
        "[SUCCESS]".bright_green(),
        response.metadata.full_name.bright_white(),
        stack.languages.join(", ").bright_cyan()
    );

    match cli.output {
        Some(path) => {
            tokio::fs::write(&path, &response.readme)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} {}",
                "[SAVED]".bright_blue(),
                path.display().to_string().bright_white()
            );
        }
        None => println!("{}", response.readme),
    }

    Ok(())
}

fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["-", "\\", "|", "/", "-", "\\", "|", "/"]);
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
