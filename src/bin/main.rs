//! github-resume-generator binary.
//!
//! Loads the crew configuration, builds every agent and task, and prints the
//! resulting crew plan. `ask` sends a one-off prompt through the profile
//! researcher's search-augmented client.
//!
//! # Environment Variables
//!
//! - `RESUME_CONFIG_DIR` — directory holding `agents.yaml` and `tasks.yaml` (default: `config`)
//! - `GITHUB_USERNAME` — value for `{github_username}` in the plan
//! - `GOOGLE_API_KEY` / `GEMINI_API_KEY` — Gemini credentials, needed by `ask`
//! - `RUST_LOG` — Tracing filter (default: "info,github_resume_generator=debug")
//!
//! # Usage
//!
//! ```bash
//! GITHUB_USERNAME=octocat cargo run -- plan
//! cargo run -- ask "Summarize github.com/octocat"
//! ```

use std::collections::HashMap;

use anyhow::{anyhow, Context};
use github_resume_generator::cli::{parse_command, usage, CliCommand};
use github_resume_generator::llms::base_llm::response_text;
use github_resume_generator::llms::BaseLLMState;
use github_resume_generator::GithubResumeGenerator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,github_resume_generator=debug".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("github-resume-generator");
    let command = parse_command(args.get(1..).unwrap_or(&[]))
        .ok_or_else(|| anyhow!("{}", usage(program)))?;

    if command == CliCommand::Version {
        println!("{} {}", env!("CARGO_PKG_NAME"), github_resume_generator::VERSION);
        return Ok(());
    }

    let config_dir = std::env::var("RESUME_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    tracing::info!("Loading crew configuration from {}", config_dir);
    let mut generator = GithubResumeGenerator::from_config_dir(&config_dir)
        .with_context(|| format!("failed to load crew configuration from '{}'", config_dir))?;

    match command {
        CliCommand::Plan => {
            generator.build_all().context("failed to build crew")?;
            let crew = generator.crew();

            let mut inputs = HashMap::new();
            match std::env::var("GITHUB_USERNAME") {
                Ok(username) => {
                    inputs.insert("github_username".to_string(), username);
                }
                Err(_) => tracing::warn!("GITHUB_USERNAME not set; placeholders left as-is"),
            }

            let plan = crew.plan(&inputs);
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        CliCommand::Ask(prompt) => {
            let researcher = generator
                .github_profile_researcher()
                .context("failed to build profile researcher")?;
            let client = researcher.llm.client()?;
            tracing::info!("Asking {} ({})", researcher.role, client.model());

            let response = client
                .acall(BaseLLMState::string_to_messages(&prompt), None, HashMap::new())
                .await?;
            println!("{}", response_text(&response));
        }
        CliCommand::Version => {}
    }

    Ok(())
}
