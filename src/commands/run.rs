//! Implementation of the `run` command.

use crate::agent::{AgentRuntime, ToolKit, run_task};
use crate::cli::RunArgs;
use crate::config::DtwinConfig;
use crate::error::{DtwinError, Result};
use crate::events::{Event, RunAction, append_event};
use crate::openai::OpenAiClient;
use crate::task::{self, TaskKind, TaskParams, TaskRequest};
use chrono::Local;
use serde_json::json;
use std::time::{Duration, Instant};

/// Execute the `dtwin run` command.
///
/// Builds the task from the CLI arguments and either prints it (dry run)
/// or executes it against the configured model, logging dispatch and
/// completion events around the execution.
pub fn cmd_run(args: RunArgs) -> Result<()> {
    let config = DtwinConfig::load()?;

    let params = TaskParams {
        idea_or_company: args.idea_or_company,
        investor_name: args.investor_name,
        context: args.context,
        areas_of_interest: args.areas_of_interest,
    };

    // Dry run mode - just print what would be sent
    if args.dry_run {
        return print_dry_run(&config, &args.task_type, &params);
    }

    // Parse the tag up front so an unknown task type fails before the
    // client is built or the API key is read.
    let kind: TaskKind = args.task_type.parse()?;

    let api_key = config.api_key()?;
    let client = OpenAiClient::new(
        &config.llm.base_url,
        api_key,
        Duration::from_secs(config.llm.timeout_seconds),
    )
    .map_err(|e| DtwinError::UserError(format!("failed to build API client: {e:#}")))?;
    let toolkit = ToolKit::new(&config.tools)
        .map_err(|e| DtwinError::UserError(format!("failed to build toolset: {e:#}")))?;
    let runtime = AgentRuntime::new(client, toolkit, &config);

    // Print execution info
    println!("Running task {}...", kind);
    println!();
    println!("  Model:       {}", config.llm.model);
    println!("  Temperature: {}", config.llm.temperature);
    println!();

    // Log task dispatch event
    let dispatch_event = Event::new(RunAction::TaskDispatch)
        .with_task(kind.as_str())
        .with_details(json!({
            "model": config.llm.model,
            "temperature": config.llm.temperature,
        }));
    if let Err(e) = append_event(&dispatch_event) {
        eprintln!("Warning: failed to log task_dispatch event: {}", e);
    }

    // Execute the task
    let started = Instant::now();
    let result = run_task(&config, &runtime, &args.task_type, &params);
    let duration = started.elapsed();

    // Log task complete event
    let complete_event = Event::new(RunAction::TaskComplete)
        .with_task(kind.as_str())
        .with_details(json!({
            "model": config.llm.model,
            "duration_ms": duration.as_millis() as u64,
            "success": result.is_ok(),
        }));
    if let Err(e) = append_event(&complete_event) {
        eprintln!("Warning: failed to log task_complete event: {}", e);
    }

    let answer = result?;
    println!("{}", answer.trim());
    Ok(())
}

fn print_dry_run(config: &DtwinConfig, task_type: &str, params: &TaskParams) -> Result<()> {
    let request = TaskRequest::from_args(task_type, params)?;
    let spec = task::build(&request, &config.prompts, Local::now().date_naive())?;

    println!(
        "Dry run for task {} (nothing will be executed):",
        request.kind()
    );
    println!();
    println!("--- Description ---");
    println!("{}", spec.description);
    println!();
    println!("--- Expected output ---");
    println!("{}", spec.expected_output);
    Ok(())
}
