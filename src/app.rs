//! Command dispatch: routes parsed CLI commands onto the assessment flows.

use crate::api::BackendClient;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::interview::{InterviewRoom, RoomCommand};
use crate::quiz;
use crate::report;
use crate::session::{DashboardSubmission, ROLE_CATALOG, SessionFlow, role_display_name};
use crate::speech::{ConsoleSpeechInput, ConsoleSpeechOutput};
use crate::ui;
use crate::vision::{HeadlessCapture, NullScanner};
use anyhow::{Context, Result};
use dialoguer::Select;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Init { force } => init(&config, force),
        Commands::Assess {
            resume,
            role,
            domain,
            backend,
            duration,
        } => assess(config, resume, role, domain, backend, duration).await,
        Commands::Report {
            session_id,
            backend,
        } => fetch_report(config, &session_id, backend).await,
    }
}

fn init(config: &Config, force: bool) -> Result<()> {
    if force {
        let fresh = Config {
            config_path: config.config_path.clone(),
            ..Config::default()
        };
        fresh.save()?;
        println!(
            "  {} {}",
            ui::style::success("✓"),
            ui::style::value(format!("reset {}", config.config_path.display()))
        );
    } else {
        println!(
            "  {} {}",
            ui::style::success("✓"),
            ui::style::value(format!("config at {}", config.config_path.display()))
        );
        println!(
            "  {}",
            ui::style::dim("edit it directly, or rerun with --force to reset defaults")
        );
    }
    Ok(())
}

async fn assess(
    mut config: Config,
    resume: PathBuf,
    role: Option<String>,
    domain: Option<String>,
    backend: Option<String>,
    duration: Option<u64>,
) -> Result<()> {
    if let Some(origin) = backend {
        config.backend.origin = origin;
    }
    if let Some(secs) = duration {
        config.interview.duration_secs = secs;
    }

    let client = Arc::new(BackendClient::new(&config.backend));
    let mut flow = SessionFlow::new();
    tracing::info!(session_id = flow.session_id(), backend = client.origin(), "assessment started");

    // ── Dashboard ───────────────────────────────────────────────────────
    ui::print_dashboard_header();
    let role_name = match role {
        Some(value) => role_display_name(&value),
        None => pick_role()?,
    };
    let domain = domain.unwrap_or_else(|| role_name.clone());

    let file_bytes = tokio::fs::read(&resume)
        .await
        .with_context(|| format!("could not read resume at {}", resume.display()))?;
    let file_name = resume
        .file_name()
        .map_or_else(|| "resume".to_string(), |n| n.to_string_lossy().into_owned());

    let submission = DashboardSubmission {
        role: role_name.clone(),
        domain: domain.clone(),
        file_name,
        file_bytes,
    };
    if let Err(e) = flow.submit_dashboard(&client, submission).await {
        ui::print_error("Failed to upload resume. Please try again.");
        return Err(e.into());
    }
    ui::print_upload_success();

    // ── Quiz round ──────────────────────────────────────────────────────
    ui::print_quiz_loading();
    let (quiz_domain, resume_text) = {
        let context = flow.context()?;
        (context.domain.clone(), context.resume_text.clone())
    };
    let round = match quiz::load(&client, &quiz_domain, &resume_text).await {
        Ok(round) => round,
        Err(e) => {
            ui::print_error("Failed to generate quiz. Please try again.");
            return Err(e.into());
        }
    };
    let score = quiz::run_console(round).await?;
    flow.complete_quiz(score)?;
    tracing::info!(score, "quiz round complete");

    // ── Interview ───────────────────────────────────────────────────────
    ui::print_interview_header(config.interview.duration_secs);
    let (commands_tx, commands_rx) = mpsc::channel(8);
    let (_proctor_tx, proctor_rx) = mpsc::channel(8);

    let end_tx = commands_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = end_tx.send(RoomCommand::End).await;
        }
    });

    let room = InterviewRoom::new(
        config.clone(),
        Arc::clone(&client),
        Arc::new(ConsoleSpeechInput::new()),
        Arc::new(ConsoleSpeechOutput::new()),
        Arc::new(HeadlessCapture),
        Arc::new(NullScanner),
        flow.session_id().to_string(),
        role_name.clone(),
    );
    let outcome = room.run(commands_rx, proctor_rx).await?;
    flow.complete_interview(outcome.report)?;

    if let Some(report) = flow.report() {
        ui::print_report(&role_name, report);
    }
    Ok(())
}

fn pick_role() -> Result<String> {
    let names: Vec<&str> = ROLE_CATALOG.iter().map(|(_, name)| *name).collect();
    let picked = Select::new()
        .with_prompt("Role Applying For")
        .items(&names)
        .default(0)
        .interact()
        .context("role selection failed")?;
    Ok(names[picked].to_string())
}

async fn fetch_report(
    mut config: Config,
    session_id: &str,
    backend: Option<String>,
) -> Result<()> {
    if let Some(origin) = backend {
        config.backend.origin = origin;
    }
    let client = BackendClient::new(&config.backend);

    ui::print_generating_report();
    let parsed = match client.fetch_report(session_id).await {
        Ok(raw) => report::parse_report(&raw),
        Err(e) => {
            tracing::error!("report fetch failed: {e}");
            report::fallback_report(&e.to_string())
        }
    };
    ui::print_report("Candidate", &parsed);
    Ok(())
}
