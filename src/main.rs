//! html-report: Gauge HTML report plugin

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use html_report::config::{PluginAction, Settings};
use html_report::generator::create_report;
use html_report::proto::ProtoSuiteResult;
use html_report::regenerate::regenerate;
use html_report::shortcut::create_shortcut;
use html_report::{listener, logger, theme, RenderContext};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Generates HTML reports from Gauge execution results.
///
/// Run by the Gauge runner during execution, or by hand to regenerate a
/// report from a saved result.
#[derive(Parser, Debug)]
#[command(name = "html-report")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Saved execution result to regenerate the report from
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Directory to write the regenerated report to
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Theme directory (default: the bundled theme)
    #[arg(long, short)]
    theme: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    logger::init();
    let settings = Settings::from_env();

    if let Some(input) = &args.input {
        let Some(output) = &args.output else {
            bail!("--output is required with --input");
        };
        return run_regenerate(&args, &settings, input, output);
    }

    match settings.action {
        Some(PluginAction::Execution) => run_execution(&settings),
        Some(PluginAction::Setup) => Ok(ExitCode::SUCCESS),
        None => {
            eprintln!(
                "{}: nothing to do. Run with --input <file> --output <dir> to regenerate a report.",
                "Usage".yellow()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_regenerate(args: &Args, settings: &Settings, input: &Path, output: &Path) -> Result<ExitCode> {
    let plugins_dir = theme::plugin_dir_from_exe().unwrap_or_else(|| PathBuf::from("."));
    let theme_path = theme::resolve_theme_path(
        args.theme.as_deref(),
        settings.theme_path.as_deref(),
        &plugins_dir,
    );
    regenerate(input, output, &theme_path, &settings.project_root())
        .with_context(|| format!("Failed to regenerate report from {}", input.display()))?;
    Ok(ExitCode::SUCCESS)
}

fn run_execution(settings: &Settings) -> Result<ExitCode> {
    let Some(port) = settings.plugin_connection_port else {
        bail!("plugin_connection_port is not set");
    };
    // the runner starts the plugin from its install directory
    let plugins_dir = std::env::current_dir().context("Failed to read current directory")?;
    let theme_path = theme::resolve_theme_path(None, settings.theme_path.as_deref(), &plugins_dir);
    let ctx = settings.render_context(&theme_path);

    listener::listen(port, settings.max_message_bytes(), |psr| {
        on_suite_result(psr, settings, &ctx, &plugins_dir)
    })
    .with_context(|| format!("Listener on port {port} failed"))?;
    Ok(ExitCode::SUCCESS)
}

fn on_suite_result(
    psr: &ProtoSuiteResult,
    settings: &Settings,
    ctx: &RenderContext,
    plugins_dir: &Path,
) -> Result<(), html_report::ReportError> {
    let report_dir = ctx.report_dir(&settings.reports_root(), Local::now());
    let dir = create_report(psr, &report_dir, ctx)?;

    if settings.save_execution_result {
        match executable_path(plugins_dir) {
            Some(exe) => {
                if let Err(e) = create_shortcut(&exe, &dir) {
                    tracing::warn!("Unable to create regeneration shortcut: {}", e);
                }
            }
            None => tracing::warn!("Unable to locate the html-report executable"),
        }
    }
    Ok(())
}

/// `<plugins_dir>/bin/<name of this executable>`
fn executable_path(plugins_dir: &Path) -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(plugins_dir.join("bin").join(exe.file_name()?))
}
