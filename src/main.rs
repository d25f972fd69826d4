#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use anyhow::Context as _;
use opshell::app::config::ShellConfig;
use opshell::{log_error, log_info, log_warn, trace_info};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

const DEFAULT_LOG_FILTER: &str = "opshell=info,eframe=info,egui=warn,wgpu=warn,winit=warn";

fn log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "", "opshell").map(|dirs| dirs.data_dir().join("logs"))
}

fn init_logging() -> anyhow::Result<PathBuf> {
    let log_dir = log_dir().context("no home directory for log files")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {:?}", log_dir))?;
    let log_path = log_dir.join("opshell.log");

    let file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {:?}", log_path))?;

    // RUST_LOG wins over the built-in filter
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::builder().parse(DEFAULT_LOG_FILTER))
        .context("parsing log filter")?;

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false),
    );
    tracing::subscriber::set_global_default(subscriber)
        .context("installing tracing subscriber")?;

    // Bridge log crate events (eframe, egui, winit) into tracing
    tracing_log::LogTracer::init().context("installing log-to-tracing bridge")?;

    Ok(log_path)
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let crash_msg = format!(
            "Operation Shell crashed!\n\
             Panic occurred at: {}\n\
             Details: {}\n\
             Backtrace:\n{:?}\n",
            panic_info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown location".to_string()),
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
                .unwrap_or("unknown panic"),
            std::backtrace::Backtrace::force_capture()
        );

        if let Some(log_dir) = log_dir() {
            let _ = std::fs::create_dir_all(&log_dir);
            let crash_log_path = log_dir.join("crash.log");

            if let Ok(mut file) = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&crash_log_path)
            {
                use std::io::Write;
                let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "\n=== CRASH at {} ===\n{}", timestamp, crash_msg);
            }
            eprintln!("\n{}", crash_msg);
            eprintln!("Crash log written to: {:?}", crash_log_path);
        } else {
            eprintln!("\n{}", crash_msg);
        }
    }));
}

fn main() -> anyhow::Result<()> {
    // Before anything else so early crashes are recorded
    setup_panic_handler();

    match init_logging() {
        Ok(path) => {
            log_info!("Logging initialized to: {:?}", path);
        }
        Err(e) => eprintln!("File logging disabled: {:#}", e),
    }

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(ShellConfig::default_path);
    let config = ShellConfig::load_or_default(config_path.as_deref());
    if config.targets.is_empty() {
        log_warn!("Configuration lists no targets");
    }
    trace_info!(
        "Starting '{}' with {} targets",
        config.window_title,
        config.targets.len()
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&config.window_title)
            .with_inner_size(egui::Vec2::from(config.nominal_size))
            .with_resizable(false),
        ..Default::default()
    };

    let title = config.window_title.clone();
    let result = eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(opshell::ShellApp::new(cc, &config)))),
    );

    if let Err(e) = &result {
        log_error!("Window system failed: {}", e);
    }
    result.map_err(|e| anyhow::anyhow!("running the shell window: {}", e))
}
