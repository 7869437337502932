use bloomscroll::app::BloomApp;
use bloomscroll::cli::Args;
use bloomscroll::config;
use bloomscroll::core::preloader::{PreloadPolicy, Preloader};
use bloomscroll::entities::frameset::FrameSet;
use bloomscroll::entities::notes::NoteJournal;
use bloomscroll::entities::thought::{builtin_archive, load_archive};

use clap::Parser;
use eframe::egui;
use log::{debug, info, warn};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());

    // Ensure directories exist
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // Initialize logger based on --log flag
    if let Some(log_path_opt) = &args.log_file {
        // File logging with specified verbosity level
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| config::data_file("bloomscroll.log", &path_config));

        let file = std::fs::File::create(&log_path)?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!(
            "Logging to file: {} (level: {:?})",
            log_path.display(),
            log_level
        );
    } else {
        // Console logging with specified verbosity level (respects RUST_LOG if set)
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .init();
    }

    info!("Bloomscroll starting...");
    debug!("Command-line args: {:?}", args);

    // Log application paths
    info!(
        "Config path: {}",
        config::config_file("bloomscroll.json", &path_config).display()
    );

    // Frame folder: positional argument or ./frames
    let frames_dir = args
        .frames_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("frames"));
    info!("Frame folder: {}", frames_dir.display());
    let frame_set = FrameSet::new(frames_dir, args.frame_count, args.ext.clone());
    if !frame_set.is_playable() {
        warn!("Frame count is 0; the player will stay inert");
    }

    // Archive: custom JSON file or the built-in three categories. A broken
    // custom archive degrades to the built-in one rather than aborting.
    let archive = match &args.archive {
        Some(path) => match load_archive(path) {
            Ok(archive) if !archive.is_empty() => {
                info!("Loaded archive: {} ({} thoughts)", path.display(), archive.len());
                archive
            }
            Ok(_) => {
                warn!("Archive {} is empty, using built-in", path.display());
                builtin_archive(&frame_set)
            }
            Err(err) => {
                warn!("{err:#}; using built-in archive");
                builtin_archive(&frame_set)
            }
        },
        None => builtin_archive(&frame_set),
    };

    let journal = NoteJournal::open(config::data_file("bloomscroll_notes.json", &path_config))?;
    info!(
        "Note journal: {} ({} notes)",
        journal.path().display(),
        journal.len()
    );

    let mut policy = PreloadPolicy::default();
    if args.max_concurrent > 0 {
        policy.max_concurrent = args.max_concurrent;
    }
    policy.retry_count = args.retry_count;
    let preloader = Preloader::new(policy);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "Bloomscroll v{} • scroll to explore",
                env!("CARGO_PKG_VERSION")
            ))
            .with_inner_size(egui::vec2(1280.0, 720.0))
            .with_resizable(true),
        persist_window: true,
        #[cfg(not(target_arch = "wasm32"))]
        persistence_path: Some(config::config_file("bloomscroll.json", &path_config)),
        ..Default::default()
    };

    let span_multiplier = args.span_multiplier;
    let fullscreen = args.fullscreen;

    // Run the app
    eframe::run_native(
        "Bloomscroll",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(BloomApp::new(
                cc,
                archive,
                preloader,
                journal,
                path_config,
                span_multiplier,
                fullscreen,
            )))
        }),
    )?;

    info!("Application exiting");
    Ok(())
}
