//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `stepwise_core` linkage and print the default configuration.
//! - Resolve story names given as arguments to story paths.
//!
//! # Environment
//! - `STEPWISE_LOG_DIR` (`--log-dir`): absolute directory; enables file logging when set.
//! - `STEPWISE_LOG_LEVEL` (`--log-level`): log level, defaults to the build-mode level.

mod cli;

use clap::Parser;
use cli::Cli;
use log::info;
use std::process::ExitCode;
use stepwise_core::Configuration;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| stepwise_core::default_log_level().to_string());
        if let Err(err) = stepwise_core::init_logging(&level, log_dir) {
            eprintln!("stepwise: {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("stepwise_core ping={}", stepwise_core::ping());
    println!("stepwise_core version={}", stepwise_core::core_version());

    let configuration = Configuration::new();
    print_summary(&configuration);

    let resolver = configuration.story_path_resolver();
    for name in &cli.stories {
        println!("story {name} -> {}", resolver.resolve(name));
    }
    info!("event=cli_run module=cli status=ok stories={}", cli.stories.len());
    ExitCode::SUCCESS
}

fn print_summary(configuration: &Configuration) {
    let builder = configuration.story_reporter_builder();
    println!("keywords locale={}", configuration.keywords().locale());
    println!("story loader={:?}", configuration.story_loader());
    println!("path resolver={:?}", configuration.story_path_resolver());
    println!("failure strategy={:?}", configuration.failure_strategy());
    println!("pending step strategy={:?}", configuration.pending_step_strategy());
    println!(
        "reporter output_dir={} formats={:?}",
        builder.output_directory().display(),
        builder.formats()
    );
    println!("dry run={}", configuration.dry_run());
    println!("converters={}", configuration.parameter_converters().type_names().join(","));
}
