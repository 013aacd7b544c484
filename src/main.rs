// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fatesheet CLI entrypoint.
//!
//! Opens the desk on a sheet folder (restoring the last saved layout) and runs the TUI.

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use log::{info, warn};

use fatesheet::config::Config;
use fatesheet::demo::populate_demo;
use fatesheet::logging::init_logging;
use fatesheet::scheduler::Scheduler;
use fatesheet::store::{SheetFolder, WriteDurability};
use fatesheet::workspace::Workspace;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<sheet-dir>] [--durable-writes] [--log-dir <dir>] [--log-level <level>]\n  {program} --demo [--log-dir <dir>] [--log-level <level>]\n\nIf sheet-dir is omitted, `saved` under the current working directory is used.\n--demo opens a built-in desk backed by a temporary folder and cannot be combined with sheet-dir.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n--log-dir defaults to <sheet-dir>/logs; --log-level is one of trace|debug|info|warn|error.\n\nEnvironment: FATESHEET_FAST_TICK_MS, FATESHEET_SLOW_TICK_MS, FATESHEET_LOG_LEVEL,\nFATESHEET_LOG_DIR, FATESHEET_TUI_PALETTE."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    sheet_dir: Option<String>,
    durable_writes: bool,
    log_dir: Option<String>,
    log_level: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            "--log-dir" => {
                if options.log_dir.is_some() {
                    return Err(());
                }
                options.log_dir = Some(args.next().ok_or(())?);
            }
            "--log-level" => {
                if options.log_level.is_some() {
                    return Err(());
                }
                options.log_level = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.sheet_dir.is_some() {
                    return Err(());
                }
                options.sheet_dir = Some(arg);
            }
        }
    }

    if options.demo && options.sheet_dir.is_some() {
        return Err(());
    }

    Ok(options)
}

/// Layers command-line flags over the environment-derived config.
fn apply_options(mut config: Config, options: CliOptions) -> Config {
    config.demo = options.demo;
    if let Some(dir) = options.sheet_dir {
        config.sheet_dir = PathBuf::from(dir);
    }
    if options.durable_writes {
        config.durability = WriteDurability::Durable;
    }
    if let Some(dir) = options.log_dir {
        config.log_dir = Some(PathBuf::from(dir));
    }
    if let Some(level) = options.log_level {
        config.log_level = level;
    }
    config
}

fn demo_dir() -> PathBuf {
    let now_millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("fatesheet-demo-{}-{now_millis}", std::process::id()))
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "fatesheet".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let mut config = apply_options(Config::from_env()?, options);
        if config.demo {
            config.sheet_dir = demo_dir();
        }

        // The desk still works without a log file.
        if let Err(err) = init_logging(&config.log_level, &config.effective_log_dir()) {
            eprintln!("fatesheet: logging disabled: {err}");
        }

        let scheduler = Scheduler::new(config.fast_interval, config.slow_interval, Instant::now());
        let folder = SheetFolder::new(config.sheet_dir.clone()).with_durability(config.durability);
        let mut desk = Workspace::new(scheduler).with_folder(folder);

        if config.demo {
            let opened = populate_demo(&mut desk);
            info!("demo desk opened {opened} sheets in {}", config.sheet_dir.display());
        } else {
            match desk.restore_layout() {
                Ok(report) => info!(
                    "restored {} sheets from {} ({} unresolved)",
                    report.opened.len(),
                    config.sheet_dir.display(),
                    report.unresolved.len()
                ),
                Err(err) => warn!("cannot restore desk layout: {err}"),
            }
        }

        fatesheet::tui::run(desk)
    })();

    if let Err(err) = result {
        eprintln!("fatesheet: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use fatesheet::config::Config;
    use fatesheet::store::WriteDurability;

    use super::{apply_options, parse_options, CliOptions};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn parses_empty_args() {
        let options = parse(&[]).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse(&["--demo"]).expect("parse options");
        assert!(options.demo);
        assert!(options.sheet_dir.is_none());
    }

    #[test]
    fn parses_positional_sheet_dir_and_log_flags() {
        let options = parse(&["campaign", "--log-level", "debug", "--log-dir", "/tmp/logs"])
            .expect("parse options");
        assert_eq!(options.sheet_dir.as_deref(), Some("campaign"));
        assert_eq!(options.log_level.as_deref(), Some("debug"));
        assert_eq!(options.log_dir.as_deref(), Some("/tmp/logs"));
    }

    #[test]
    fn rejects_demo_with_sheet_dir() {
        parse(&["--demo", "campaign"]).unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse(&["--nope"]).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags_and_dirs() {
        parse(&["--demo", "--demo"]).unwrap_err();
        parse(&["--durable-writes", "--durable-writes"]).unwrap_err();
        parse(&["--log-level", "info", "--log-level", "warn"]).unwrap_err();
        parse(&["one", "two"]).unwrap_err();
    }

    #[test]
    fn rejects_missing_flag_values() {
        parse(&["--log-dir"]).unwrap_err();
        parse(&["--log-level"]).unwrap_err();
    }

    #[test]
    fn flags_override_environment_config() {
        let options = parse(&["campaign", "--durable-writes", "--log-level", "warn"]).expect("parse");
        let config = apply_options(Config::default(), options);
        assert_eq!(config.sheet_dir, PathBuf::from("campaign"));
        assert_eq!(config.durability, WriteDurability::Durable);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.effective_log_dir(), PathBuf::from("campaign").join("logs"));
    }
}
