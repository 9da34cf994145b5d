// SPDX-License-Identifier: MPL-2.0
use lab_scheduler::app::{self, paths, App, Flags};
use lab_scheduler::dashboard::Role;
use std::process::ExitCode;
use tracing::error;

const HELP: &str = "\
lab-scheduler

USAGE:
  lab-scheduler [OPTIONS]

OPTIONS:
  --lang <LOCALE>        Interface language (e.g. en-US, fr)
  --role <ROLE>          Open the dashboard of admin, instructor or student
  --user <NAME>          Name shown in the dashboard greeting
  --config-dir <DIR>     Directory holding settings.toml
  --i18n-dir <DIR>       Directory with additional .ftl translations
  --log-level <LEVEL>    Log filter used when RUST_LOG is unset [default: info]
  -h, --help             Print help
";

struct Args {
    flags: Flags,
    log_level: String,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        i18n_dir: args.opt_value_from_str("--i18n-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        role: args.opt_value_from_str::<_, Role>("--role")?,
        user_name: args.opt_value_from_str("--user")?,
    };
    let log_level = args
        .opt_value_from_str("--log-level")?
        .unwrap_or_else(|| "info".to_string());

    let rest = args.finish();
    if !rest.is_empty() {
        eprintln!("warning: ignoring unexpected arguments: {rest:?}");
    }
    Ok(Some(Args { flags, log_level }))
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("lab_scheduler={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    init_logging(&args.log_level);
    paths::init_cli_overrides(args.flags.config_dir.clone());

    let app = match App::new(args.flags) {
        Ok(app) => app,
        Err(err) => {
            error!(error = %err, "failed to start");
            return ExitCode::FAILURE;
        }
    };

    match app::run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "application loop failed");
            ExitCode::FAILURE
        }
    }
}
