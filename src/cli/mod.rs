pub mod daemon_path;
pub mod history;
pub mod log;
pub mod process;
pub mod render;
pub mod reset;
pub mod seed;
pub mod settings;
pub mod status;
pub mod summary;

use std::{env, path::PathBuf};

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use daemon_path::to_daemon_path;
use history::process_history_command;
use log::{process_log_command, LogCommand};
use process::{kill_previous_servers, restart_server};
use reset::process_reset_today_command;
use seed::process_seed_command;
use settings::{process_goal_command, process_settings_command, SettingsCommand};
use status::process_status_command;
use summary::{process_month_command, process_week_command};
use tracing::level_filters::LevelFilter;

use crate::{
    daemon::{
        notify::{default_notifier, Reminder},
        start_daemon,
    },
    utils::{
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Waterlog", version, long_about = None)]
#[command(about = "Terminal tracker for daily water intake", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Log a drink of water")]
    Log {
        #[command(flatten)]
        command: LogCommand,
    },
    #[command(about = "Display today's total, progress and achievements")]
    Status {},
    #[command(about = "Display the weekly summary")]
    Week {},
    #[command(about = "Display the monthly summary")]
    Month {},
    #[command(about = "Display daily intake for the trailing days")]
    History {
        #[arg(long, default_value_t = 7, help = "Number of trailing days to show")]
        days: u32,
    },
    #[command(about = "Update the daily goal")]
    Goal {
        #[arg(value_parser = clap::value_parser!(u32).range(1..), help = "New daily goal in the configured units")]
        value: u32,
    },
    #[command(about = "Display or change settings")]
    Settings {
        #[command(flatten)]
        command: SettingsCommand,
    },
    #[command(about = "Delete everything logged today")]
    ResetToday {
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    #[command(about = "Generate demo history for the previous days")]
    Seed {
        #[arg(long, default_value_t = 30, help = "How many previous days to fill, today excluded")]
        days: u32,
    },
    #[command(about = "Starts the reminder daemon for the application")]
    Init {},
    #[command(
        about = "Run the reminder daemon directly in current console. Used for creating a daemon internally and for debugging"
    )]
    Serve {
        #[arg(
            long,
            help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
        )]
        dir: Option<PathBuf>,
    },
    #[command(about = "Stop currently running reminder daemon.")]
    Stop {},
    #[command(about = "Deliver one reminder notification immediately")]
    TestNotify {},
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let app_dir = create_application_default_path()?;
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;

    match args.commands {
        Commands::Log { command } => process_log_command(&app_dir, command).await,
        Commands::Status {} => process_status_command(&app_dir).await,
        Commands::Week {} => process_week_command(&app_dir).await,
        Commands::Month {} => process_month_command(&app_dir).await,
        Commands::History { days } => process_history_command(&app_dir, days).await,
        Commands::Goal { value } => process_goal_command(&app_dir, value).await,
        Commands::Settings { command } => process_settings_command(&app_dir, command).await,
        Commands::ResetToday { yes } => process_reset_today_command(&app_dir, yes).await,
        Commands::Seed { days } => process_seed_command(&app_dir, days).await,
        Commands::Init {} => {
            restart_server()?;
            Ok(())
        }
        Commands::Stop {} => {
            let daemon_name = to_daemon_path(env::current_exe()?);
            kill_previous_servers(&daemon_name);
            Ok(())
        }
        Commands::Serve { dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => app_dir,
            };
            start_daemon(dir).await
        }
        Commands::TestNotify {} => {
            let notifier = default_notifier();
            notifier.deliver(&Reminder::hydration(Utc::now())).await?;
            println!("Delivered test reminder");
            Ok(())
        }
    }
}
