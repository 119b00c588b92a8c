extern crate barovia as lib;

use flexi_logger::{FileSpec, Logger};
use lib::command::{self, Outcome};
use lib::render;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "bc",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Barovian Calendar - track a campaign on the 28-day calendar."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        long = "campaign",
        help = "campaign file to load instead of the configured one",
        parse(from_os_str)
    )]
    pub campaign: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the current month non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let mut config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    if let Some(campaign) = args.campaign {
        config.campaign = Some(campaign);
    }

    let mut session = config.session()?;
    log::info!(
        "Opened '{}' on {}",
        session.campaign().name,
        session.current_date()
    );

    println!("{}", render::render(&session));
    if args.show {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        print!("> ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match command::run_command(&mut session, &line) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Message(text)) => println!("{}", text),
            Ok(Outcome::Continue) => println!("\n{}", render::render(&session)),
            Err(e) => {
                log::debug!("Command '{}' failed: {}", line.trim(), e);
                println!("error: {}", e);
            }
        }
    }

    Ok(())
}
