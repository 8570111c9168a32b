use anyhow::Context;
use checkpoint_log::LogConfig;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Copy stdin into a new diagnostic log and print what was captured
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase verbosity; -vv enables the diagnostic log file
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory for the log file
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("checkpoint_log={}", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = LogConfig::new(i32::from(args.verbose)).with_dir(&args.dir);
    let log = config.open().context("diagnostic log unavailable")?;

    let stdin = std::io::stdin();
    let Some(log) = log else {
        // Logging disabled: pass input straight through.
        let mut stdout = std::io::stdout();
        for line in stdin.lock().lines() {
            writeln!(stdout, "{}", line?)?;
        }
        return Ok(());
    };

    log.append(&format!(
        "capture started {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    log.mark_position();

    for line in stdin.lock().lines() {
        log.append(&format!("{}\n", line?));
    }

    print!("{}", log.read_since_checkpoint());
    log.close().context("failed to close diagnostic log")?;
    Ok(())
}
