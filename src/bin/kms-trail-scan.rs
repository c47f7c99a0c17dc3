use clap::Parser as ClapParser;
use kms_trail_alert::{decode_log_file, AlertCheck, Config};
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit status when at least one record raised an alert
const ALERT_STATUS: u8 = 2;

/// Scans a local CloudTrail log file for restricted KMS key usage
#[derive(Debug, clap::Parser)]
struct Opts {
    /// The YAML configuration file (allowed-principals, restricted-key-arns, topic-arn)
    pub config: PathBuf,

    /// The gzipped CloudTrail log file(s)
    #[arg(required = true)]
    pub log_files: Vec<PathBuf>,

    /// Print the predicate breakdown of every record instead of the matches
    #[arg(long)]
    pub explain: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let opts = Opts::parse();
    match run(&opts, &mut io::stdout().lock()) {
        Ok(alerts) => ExitCode::from(exit_status(alerts)),
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn exit_status(alerts: usize) -> u8 {
    if alerts == 0 {
        0
    } else {
        ALERT_STATUS
    }
}

/// Returns the number of records that raised an alert.
fn run<W: Write>(opts: &Opts, out: &mut W) -> Result<usize, Box<dyn std::error::Error>> {
    let cfg = Config::from_yaml_str(&fs::read_to_string(&opts.config)?)?;

    let mut alerts = 0;
    for path in opts.log_files.iter() {
        let records = decode_log_file(&fs::read(path)?)?;
        info!(path = %path.display(), records = records.len(), "Loaded log file");

        for record in records.iter() {
            let check = AlertCheck::evaluate(record, &cfg);
            if opts.explain {
                writeln!(
                    out,
                    "{} {} {:?} alert={}",
                    record.event_time,
                    record.event_name.as_str(),
                    check,
                    check.should_alert()
                )?;
            } else if check.should_alert() {
                writeln!(out, "{}", serde_json::to_string(record)?)?;
            }
            if check.should_alert() {
                alerts += 1;
            }
        }
    }

    Ok(alerts)
}
