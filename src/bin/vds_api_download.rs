use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use tracing::{debug, error, info};

use vds_api_download::config::{IniStore, Overrides, Settings};
use vds_api_download::diag;
use vds_api_download::error::VdsError;
use vds_api_download::fetch::Fetcher;
use vds_api_download::logging::{self, LogLevel};
use vds_api_download::runinfo;
use vds_api_download::vds::VdsHttpClient;
use vds_api_download::window::{DAILY_STEP_SECS, RunWindow};

const LOG_FILE: &str = "vds_api_download.log";
const DIAG_FILE: &str = "vds_api_download.xml";

#[derive(Parser)]
#[command(name = "vds_api_download")]
#[command(about = "Download VanderSat soil-moisture products for a Delft-FEWS run")]
#[command(version, author)]
struct Cli {
    #[arg(short = 'i', default_value = "vds_api_download.ini")]
    inifile: Utf8PathBuf,

    #[arg(short = 'R')]
    runinfofile: Option<Utf8PathBuf>,

    #[arg(short = 'u')]
    user: Option<String>,

    #[arg(short = 'p')]
    passwd: Option<String>,

    #[arg(short = 'o')]
    outputdir: Option<Utf8PathBuf>,

    #[arg(short = 'l', value_enum, default_value = "INFO")]
    loglevel: LogLevel,

    #[arg(short = 'd')]
    disable_cert_check: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(vds) = report.downcast_ref::<VdsError>() {
            return ExitCode::from(map_exit_code(vds));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &VdsError) -> u8 {
    match error {
        VdsError::LoggerInit(_) => 2,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    let cli = Cli::parse();

    logging::init(Utf8Path::new(LOG_FILE), cli.loglevel)?;
    debug!("File logging to {LOG_FILE}");

    let mut store = match IniStore::load(&cli.inifile) {
        Ok(store) => store,
        Err(err) => {
            error!("Cannot open ini file: {}", cli.inifile);
            return Err(err.into());
        }
    };
    let overrides = Overrides {
        user: cli.user,
        passwd: cli.passwd,
        output_dir: cli.outputdir,
        runinfo_file: cli.runinfofile,
    };
    let settings = Settings::load(&mut store, overrides)?;

    let window = match resolve_window(&settings) {
        Ok(window) => window,
        Err(err) => {
            error!("Error in input dates");
            return Err(err.into());
        }
    };
    let dates = window.date_range(DAILY_STEP_SECS);

    let Settings {
        bbox,
        server,
        file_format,
        credentials,
        products,
        output_dir,
        ..
    } = settings;

    let client = VdsHttpClient::new(&server, credentials, !cli.disable_cert_check)?;
    let fetcher = Fetcher::new(client, products, bbox, file_format, output_dir);
    let summary = fetcher.run(&dates)?;
    info!(
        "Finished: {} written, {} skipped, {} failed",
        summary.written, summary.skipped, summary.failed
    );

    diag::log_to_diag(Utf8Path::new(LOG_FILE), Utf8Path::new(DIAG_FILE))?;
    Ok(())
}

fn resolve_window(settings: &Settings) -> Result<RunWindow, VdsError> {
    match &settings.runinfo_file {
        Some(path) => runinfo::read_window(path),
        None => RunWindow::from_date(&settings.date),
    }
}
