use std::path::PathBuf;

use bsl_ssl_types::analysis::{
    AnalysisConfig,
    InferredCall,
    TypeInference,
};
use bsl_ssl_types::grammar::parse_module;
use bsl_ssl_types::host::{
    FixtureError,
    MemoryHost,
};
use bsl_ssl_types::types::RuntimeVersion;
use clap::Parser;
use tracing::{
    info,
    warn,
    Level,
};
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// BSL module to analyze
    #[arg(short, long)]
    source: PathBuf,

    /// JSON description of metadata objects, managers and pinned variables
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Module name; unqualified calls are attributed to it
    #[arg(short, long)]
    module_name: Option<String>,

    /// Overrides the fixture's runtime version
    #[arg(short, long)]
    runtime_version: Option<RuntimeVersion>,

    /// Write logs to this directory instead of stderr
    #[arg(long, env = "BSL_TYPES_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Unable to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error("Unable to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

fn init_logging(args: &Args) -> Option<WorkerGuard> {
    match &args.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, "bsl-ssl-types.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_max_level(args.log_level)
                .with_writer(non_blocking)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(args.log_level)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

fn print_calls(source: &str, calls: &[InferredCall]) {
    for call in calls {
        let types = call
            .types
            .iter()
            .map(|ty| ty.to_string())
            .collect::<Vec<String>>()
            .join(" | ");
        let line = source
            .get(..call.start)
            .map_or(0, |before| before.matches('\n').count())
            + 1;
        println!("{line}: {}..{} {}: {types}", call.start, call.end, call.callee);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let source = std::fs::read_to_string(&args.source).map_err(|source| CliError::Read {
        path: args.source.display().to_string(),
        source,
    })?;

    let mut host = match &args.fixture {
        Some(path) => MemoryHost::from_fixture(path)?,
        None => MemoryHost::new(),
    };
    if let Some(version) = args.runtime_version {
        host = host.with_version(version);
    }

    let module_name = args.module_name.clone().unwrap_or_else(|| {
        args.source
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    });
    let uri = args.source.display().to_string();

    let response = parse_module(&source, &module_name, &uri);
    for error in response.errors.iter() {
        warn!("{uri} {:?}: {}", error.span, error.message);
    }

    let config = AnalysisConfig {
        runtime_version: host.version(),
        ..AnalysisConfig::default()
    };
    let inference = TypeInference::new(&host, config);
    let calls = inference.infer_module(&response.module);
    info!("Inferred {} calls in {module_name}", calls.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&calls)?);
    } else {
        print_calls(&source, &calls);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    let _guard = init_logging(&args);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
