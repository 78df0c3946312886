use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "yamlconv", about = "Convert a YAML document (file or URL) to JSON")]
struct Cli {
    /// YAML file path or http(s) URL to load.
    location: String,

    /// Write to the file instead of to stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Timeout in seconds for remote documents.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Emit debug logs on stderr.
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = yamlconv::Config::with_overrides(&yamlconv::Overrides {
        http_timeout_secs: cli.timeout,
        pretty: cli.pretty.then_some(true),
    })?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let json = runtime.block_on(yamlconv::yaml_doc(&cli.location, &config))?;

    yamlconv::write_output(cli.output.as_deref(), &json)?;
    Ok(())
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}
