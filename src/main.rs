//! genpass — generate `key=value` secret files from a template.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use genpass::config::Config;
use genpass::constants;
use genpass::env::Env;
use genpass::logging;
use genpass::pipeline;
use genpass::render::Destination;
use genpass::template;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cli::args::{CheckArgs, CheckFormat, Cli, Command, GenerateArgs};

fn main() {
    if let Err(err) = run() {
        use colored::Colorize;
        eprintln!("{} {err:#}", "Error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = Env::real();
    logging::init(cli.verbose, &env);

    match cli.command {
        Command::Generate(args) => run_generate(args, &env),
        Command::Check(args) => run_check(args),
        Command::Version => run_version(),
    }
}

/// Print version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Generate secrets from a template and write them out.
fn run_generate(args: GenerateArgs, env: &Env) -> Result<()> {
    let cwd = std::env::current_dir().context("could not determine current directory")?;
    let config = Config::load(Some(cwd.as_path()), env)
        .context("failed to load configuration")?;
    let options = args.resolve(config);

    let outcome = pipeline::generate_file(&options).with_context(|| {
        format!("failed to generate secrets from {}", options.template.display())
    })?;

    if let Destination::File(path) = &options.output {
        info!(
            path = %path.display(),
            secrets = outcome.secrets,
            min_entropy_bits = outcome.min_entropy_bits,
            "output written"
        );
    }
    Ok(())
}

/// Validate a template without generating anything.
fn run_check(args: CheckArgs) -> Result<()> {
    let path = &args.input;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let template = template::parse_template(&content)
        .with_context(|| format!("invalid template {}", path.display()))?;

    match args.format {
        CheckFormat::Text => print!("{}", cli::format_check_text(path, &template)),
        CheckFormat::Json => {
            let report = cli::format_check_json(&template)
                .context("failed to serialize report")?;
            println!("{report}");
        }
    }
    Ok(())
}
