//! Clap argument types and option resolution.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use genpass::config::Config;
use genpass::constants::DEFAULT_TEMPLATE;
use genpass::pipeline::GenerateOptions;
use genpass::render::Destination;

/// Generate a `key=value` secrets file from a template.
#[derive(Parser, Debug)]
#[command(name = "genpass", version = genpass::constants::VERSION)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Generate secrets for every line of a template.
    Generate(GenerateArgs),

    /// Parse a template and list its records without generating anything.
    Check(CheckArgs),

    /// Print version and build information.
    Version,
}

/// Arguments for the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Template file of `key=length:kind` lines.
    #[arg(short = 'i', long = "input", default_value = DEFAULT_TEMPLATE)]
    pub input: PathBuf,

    /// Output file (default: stdout; `-` also means stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Dictionary used for `word` records (default: /usr/share/dict/words).
    #[arg(long)]
    pub words: Option<PathBuf>,

    /// Words never to use in passphrases.
    #[arg(long)]
    pub bad_words: Option<PathBuf>,

    /// Separator between passphrase words (default: "-").
    #[arg(long)]
    pub separator: Option<String>,

    /// Copy template comments and blank lines into the output.
    #[arg(long, default_value_t = false)]
    pub keep_comments: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Template file of `key=length:kind` lines.
    #[arg(short = 'i', long = "input", default_value = DEFAULT_TEMPLATE)]
    pub input: PathBuf,

    /// Report format.
    #[arg(long, default_value = "text")]
    pub format: CheckFormat,
}

/// Output formats for `check`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CheckFormat {
    Text,
    Json,
}

impl GenerateArgs {
    /// Combine CLI flags with the loaded config. Flags win.
    pub fn resolve(self, config: Config) -> GenerateOptions {
        GenerateOptions {
            template: self.input,
            output: Destination::from_arg(self.output.as_deref()),
            words: self.words.unwrap_or(config.words.path),
            bad_words: self.bad_words.or(config.words.bad_words),
            separator: self.separator.unwrap_or(config.words.separator),
            keep_comments: self.keep_comments || config.output.keep_comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("genpass").chain(args.iter().copied())).unwrap()
    }

    fn generate_args(args: &[&str]) -> GenerateArgs {
        match parse(args).command {
            Command::Generate(a) => a,
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn generate_defaults() {
        let args = generate_args(&["generate"]);
        assert_eq!(args.input, PathBuf::from("passwords.ini.in"));
        assert!(args.output.is_none());
        assert!(!args.keep_comments);
    }

    #[test]
    fn config_fills_unset_flags() {
        let mut config = Config::default();
        config.words.bad_words = Some(PathBuf::from("/cfg/bad"));
        config.words.separator = " ".to_string();

        let opts = generate_args(&["generate", "-i", "t.in", "-o", "out.ini"]).resolve(config);
        assert_eq!(opts.template, PathBuf::from("t.in"));
        assert_eq!(opts.output, Destination::File(PathBuf::from("out.ini")));
        assert_eq!(opts.words, PathBuf::from("/usr/share/dict/words"));
        assert_eq!(opts.bad_words, Some(PathBuf::from("/cfg/bad")));
        assert_eq!(opts.separator, " ");
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.words.path = PathBuf::from("/cfg/words");

        let opts = generate_args(&[
            "generate",
            "--words",
            "/cli/words",
            "--bad-words",
            "/cli/bad",
            "--separator",
            ".",
            "--keep-comments",
        ])
        .resolve(config);
        assert_eq!(opts.words, PathBuf::from("/cli/words"));
        assert_eq!(opts.bad_words, Some(PathBuf::from("/cli/bad")));
        assert_eq!(opts.separator, ".");
        assert!(opts.keep_comments);
        assert_eq!(opts.output, Destination::Stdout);
    }

    #[test]
    fn verbose_is_counted_globally() {
        let cli = parse(&["check", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn check_accepts_json_format() {
        match parse(&["check", "--format", "json"]).command {
            Command::Check(args) => assert_eq!(args.format, CheckFormat::Json),
            other => panic!("expected check, got {other:?}"),
        }
    }
}
