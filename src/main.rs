//! cv-generator CLI
//!
//! Usage:
//!   cv-generator [OPTIONS] <INPUT>
//!
//! Options:
//!   -o, --output <PATH>       Output .tex path ("-" for stdout)
//!   -t, --theme <NAME>        Accent theme
//!   -f, --format <FORMAT>     Input dialect (json or text)
//!   -c, --config <FILE>       Configuration file (TOML format)
//!       --export-json <PATH>  Also write the parsed record as JSON
//!       --lint                Print lint warnings
//!       --themes              List available themes
//!   -v, --verbose             Debug logging
//!   -h, --help                Print help

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cv_generator::{
    render_full, GeneratorConfig, InputFormat, RenderConfig, RenderError, Theme,
};

#[derive(Parser)]
#[command(name = "cv-generator")]
#[command(about = "Generate Awesome-CV LaTeX source from a JSON or text résumé")]
struct Cli {
    /// Résumé file (.json selects JSON, anything else the text dialect)
    #[arg(required_unless_present = "themes")]
    input: Option<PathBuf>,

    /// Output .tex path, "-" for stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Accent theme (see --themes)
    #[arg(short, long)]
    theme: Option<String>,

    /// Input dialect, overriding the file extension
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write the parsed record as JSON
    #[arg(long, value_name = "PATH")]
    export_json: Option<PathBuf>,

    /// Print lint warnings for the parsed record
    #[arg(long)]
    lint: bool,

    /// List available themes and exit
    #[arg(long)]
    themes: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Text,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => InputFormat::Json,
            FormatArg::Text => InputFormat::Text,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.themes {
        print_themes();
        return;
    }

    let Some(input) = &cli.input else {
        eprintln!("Error: no input file given");
        std::process::exit(1);
    };

    // Load config
    let config = match &cli.config {
        Some(path) => match GeneratorConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GeneratorConfig::default(),
    };

    // Theme is validated before anything is read or written
    let theme = match &cli.theme {
        Some(name) => match name.parse::<Theme>() {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => config.theme.unwrap_or_default(),
    };

    let source = match fs::read_to_string(input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input.display(), e);
            std::process::exit(1);
        }
    };

    let format = cli
        .format
        .map(InputFormat::from)
        .unwrap_or_else(|| InputFormat::from_path(input));
    debug!(?format, %theme, "reading {}", input.display());

    let render_config = RenderConfig::new()
        .with_format(format)
        .with_theme(theme)
        .with_latex(config.latex_config())
        .with_lint(cli.lint);
    let rendered = match render_full(&source, render_config) {
        Ok(r) => r,
        Err(RenderError::Parse(e)) => {
            let filename = input.display().to_string();
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for warning in &rendered.warnings {
        eprintln!("warning: {}", warning);
    }

    if let Some(path) = &cli.export_json {
        let json = match rendered.record.to_json() {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error encoding JSON: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = write_file(path, &json) {
            eprintln!("Error writing '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let tex = rendered.latex;
    let output = cli.output.unwrap_or_else(|| config.output_path());
    if output.as_os_str() == "-" {
        if let Err(e) = io::stdout().write_all(tex.as_bytes()) {
            eprintln!("Error writing to stdout: {}", e);
            std::process::exit(1);
        }
        return;
    }
    match write_file(&output, &tex) {
        Ok(()) => eprintln!("Wrote {}", output.display()),
        Err(e) => {
            eprintln!("Error writing '{}': {}", output.display(), e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), verbose);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// `RUST_LOG` sets the base filter; `--verbose` raises this crate to debug
/// on top of it.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let crate_name = env!("CARGO_CRATE_NAME");
    let mut filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(format!("{}=warn", crate_name)));
    if verbose {
        if let Ok(directive) = format!("{}=debug", crate_name).parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Write a file, creating missing parent directories
fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

fn print_themes() {
    for theme in Theme::ALL {
        let marker = if theme == Theme::default() {
            " (default)"
        } else {
            ""
        };
        println!("{:<10} {}{}", theme.name(), theme.hex(), marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_applies_with_rust_log_set() {
        let crate_debug = format!("{}=debug", env!("CARGO_CRATE_NAME"));
        let filter = log_filter(Some("info"), true).to_string();
        assert!(filter.contains(&crate_debug), "{}", filter);
        assert!(filter.contains("info"), "{}", filter);

        let filter = log_filter(Some("info"), false).to_string();
        assert!(!filter.contains(&crate_debug), "{}", filter);
    }

    #[test]
    fn test_default_filter_is_quiet() {
        let crate_warn = format!("{}=warn", env!("CARGO_CRATE_NAME"));
        assert!(log_filter(None, false).to_string().contains(&crate_warn));
        assert!(log_filter(None, true)
            .to_string()
            .contains(&format!("{}=debug", env!("CARGO_CRATE_NAME"))));
    }
}
