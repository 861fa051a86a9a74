//! Command-line interface for codeframe
//! This binary renders the highlighted excerpt of a PHP file around a line, the way it would
//! appear in an error report.
//!
//! Usage:
//!   codeframe `<path>` --line `<n>` [--column `<n>`] [--lines `<n>`] [--format `<format>`]
//!   codeframe `<path>` --line `<n>` --config `<file>` --editor-uri `<uri>`
//!
//! Set `RUST_LOG=codeframe=debug` to trace preprocessing and window placement on stderr.

use clap::{value_parser, Arg, Command};
use codeframe::highlight::config::{HighlightConfig, Loader};
use codeframe::highlight::{highlighter, lexing, CodeHighlighter};
use tracing_subscriber::EnvFilter;

const FORMATS: &[&str] = &["html", "markup", "tokens-json", "tokens-simple"];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("codeframe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render a syntax-highlighted excerpt of a PHP file around a line")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the PHP file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("line")
                .long("line")
                .short('l')
                .help("Line to flag (1-based)")
                .value_parser(value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            Arg::new("column")
                .long("column")
                .short('c')
                .help("Column to mark on the flagged line (1-based, 0 for none)")
                .value_parser(value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("lines")
                .long("lines")
                .short('n')
                .help("Number of lines in the window (overrides the configuration)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("editor-uri")
                .long("editor-uri")
                .help("Editor link attached to the rendered excerpt (html format only)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: html, markup, tokens-json or tokens-simple")
                .value_parser(FORMATS.to_vec())
                .default_value("html"),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let line = *matches.get_one::<usize>("line").unwrap_or(&1);
    let column = *matches.get_one::<usize>("column").unwrap_or(&0);
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("html");

    let config = load_config(
        matches.get_one::<String>("config").map(String::as_str),
        matches.get_one::<usize>("lines").copied(),
    );
    let editor_uri = matches.get_one::<String>("editor-uri").map(String::as_str);

    let output = match format {
        "html" => CodeHighlighter::with_config(config)
            .highlight_file(path, line, column, editor_uri)
            .unwrap_or_else(|e| fail(&e.to_string())),
        "markup" => {
            let source = read_source(path);
            CodeHighlighter::with_config(config)
                .highlight(&source)
                .map(|doc| doc.to_block())
                .unwrap_or_else(|e| fail(&e.to_string()))
        }
        "tokens-json" => {
            let tokens = lex_source(path, &config);
            serde_json::to_string_pretty(&tokens)
                .unwrap_or_else(|e| fail(&format!("Error formatting tokens: {}", e)))
        }
        "tokens-simple" => lex_source(path, &config)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        other => fail(&format!(
            "Unknown format '{}' (available: {})",
            other,
            FORMATS.join(", ")
        )),
    };

    println!("{}", output);
}

/// Layer the optional config file and CLI overrides over the defaults
fn load_config(path: Option<&str>, lines: Option<usize>) -> HighlightConfig {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    if let Some(lines) = lines {
        loader = loader
            .with_max_lines(lines)
            .unwrap_or_else(|e| fail(&format!("Invalid --lines: {}", e)));
    }
    loader
        .build()
        .map(|config| config.highlight)
        .unwrap_or_else(|e| fail(&format!("Configuration error: {}", e)))
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| fail(&format!("Error reading file: {}", e)))
}

fn lex_source(path: &str, config: &HighlightConfig) -> Vec<lexing::Token> {
    let code = highlighter::preprocess(&read_source(path), config);
    lexing::tokenize(&code).unwrap_or_else(|e| fail(&format!("Lexing error: {}", e)))
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
