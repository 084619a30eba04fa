//! Command-line interface for snippet-diff.
//!
//! Parses arguments, loads the inputs and config, runs the engine and writes
//! painted frames. The interactive loop reads toggle commands from any
//! `BufRead`, so it can be driven from tests.

use crate::engine::{CodeView, EngineOptions, RenderRequest, grammar, render};
use crate::paint::{PainterConfig, TerminalPainter, to_ansi, to_plain};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snippet_diff_config::{Config, LogLevel};
use std::fs;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

/// snippet-diff - Syntax-highlighted line diffs of code snippets
#[derive(Parser, Debug)]
#[command(name = "snippet-diff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Current version of the snippet (`-` reads stdin)
    #[arg(value_name = "CURRENT", required_unless_present = "list_languages")]
    pub current: Option<PathBuf>,

    /// Next version; when given, a line diff is shown
    #[arg(value_name = "NEXT")]
    pub next: Option<PathBuf>,

    /// Language identifier (defaults to the extension of CURRENT)
    #[arg(short, long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Start in split (two column) layout
    #[arg(short, long)]
    pub split: bool,

    /// Fold unchanged lines
    #[arg(short, long)]
    pub fold: bool,

    /// Unchanged lines kept around each change when folding
    #[arg(long, value_name = "N")]
    pub context: Option<usize>,

    /// Header label (defaults to the file name of CURRENT)
    #[arg(long, value_name = "NAME")]
    pub label: Option<String>,

    /// Terminal width in columns
    #[arg(short, long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Output format (defaults to ansi on a color terminal, text otherwise)
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Read toggle commands from stdin after painting
    #[arg(short, long)]
    pub interactive: bool,

    /// Config file (defaults to ~/.config/snippet-diff/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level for the debug log (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the recognised language identifiers and exit
    #[arg(long)]
    pub list_languages: bool,
}

/// How frames are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text without escape sequences
    Text,
    /// 24-bit ANSI colors
    Ansi,
    /// The render output as JSON
    Json,
}

/// Runtime options passed from the CLI to [`run`].
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub current: PathBuf,
    pub next: Option<PathBuf>,
    pub language: Option<String>,
    pub split: bool,
    pub fold: bool,
    pub context: Option<usize>,
    pub label: Option<String>,
    pub width: Option<usize>,
    pub format: Option<OutputFormat>,
    pub interactive: bool,
    pub config_path: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with a render
    Continue(RunOptions),
    /// Exit with the given code
    Exit(i32),
}

impl From<Cli> for CliResult {
    fn from(cli: Cli) -> Self {
        if cli.list_languages {
            for name in grammar::known_languages() {
                println!("{name}");
            }
            return CliResult::Exit(0);
        }
        let Some(current) = cli.current else {
            eprintln!("snippet-diff: missing CURRENT input");
            return CliResult::Exit(2);
        };
        CliResult::Continue(RunOptions {
            current,
            next: cli.next,
            language: cli.lang,
            split: cli.split,
            fold: cli.fold,
            context: cli.context,
            label: cli.label,
            width: cli.width,
            format: cli.format,
            interactive: cli.interactive,
            config_path: cli.config,
            log_level: cli.log_level,
        })
    }
}

/// Process CLI arguments
pub fn process_cli() -> CliResult {
    Cli::parse().into()
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read an input file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read snippet from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Language identifier from a file extension.
pub fn detect_language(path: &Path) -> Option<String> {
    if is_stdin(path) {
        return None;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

impl RunOptions {
    /// Language from `--lang`, else the extension of CURRENT, else NEXT.
    /// Empty when none is known; the engine reports that as a config error.
    pub fn language(&self) -> String {
        self.language
            .clone()
            .or_else(|| detect_language(&self.current))
            .or_else(|| self.next.as_deref().and_then(detect_language))
            .unwrap_or_default()
    }

    pub fn label(&self) -> Option<String> {
        self.label.clone().or_else(|| {
            if is_stdin(&self.current) {
                return None;
            }
            self.current
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
    }

    /// Build the engine request; CLI flags switch on what the config leaves off.
    pub fn request(
        &self,
        config: &Config,
        current_text: String,
        next_text: Option<String>,
    ) -> RenderRequest {
        RenderRequest {
            current_text,
            next_text,
            language: self.language(),
            initial_split: self.split || config.default_split,
            fold_unchanged: self.fold || config.fold_unchanged,
            file_label: self.label(),
        }
    }

    pub fn engine_options(&self, config: &Config) -> EngineOptions {
        let mut options = EngineOptions::from_config(config);
        if let Some(context) = self.context {
            options.context_lines = context;
        }
        options
    }

    /// Width from `--width`, else `COLUMNS`, else the config.
    pub fn painter_config(&self, config: &Config) -> PainterConfig {
        let width = self
            .width
            .or_else(|| {
                std::env::var("COLUMNS")
                    .ok()
                    .and_then(|c| c.trim().parse().ok())
            })
            .filter(|&w| w > 0)
            .unwrap_or(config.terminal_width);
        PainterConfig::from_config(config).with_width(width)
    }

    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.format.unwrap_or_else(|| {
            if config.color && io::stdout().is_terminal() {
                OutputFormat::Ansi
            } else {
                OutputFormat::Text
            }
        })
    }
}

/// Write one frame of `view` in `format`.
pub fn write_frame<W: Write>(
    view: &CodeView,
    painter: &TerminalPainter,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let output = view.output();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;
        }
        OutputFormat::Ansi => out.write_all(to_ansi(&painter.paint(&output)).as_bytes())?,
        OutputFormat::Text => out.write_all(to_plain(&painter.paint(&output)).as_bytes())?,
    }
    out.flush()?;
    Ok(())
}

/// Paint once, then toggle and repaint on `t` or an empty line until `q`
/// or end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    view: &CodeView,
    painter: &TerminalPainter,
    format: OutputFormat,
    input: R,
    out: &mut W,
) -> Result<()> {
    write_frame(view, painter, format, out)?;
    if !view.has_diff_toggle() {
        writeln!(out, "(single snippet: nothing to toggle)")?;
        return Ok(());
    }
    prompt(view, out)?;
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        match line.trim() {
            "" | "t" => {
                let layout = view.toggle_layout();
                crate::debug_info!("CLI", "toggled to {}", layout.label());
                write_frame(view, painter, format, out)?;
            }
            "q" => break,
            other => writeln!(out, "unknown command: {other}")?,
        }
        prompt(view, out)?;
    }
    Ok(())
}

fn prompt<W: Write>(view: &CodeView, out: &mut W) -> Result<()> {
    let target = view.current_layout().toggled().label();
    write!(out, "[t] {target}  [q] quit > ")?;
    out.flush()?;
    Ok(())
}

/// Load config and inputs, render, and write to stdout.
pub fn run(options: &RunOptions) -> Result<()> {
    if options.interactive && is_stdin(&options.current) {
        anyhow::bail!("--interactive reads commands from stdin; CURRENT cannot also be `-`");
    }
    let config = match &options.config_path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    crate::debug::apply_config_log_level(config.log_level.to_level_filter());

    let current_text = read_input(&options.current)?;
    let next_text = options.next.as_deref().map(read_input).transpose()?;

    let request = options.request(&config, current_text, next_text);
    let view = render(&request, &options.engine_options(&config)).context("Failed to render snippet")?;
    let painter = TerminalPainter::new(options.painter_config(&config));
    let format = options.output_format(&config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if options.interactive {
        run_interactive(&view, &painter, format, io::stdin().lock(), &mut out)
    } else {
        write_frame(&view, &painter, format, &mut out)
    }
}
