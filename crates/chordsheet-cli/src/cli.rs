//! Command-line interface for the chordsheet utility
//!
//! Provides a CLI to convert chord sheets between dialects, inspect how they
//! are classified, and check whether a dialect can represent them.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use chordsheet::core::logging::init_logging;
use chordsheet::dialects::{Dialect, RendererRegistry};
use chordsheet::parser::{import_bytes, ImportResult};
use chordsheet::{ChordPlacementMode, RenderingOptions, RenderingResult, WhitespaceOverrides};

/// Chordsheet - Convert chord sheets between notation dialects
#[derive(Parser)]
#[command(name = "chordsheet")]
#[command(about = "A Rust utility to convert chord sheets between ChordPro, OnSong, Songbook, Guitar Tabs and Nashville text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a chord sheet to another dialect
    Convert {
        /// Input file: sheet text or a JSON chordsheet (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target dialect (chordpro, onsong, songbook, guitar_tabs, nashville)
        #[arg(short, long, default_value = "chordpro")]
        format: String,

        /// Where chords go relative to the lyric
        #[arg(long, value_enum, default_value_t = PlacementChoice::Auto)]
        placement: PlacementChoice,

        /// Write chord tokens exactly as they were captured
        #[arg(long)]
        preserve_original: bool,

        /// Leave out the title/artist/key block
        #[arg(long)]
        no_metadata: bool,

        /// Blank lines between sections
        #[arg(long, value_name = "N")]
        between_sections: Option<usize>,

        /// Extra blank lines after comments
        #[arg(long, value_name = "N")]
        after_comment: Option<usize>,

        /// Blank lines after section titles
        #[arg(long, value_name = "N")]
        after_section: Option<usize>,

        /// Keep runs of three or more blank lines
        #[arg(long)]
        preserve_empty_lines: bool,
    },

    /// Print the classified chordsheet as JSON
    Classify {
        /// Input file to classify (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Check whether a dialect can render the input
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Dialect to check against
        #[arg(short, long, default_value = "chordpro")]
        format: String,
    },

    /// Show supported dialects
    Formats {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Chord placement choices
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum PlacementChoice {
    /// Chord row above each lyric
    Above,
    /// Chords spliced into the lyric
    Inline,
    /// Dialect default
    #[default]
    Auto,
}

impl From<PlacementChoice> for ChordPlacementMode {
    fn from(value: PlacementChoice) -> Self {
        match value {
            PlacementChoice::Above => ChordPlacementMode::Above,
            PlacementChoice::Inline => ChordPlacementMode::Inline,
            PlacementChoice::Auto => ChordPlacementMode::Auto,
        }
    }
}

/// Rendering flags of the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertFlags {
    pub placement: PlacementChoice,
    pub preserve_original: bool,
    pub no_metadata: bool,
    pub between_sections: Option<usize>,
    pub after_comment: Option<usize>,
    pub after_section: Option<usize>,
    pub preserve_empty_lines: bool,
}

impl ConvertFlags {
    pub fn to_options(&self) -> RenderingOptions {
        RenderingOptions::default()
            .with_placement(self.placement.into())
            .with_original_text(self.preserve_original)
            .with_metadata(!self.no_metadata)
            .with_whitespace(WhitespaceOverrides {
                empty_lines_after_comment: self.after_comment,
                empty_lines_after_section: self.after_section,
                empty_lines_between_sections: self.between_sections,
                preserve_multiple_empty_lines: self.preserve_empty_lines.then_some(true),
            })
    }
}

#[derive(Serialize)]
struct FormatInfo {
    id: &'static str,
    name: String,
    version: &'static str,
    extensions: &'static [&'static str],
}

/// Main CLI application
pub struct ChordsheetApp {
    registry: RendererRegistry,
}

impl ChordsheetApp {
    /// Create a new application instance with the built-in dialects
    pub fn new() -> Self {
        Self {
            registry: RendererRegistry::with_default_renderers(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("CHORDSHEET_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("CHORDSHEET_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Chordsheet v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Convert {
                input,
                output,
                format,
                placement,
                preserve_original,
                no_metadata,
                between_sections,
                after_comment,
                after_section,
                preserve_empty_lines,
            } => {
                let flags = ConvertFlags {
                    placement,
                    preserve_original,
                    no_metadata,
                    between_sections,
                    after_comment,
                    after_section,
                    preserve_empty_lines,
                };
                self.convert_command(input, output, &format, &flags, cli.verbose)
            }
            Commands::Classify { input } => self.classify_command(input, cli.verbose),
            Commands::Validate { input, format } => {
                self.validate_command(input, &format, cli.verbose)
            }
            Commands::Formats { json } => self.formats_command(json, cli.verbose),
        }
    }

    /// Map a dialect alias such as `tabs` to its registry id
    pub fn resolve_format(format: &str) -> String {
        match format.parse::<Dialect>() {
            Ok(dialect) => dialect.id().to_string(),
            Err(_) => format.trim().to_lowercase(),
        }
    }

    /// Import input text and render it in `format`
    pub fn convert_content(
        &self,
        content: &[u8],
        format: &str,
        flags: &ConvertFlags,
    ) -> Result<(ImportResult, RenderingResult)> {
        let imported = import_bytes(content)?;
        let result = self.registry.render(
            &Self::resolve_format(format),
            &imported.chordsheet,
            &flags.to_options(),
        )?;
        Ok((imported, result))
    }

    /// Handle the convert command
    fn convert_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        format: &str,
        flags: &ConvertFlags,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let (imported, result) = self.convert_content(&content, format, flags)?;

        for warning in imported.warnings.iter().chain(&result.metadata.warnings) {
            eprintln!("Warning: {}", warning);
        }

        if verbose {
            eprintln!(
                "Rendered {} sections, {} lines, {} chords as {} in {:?}",
                result.metadata.sections_rendered,
                result.metadata.lines_rendered,
                result.metadata.chords_rendered,
                result.format,
                result.metadata.rendering_time
            );
        }

        self.write_output(output, &result.content)
    }

    /// Handle the classify command
    fn classify_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        let imported = import_bytes(&content)?;

        if verbose {
            eprintln!(
                "Classified {} sections with {} lines",
                imported.chordsheet.sections.len(),
                imported.chordsheet.line_count()
            );
        }
        for warning in &imported.warnings {
            eprintln!("Warning: {}", warning);
        }

        println!("{}", serde_json::to_string_pretty(&imported.chordsheet)?);
        Ok(())
    }

    /// Check a dialect's render precondition; `Ok(false)` means it cannot render
    pub fn can_render(&self, content: &[u8], format: &str) -> Result<bool> {
        let imported = import_bytes(content)?;
        let renderer = self.registry.create_renderer(&Self::resolve_format(format))?;
        Ok(renderer.can_render(&imported.chordsheet))
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, format: &str, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        let format = Self::resolve_format(format);

        if verbose {
            eprintln!("Checking {} bytes of input against {}", content.len(), format);
        }

        if self.can_render(&content, &format)? {
            println!("✓ Renderable as {}", format);
            Ok(())
        } else {
            println!("✗ Cannot render as {}", format);
            Err(anyhow!("Input cannot be rendered as {}", format))
        }
    }

    fn format_infos(&self) -> Vec<FormatInfo> {
        Dialect::ALL
            .iter()
            .filter_map(|dialect| {
                let renderer = self.registry.get_renderer(dialect.id())?;
                Some(FormatInfo {
                    id: dialect.id(),
                    name: renderer.name().to_string(),
                    version: renderer.version(),
                    extensions: dialect.descriptor().extensions,
                })
            })
            .collect()
    }

    /// Handle the formats command
    fn formats_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported dialects");
        }

        let formats = self.format_infos();
        if json {
            let listing = serde_json::json!({
                "supported_formats": formats,
                "total": formats.len()
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Supported dialects:");
            for info in &formats {
                println!("  {:<12} - {} (.{})", info.id, info.name, info.extensions.join(", ."));
            }
            println!();
            println!("Total: {} dialects supported", formats.len());
        }

        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<Vec<u8>> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => {
                debug!(path = %path.display(), "Reading input file");
                fs::read(&path)
                    .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))
            }
            _ => {
                debug!("Reading input from stdin");
                let mut content = Vec::new();
                io::stdin().read_to_end(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                debug!(path = %path.display(), bytes = content.len(), "Writing output file");
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for ChordsheetApp {
    fn default() -> Self {
        Self::new()
    }
}
