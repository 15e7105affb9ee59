use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use stamp_core::{BodyStyle, NewLineKind, PrinterOptions, RewriteOptions};

/// CLI arguments for the stamp binary.
#[derive(Parser, Debug)]
#[command(
    name = "stamp",
    version,
    about = "Generate C# mapping methods from `using Name = (Source, Destination);` directives"
)]
pub struct CliArgs {
    /// The C# document to rewrite.
    pub file: PathBuf,

    /// Project directory whose sources take part in type resolution.
    /// Defaults to the nearest directory above the document holding a
    /// .sln file, else a .csproj file.
    #[arg(short = 'p', long)]
    pub project: Option<PathBuf>,

    /// Replace the document on disk instead of printing the result.
    #[arg(short = 'w', long, conflicts_with = "explain")]
    pub write: bool,

    /// Read the document text from standard input (unsaved editor content).
    #[arg(long)]
    pub stdin: bool,

    /// Print the mappings found, as JSON, instead of the rewritten document.
    #[arg(long)]
    pub explain: bool,

    // ==================== Output Formatting ====================
    /// Line terminator of the output.
    #[arg(long = "new-line", value_enum, ignore_case = true)]
    pub new_line: Option<NewLine>,

    /// Spaces per indentation level.
    #[arg(long = "indent-size", value_parser = clap::value_parser!(u32).range(1..=16))]
    pub indent_size: Option<u32>,

    /// Shape of generated method bodies.
    #[arg(long = "body-style", value_enum, ignore_case = true)]
    pub body_style: Option<Body>,

    /// Split object initializers that would run past this column.
    #[arg(long = "max-line-width", value_parser = clap::value_parser!(u16).range(40..))]
    pub max_line_width: Option<u16>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NewLine {
    Lf,
    Crlf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Body {
    Expression,
    Block,
}

impl From<NewLine> for NewLineKind {
    fn from(value: NewLine) -> Self {
        match value {
            NewLine::Lf => NewLineKind::LineFeed,
            NewLine::Crlf => NewLineKind::CarriageReturnLineFeed,
        }
    }
}

impl From<Body> for BodyStyle {
    fn from(value: Body) -> Self {
        match value {
            Body::Expression => BodyStyle::Expression,
            Body::Block => BodyStyle::Block,
        }
    }
}

impl CliArgs {
    /// Pipeline options: defaults overridden by the flags given.
    pub fn rewrite_options(&self) -> RewriteOptions {
        let defaults = PrinterOptions::default();
        RewriteOptions::with_printer(PrinterOptions {
            new_line: self.new_line.map_or(defaults.new_line, NewLineKind::from),
            indent_size: self.indent_size.unwrap_or(defaults.indent_size),
            max_line_width: self
                .max_line_width
                .map_or(defaults.max_line_width, usize::from),
            body_style: self.body_style.map_or(defaults.body_style, BodyStyle::from),
        })
    }
}
