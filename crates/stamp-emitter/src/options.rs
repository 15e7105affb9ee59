//! Output formatting options.

use serde::{Deserialize, Serialize};

/// Line terminator written between output lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewLineKind {
    #[default]
    #[serde(rename = "lf")]
    LineFeed,
    #[serde(rename = "crlf")]
    CarriageReturnLineFeed,
}

impl NewLineKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NewLineKind::LineFeed => "\n",
            NewLineKind::CarriageReturnLineFeed => "\r\n",
        }
    }
}

/// How generated method bodies are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyStyle {
    /// `=> new Dest { ... };`
    #[default]
    Expression,
    /// `{ return new Dest { ... }; }`
    Block,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterOptions {
    pub new_line: NewLineKind,
    /// Spaces per indentation level
    pub indent_size: u32,
    /// Object initializers that would run past this column are split one
    /// assignment per line
    pub max_line_width: usize,
    pub body_style: BodyStyle,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        PrinterOptions {
            new_line: NewLineKind::LineFeed,
            indent_size: 4,
            max_line_width: 120,
            body_style: BodyStyle::Expression,
        }
    }
}
