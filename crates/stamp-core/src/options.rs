use serde::{Deserialize, Serialize};
use stamp_emitter::PrinterOptions;

/// Options for one generation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewriteOptions {
    pub printer: PrinterOptions,
}

impl RewriteOptions {
    pub fn with_printer(printer: PrinterOptions) -> Self {
        RewriteOptions { printer }
    }
}
