use std::fmt;

use serde::Serialize;
use tracing::debug;

/// Stages of one rewrite pass, in the only order they can occur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteStage {
    Parsed,
    SpecsExtracted,
    MethodsSynthesized,
    TreeRewritten,
    Serialized,
}

impl RewriteStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            RewriteStage::Parsed => "parsed",
            RewriteStage::SpecsExtracted => "specs-extracted",
            RewriteStage::MethodsSynthesized => "methods-synthesized",
            RewriteStage::TreeRewritten => "tree-rewritten",
            RewriteStage::Serialized => "serialized",
        }
    }
}

impl fmt::Display for RewriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The stage a pass has reached. Moves forward only.
#[derive(Debug, Default)]
pub(crate) struct StageTracker {
    current: Option<RewriteStage>,
}

impl StageTracker {
    pub(crate) fn current(&self) -> Option<RewriteStage> {
        self.current
    }

    /// The stage being worked towards: the one after `current`.
    pub(crate) fn pending(&self) -> RewriteStage {
        match self.current {
            None => RewriteStage::Parsed,
            Some(RewriteStage::Parsed) => RewriteStage::SpecsExtracted,
            Some(RewriteStage::SpecsExtracted) => RewriteStage::MethodsSynthesized,
            Some(RewriteStage::MethodsSynthesized) => RewriteStage::TreeRewritten,
            Some(RewriteStage::TreeRewritten | RewriteStage::Serialized) => {
                RewriteStage::Serialized
            }
        }
    }

    pub(crate) fn enter(&mut self, stage: RewriteStage) {
        debug_assert!(
            self.current.is_none_or(|current| current < stage),
            "rewrite stage moved backwards: {:?} -> {stage}",
            self.current
        );
        debug!(stage = %stage, "rewrite stage reached");
        self.current = Some(stage);
    }
}
