//! The orchestrated stages and their precedence.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// One discrete step of the build pipeline.
///
/// Precedence is `Configure < Build < {Test, Run}`. `Clean` has no precedence
/// relation with any other stage and is always independently runnable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Configure,
    Build,
    Test,
    Run,
    Clean,
}

impl Stage {
    /// Every stage, in declaration order.
    pub const ALL: [Stage; 5] = [
        Stage::Configure,
        Stage::Build,
        Stage::Test,
        Stage::Run,
        Stage::Clean,
    ];

    /// The stages that must be satisfied before this one, in execution order.
    pub fn prerequisites(self) -> &'static [Stage] {
        match self {
            Stage::Configure | Stage::Clean => &[],
            Stage::Build => &[Stage::Configure],
            Stage::Test | Stage::Run => &[Stage::Configure, Stage::Build],
        }
    }

    /// Whether `self` must come before `other`.
    pub fn precedes(self, other: Stage) -> bool {
        other.prerequisites().contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Configure => "configure",
            Stage::Build => "build",
            Stage::Test => "test",
            Stage::Run => "run",
            Stage::Clean => "clean",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown stage '{}'; expected one of configure, build, test, run, clean",
                    s
                )
            })
    }
}
