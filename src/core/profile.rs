//! Build profiles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A CMake build type.
///
/// The profile is an explicit value threaded into command construction; it is
/// forwarded verbatim as `CMAKE_BUILD_TYPE` when configuring and as the
/// multi-config selector when building and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Profile {
    #[default]
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl Profile {
    /// The CMake spelling of this build type.
    pub fn as_cmake_str(&self) -> &'static str {
        match self {
            Profile::Debug => "Debug",
            Profile::Release => "Release",
            Profile::RelWithDebInfo => "RelWithDebInfo",
            Profile::MinSizeRel => "MinSizeRel",
        }
    }

    /// Pick the profile from the common `--release` / `--profile` flag pair.
    pub fn from_flags(release: bool, profile: Option<Profile>) -> Option<Profile> {
        match (profile, release) {
            (Some(profile), _) => Some(profile),
            (None, true) => Some(Profile::Release),
            (None, false) => None,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cmake_str())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Profile::Debug),
            "release" => Ok(Profile::Release),
            "relwithdebinfo" => Ok(Profile::RelWithDebInfo),
            "minsizerel" => Ok(Profile::MinSizeRel),
            _ => Err(format!(
                "invalid profile '{}'; expected 'debug', 'release', 'relwithdebinfo', or 'minsizerel'",
                s
            )),
        }
    }
}
