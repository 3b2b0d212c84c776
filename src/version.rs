//! Version requirement parsing and major.minor matching.

use crate::error::DiscoveryError;
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// A requested interpreter version, reduced to its major and minor components.
///
/// Matching is major.minor equality only: a requirement of "3.11" accepts an
/// interpreter reporting "3.11.4" but not "3.10.12" or "3.12.0". Extra
/// components in the input string are validated but otherwise ignored.
///
/// # Example
///
/// ```rust
/// use python_discovery::VersionRequest;
///
/// let required: VersionRequest = "3.11".parse().unwrap();
/// assert_eq!((required.major, required.minor), (3, 11));
/// assert_eq!(required.to_string(), "3.11");
///
/// assert!("abc".parse::<VersionRequest>().is_err());
/// assert!("3".parse::<VersionRequest>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionRequest {
    /// Major version component.
    pub major: u64,
    /// Minor version component.
    pub minor: u64,
}

impl VersionRequest {
    /// Build a requirement from explicit components.
    pub fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    /// Check whether a full interpreter version satisfies this requirement.
    ///
    /// Patch and pre-release components are ignored entirely.
    pub fn matches(&self, version: &Version) -> bool {
        version.major == self.major && version.minor == self.minor
    }

    pub(crate) fn matches_pair(&self, (major, minor): (u64, u64)) -> bool {
        major == self.major && minor == self.minor
    }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for VersionRequest {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = split_major_minor(s).ok_or_else(|| DiscoveryError::InvalidVersion {
            input: s.to_string(),
        })?;
        Ok(Self { major, minor })
    }
}

/// Lenient dotted-version parse shared by the requirement parser and the
/// directory/registry scans, where names like "3.11.9" or "3.11" must map to
/// a (major, minor) pair.
///
/// Requires at least two components and every component to be numeric, so
/// "x64", "3" and "3.11-32" are all rejected.
pub(crate) fn split_major_minor(text: &str) -> Option<(u64, u64)> {
    let mut parts = text.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    for rest in parts {
        rest.parse::<u64>().ok()?;
    }
    Some((major, minor))
}
