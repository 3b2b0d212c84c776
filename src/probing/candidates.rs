//! Ordered candidate launch commands per platform.

use crate::platform::OsFamily;
use crate::version::VersionRequest;

/// Candidate commands for the required version, in probe order.
///
/// Order encodes preference, not membership. On Windows the
/// version-targeted launcher form goes first since it is the least
/// ambiguous, then the generic names, then the untargeted launcher. Off
/// Windows, `python3` is the conventional binary name and goes before
/// `python`.
pub(crate) fn candidate_commands(family: OsFamily, required: &VersionRequest) -> Vec<String> {
    if family == OsFamily::Windows {
        vec![
            format!("py -{}.{}", required.major, required.minor),
            "python".to_string(),
            "python3".to_string(),
            "py -3".to_string(),
        ]
    } else {
        vec!["python3".to_string(), "python".to_string()]
    }
}
