//! Advisory host-version gate.
//!
//! The result only drives a startup warning; hooks run regardless.

/// The single host major version this pipeline is built against.
pub const SUPPORTED_MAJOR_VERSION: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Parse a semver-ish version string.
///
/// Any pre-release suffix after the first `-` is stripped; minor and patch
/// default to 0 when absent or unparsable. `None` when the major segment
/// is not an integer.
pub fn parse_version(version: &str) -> Option<ParsedVersion> {
    let clean = match version.split_once('-') {
        Some((head, _)) => head,
        None => version,
    };
    let mut parts = clean.split('.');
    let major = parts.next()?.parse::<u64>().ok()?;
    let minor = parts.next().and_then(|part| part.parse().ok()).unwrap_or(0);
    let patch = parts.next().and_then(|part| part.parse().ok()).unwrap_or(0);
    Some(ParsedVersion {
        major,
        minor,
        patch,
    })
}

/// Advisory compatibility check.
///
/// `None` or the literal `"unknown"` cannot be judged: assume compatible
/// and warn. A version that is present but unparsable is incompatible.
pub fn is_compatible(version: Option<&str>) -> bool {
    let Some(version) = version.filter(|v| *v != "unknown") else {
        tracing::warn!("unable to determine host version, assuming compatible");
        return true;
    };

    match parse_version(version) {
        Some(parsed) => {
            let compatible = parsed.major == SUPPORTED_MAJOR_VERSION;
            if !compatible {
                tracing::warn!(
                    "incompatible host version {version}, supported: {SUPPORTED_MAJOR_VERSION}.x"
                );
            }
            compatible
        }
        None => {
            tracing::warn!("invalid host version format: {version}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_major_is_compatible() {
        assert!(is_compatible(Some("4.0.0")));
        assert!(is_compatible(Some("4.7.12")));
    }

    #[test]
    fn older_major_is_incompatible() {
        assert!(!is_compatible(Some("3.9.9")));
    }

    #[test]
    fn newer_major_is_incompatible() {
        assert!(!is_compatible(Some("5.0.0")));
    }

    #[test]
    fn pre_release_suffix_is_stripped() {
        assert!(is_compatible(Some("4.2.0-beta.1")));
        assert!(!is_compatible(Some("3.0.0-rc.2")));
    }

    #[test]
    fn undetectable_version_is_optimistically_compatible() {
        assert!(is_compatible(None));
        assert!(is_compatible(Some("unknown")));
    }

    #[test]
    fn unparsable_version_is_incompatible() {
        assert!(!is_compatible(Some("not-a-version")));
        assert!(!is_compatible(Some("")));
    }

    #[test]
    fn major_only_parses_with_zero_rest() {
        assert_eq!(
            parse_version("4"),
            Some(ParsedVersion {
                major: 4,
                minor: 0,
                patch: 0
            })
        );
    }

    #[test]
    fn unparsable_minor_and_patch_default_to_zero() {
        assert_eq!(
            parse_version("4.x.y"),
            Some(ParsedVersion {
                major: 4,
                minor: 0,
                patch: 0
            })
        );
    }

    #[test]
    fn unparsable_major_is_none() {
        assert_eq!(parse_version("x.2.1"), None);
        assert_eq!(parse_version("not-a-version"), None);
    }
}
