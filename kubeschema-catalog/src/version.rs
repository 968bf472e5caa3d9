use semver::Version;
use std::cmp::Reverse;

/// Parse a `MAJOR.MINOR` directory name such as `1.29`.
///
/// Anything else (`latest`, `v1.29`, `1.29.3`) is not a catalog version.
pub fn parse_version(name: &str) -> Option<Version> {
    if name.split('.').count() != 2 {
        return None;
    }
    Version::parse(&format!("{name}.0")).ok()
}

/// Sort `MAJOR.MINOR` strings newest first. Unparseable entries sink to the end in input order.
pub fn sort_newest_first(versions: &mut [String]) {
    versions.sort_by_key(|v| Reverse(parse_version(v)));
}
