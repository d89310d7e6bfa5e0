//! Line-level record parsing
//!
//! Every non-comment line of a descriptor becomes one [`Record`]. Parsing is
//! lenient: a bad line turns into [`Record::Malformed`] and never aborts the
//! rest of the descriptor.

use super::coordinate::{DependencyCoordinate, RepositoryDescriptor};

/// Prefix of a dependency record
pub const DEPENDENCY_PREFIX: &str = "DEP:";

/// Prefix of a repository record
pub const REPOSITORY_PREFIX: &str = "REPO:";

/// One parsed descriptor line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Dependency(DependencyCoordinate),
    Repository(RepositoryDescriptor),
    /// 1-based line number of a line that could not be parsed
    Malformed { line_number: usize },
}

/// Parse a single descriptor line
///
/// Returns `None` for blank lines and `#` comments.
pub fn parse_line(line_number: usize, line: &str) -> Option<Record> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let record = if let Some(rest) = line.strip_prefix(DEPENDENCY_PREFIX) {
        parse_dependency(rest).map(Record::Dependency)
    } else if let Some(rest) = line.strip_prefix(REPOSITORY_PREFIX) {
        parse_repository(rest).map(Record::Repository)
    } else {
        None
    };

    Some(record.unwrap_or(Record::Malformed { line_number }))
}

/// `groupId:artifactId:version`, exactly three fields
fn parse_dependency(rest: &str) -> Option<DependencyCoordinate> {
    let mut parts = rest.split(':');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(group), Some(artifact), Some(version), None)
            if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
        {
            Some(DependencyCoordinate::new(group, artifact, version))
        }
        _ => None,
    }
}

/// `name:url:needsAuth:envPrefix` where `url` may contain colons
///
/// The name ends at the first colon; the prefix and auth flag are taken from
/// the last two colons. When those two colons do not both sit after the first
/// one, the whole remainder is the URL and no auth is requested.
pub fn parse_repository(rest: &str) -> Option<RepositoryDescriptor> {
    let first = rest.find(':')?;
    let name = &rest[..first];

    let last = rest.rfind(':')?;
    let second_last = rest[..last].rfind(':');

    match second_last {
        Some(second_last) if second_last > first => Some(RepositoryDescriptor {
            name: name.to_string(),
            url: rest[first + 1..second_last].to_string(),
            needs_auth: rest[second_last + 1..last].eq_ignore_ascii_case("true"),
            credential_env_prefix: rest[last + 1..].to_string(),
        }),
        _ => Some(RepositoryDescriptor::new(name, &rest[first + 1..])),
    }
}
