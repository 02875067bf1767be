use crate::source::SourceRoot;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use linehash_types::{Artifact, ArtifactLocation, ids::FILE_URI_PREFIX};
use percent_encoding::percent_decode_str;
use serde_json::Value as JsonValue;
use tracing::debug;

/// Why a location could not be turned into a file under the source root.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Unresolvable {
    #[error("artifact index {0} is invalid")]
    InvalidIndex(String),
    #[error("URI {0} is not a string")]
    NonStringUri(String),
    #[error("URI {0:?} does not decode to UTF-8")]
    Undecodable(String),
    #[error("URI {0:?} uses an unrecognised scheme")]
    UnsupportedScheme(String),
    #[error("path {0:?} is outside of the source root")]
    OutsideRoot(String),
    #[error("{0} is not an existing file")]
    NotAFile(Utf8PathBuf),
}

/// Resolve `location` to an existing file under `source_root`.
///
/// Every failure is logged at debug level and reported as `None`; see
/// [`try_resolve_location`] for the reasons.
pub fn resolve_location(
    location: &ArtifactLocation,
    artifacts: &[Artifact],
    source_root: &SourceRoot,
) -> Option<Utf8PathBuf> {
    match try_resolve_location(location, artifacts, source_root) {
        Ok(path) => Some(path),
        Err(reason) => {
            debug!(%reason, "ignoring location");
            None
        }
    }
}

/// Resolve `location` to an existing file under `source_root`.
///
/// Behavior:
/// - without a `uri`, `index` selects the location of an entry in `artifacts`
/// - the URI is percent-decoded; a `file://` scheme is stripped, any other scheme is rejected
/// - relative paths are taken relative to the declared root
/// - the lexically normalized path must stay inside the declared or canonical root and be a
///   regular file
pub fn try_resolve_location(
    location: &ArtifactLocation,
    artifacts: &[Artifact],
    source_root: &SourceRoot,
) -> Result<Utf8PathBuf, Unresolvable> {
    let indexed;
    let location = match &location.index {
        Some(index) if !location.has_uri() => {
            indexed = artifact_at(index, artifacts)
                .ok_or_else(|| Unresolvable::InvalidIndex(index.to_string()))?;
            &indexed
        }
        _ => location,
    };

    let raw = match &location.uri {
        Some(JsonValue::String(s)) => s.as_str(),
        Some(other) => return Err(Unresolvable::NonStringUri(other.to_string())),
        None => return Err(Unresolvable::NonStringUri("<missing>".to_string())),
    };
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| Unresolvable::Undecodable(raw.to_string()))?;

    let uri = decoded.strip_prefix(FILE_URI_PREFIX).unwrap_or(&*decoded);
    if uri.contains("://") {
        return Err(Unresolvable::UnsupportedScheme(uri.to_string()));
    }

    let candidate = Utf8Path::new(uri);
    let path = if candidate.is_absolute() {
        normalize_lexically(candidate)
    } else {
        // Relative URIs are assumed to be relative to the source root.
        normalize_lexically(&source_root.declared().join(candidate))
    };

    if !source_root.contains(&path) {
        return Err(Unresolvable::OutsideRoot(uri.to_string()));
    }
    if !path.is_file() {
        return Err(Unresolvable::NotAFile(path));
    }

    Ok(path)
}

fn artifact_at(index: &JsonValue, artifacts: &[Artifact]) -> Option<ArtifactLocation> {
    let i = usize::try_from(index.as_u64()?).ok()?;
    artifacts.get(i)?.artifact_location()
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the root of an absolute path; in a relative path, leading `..`
/// components are kept.
pub fn normalize_lexically(path: &Utf8Path) -> Utf8PathBuf {
    let mut parts: Vec<Utf8Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match parts.last() {
                Some(Utf8Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Utf8Component::RootDir) | Some(Utf8Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return Utf8PathBuf::from(".");
    }
    parts.iter().collect()
}
