use anyhow::Context;
use crate::resolve::normalize_lexically;
use camino::{Utf8Path, Utf8PathBuf};

/// The source root itself is unusable. Nothing can be fingerprinted without it.
#[derive(Debug, thiserror::Error)]
pub enum SourceRootError {
    #[error("source root {path} is not accessible")]
    Inaccessible {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("source root {0} is not a directory")]
    NotADirectory(Utf8PathBuf),
}

/// A validated source root.
///
/// Keeps the root as declared by the caller (made absolute and lexically normalized) next to
/// its canonical form. Paths under either one count as inside the root, so a root reached
/// through a symlink accepts URIs spelled with either prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceRoot {
    declared: Utf8PathBuf,
    canonical: Utf8PathBuf,
}

impl SourceRoot {
    /// A root taken as given, without touching the filesystem.
    pub fn from_declared(root: &Utf8Path) -> Self {
        let declared = normalize_lexically(root);
        Self {
            canonical: declared.clone(),
            declared,
        }
    }

    /// The root as declared; relative URIs are joined to this path.
    pub fn declared(&self) -> &Utf8Path {
        &self.declared
    }

    pub fn canonical(&self) -> &Utf8Path {
        &self.canonical
    }

    /// Whether `path` (already normalized) lies under the declared or the canonical root.
    pub fn contains(&self, path: &Utf8Path) -> bool {
        path.starts_with(&self.declared) || path.starts_with(&self.canonical)
    }

    /// `path` relative to whichever root prefix it starts with.
    pub fn relative<'p>(&self, path: &'p Utf8Path) -> Option<&'p Utf8Path> {
        path.strip_prefix(&self.declared)
            .or_else(|_| path.strip_prefix(&self.canonical))
            .ok()
    }
}

/// Check that `root` is an accessible directory and record its declared and canonical forms.
///
/// A relative root is made absolute against the current directory. The canonical form falls
/// back to the declared one when it cannot be canonicalized into UTF-8.
pub fn open_source_root(root: &Utf8Path) -> Result<SourceRoot, SourceRootError> {
    let meta = std::fs::metadata(root).map_err(|source| SourceRootError::Inaccessible {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(SourceRootError::NotADirectory(root.to_path_buf()));
    }

    let absolute = std::path::absolute(root)
        .ok()
        .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        .unwrap_or_else(|| root.to_path_buf());
    let declared = normalize_lexically(&absolute);
    let canonical = root
        .canonicalize_utf8()
        .map(|p| normalize_lexically(&p))
        .unwrap_or_else(|_| declared.clone());

    Ok(SourceRoot {
        declared,
        canonical,
    })
}

/// Read a source file as text. Invalid UTF-8 sequences are replaced, not rejected.
pub fn read_source(path: &Utf8Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path))?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}
