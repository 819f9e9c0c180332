//! Staleness decision and archive load/store.

use std::time::SystemTime;

use skiff_context::{BuildContext, PackageMeta};
use skiff_types::PackageTypes;

use crate::archive::{decode_archive, encode_archive};
use crate::error::CacheError;
use crate::TOOL_VERSION;

/// Whether a package can be served from its artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// The artifact is at least as new as every input; load instead of
    /// retranslating (libraries) or skip entirely (commands).
    Fresh,
    /// Some input is newer than the artifact, or there is no usable
    /// artifact; a full build is required.
    Stale,
}

/// Folds the package's own source mod-times into a running freshness
/// maximum.
///
/// `base` already accounts for the compiler baseline and every transitive
/// import's freshness; the result is the latest of all of them, which keeps
/// freshness monotonic along the import graph. Missing source files
/// contribute nothing (the parse step will report them properly).
pub fn fold_source_times(
    ctx: &dyn BuildContext,
    meta: &PackageMeta,
    base: SystemTime,
) -> SystemTime {
    let mut latest = base;
    for path in meta.source_paths() {
        if let Some(t) = ctx.mod_time(&path) {
            if t > latest {
                latest = t;
            }
        }
    }
    latest
}

/// Decides whether the package's artifact is fresh relative to `src_time`.
///
/// Fresh requires: an artifact path is known, the artifact's mod-time
/// resolves (a missing file is the epoch case and always stale), and no
/// input is strictly newer than the artifact.
pub fn check(ctx: &dyn BuildContext, meta: &PackageMeta, src_time: SystemTime) -> CacheStatus {
    let Some(artifact) = meta.artifact_path.as_deref() else {
        return CacheStatus::Stale;
    };
    match ctx.mod_time(artifact) {
        Some(artifact_time) if src_time <= artifact_time => CacheStatus::Fresh,
        _ => CacheStatus::Stale,
    }
}

/// Loads a fresh library package's emitted code and exported types from its
/// archive.
///
/// Never called for commands: the bundle is a whole-program artifact, so
/// commands are always relinked from scratch.
pub fn load(
    ctx: &dyn BuildContext,
    meta: &PackageMeta,
) -> Result<(Vec<u8>, PackageTypes), CacheError> {
    let path = meta
        .artifact_path
        .as_deref()
        .ok_or_else(|| CacheError::MissingArtifactPath {
            import_path: meta.import_path.clone(),
        })?;

    let raw = ctx.read_file(path)?;
    let contents = decode_archive(&raw, path)?;
    let types = skiff_types::decode_package(&contents.type_data)?;
    Ok((contents.code, types))
}

/// Persists a freshly built library package's code and exported types.
pub fn store(
    ctx: &dyn BuildContext,
    meta: &PackageMeta,
    code: &[u8],
    types: &PackageTypes,
) -> Result<(), CacheError> {
    let path = meta
        .artifact_path
        .as_deref()
        .ok_or_else(|| CacheError::MissingArtifactPath {
            import_path: meta.import_path.clone(),
        })?;

    let type_data = skiff_types::encode_package(types)?;
    let raw = encode_archive(code, &type_data, TOOL_VERSION)?;
    ctx.write_file(path, &raw)?;
    Ok(())
}
