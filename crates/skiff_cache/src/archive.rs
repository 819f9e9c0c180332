//! The on-disk archive container for library packages.
//!
//! Layout: `u32 LE header length` ‖ `bincode header` ‖ `code bytes` ‖
//! `type-data bytes`. The header records the code section's length, so the
//! split point is explicit and the code region may contain any bytes at all
//! (the historical sentinel-line format assumed the code never contained the
//! delimiter; this container needs no such assumption).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::hash::ContentHash;

/// Magic bytes identifying a skiff package archive.
const ARCHIVE_MAGIC: [u8; 4] = *b"SKFA";

/// Current archive format version. Increment on breaking changes to the
/// header or section layout.
const ARCHIVE_FORMAT_VERSION: u32 = 1;

/// Header prepended to every package archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArchiveHeader {
    /// Magic bytes: must be `b"SKFA"`.
    magic: [u8; 4],

    /// Archive format version.
    format_version: u32,

    /// Tool version that produced this archive (informational).
    tool_version: String,

    /// Length in bytes of the emitted-code section.
    code_len: u64,

    /// Checksum over both payload sections.
    checksum: ContentHash,
}

/// The two payload sections of a decoded archive.
#[derive(Debug, PartialEq, Eq)]
pub struct ArchiveContents {
    /// The package's emitted code, byte-identical to what was stored.
    pub code: Vec<u8>,

    /// The serialized exported-type section.
    pub type_data: Vec<u8>,
}

/// Encodes an archive from its two sections.
pub fn encode_archive(
    code: &[u8],
    type_data: &[u8],
    tool_version: &str,
) -> Result<Vec<u8>, CacheError> {
    let header = ArchiveHeader {
        magic: ARCHIVE_MAGIC,
        format_version: ARCHIVE_FORMAT_VERSION,
        tool_version: tool_version.to_string(),
        code_len: code.len() as u64,
        checksum: ContentHash::from_sections(code, type_data),
    };

    let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
        .map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

    let header_len = header_bytes.len() as u32;
    let mut out = Vec::with_capacity(4 + header_bytes.len() + code.len() + type_data.len());
    out.extend_from_slice(&header_len.to_le_bytes());
    out.extend_from_slice(&header_bytes);
    out.extend_from_slice(code);
    out.extend_from_slice(type_data);
    Ok(out)
}

/// Decodes an archive, validating magic, version and checksum.
///
/// `path` is used only for error reporting. All failures are fatal; a
/// corrupt archive never degrades into a cache miss.
pub fn decode_archive(raw: &[u8], path: &Path) -> Result<ArchiveContents, CacheError> {
    if raw.len() < 4 {
        return Err(CacheError::Truncated {
            path: path.to_path_buf(),
        });
    }

    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&raw[..4]);
    let header_len = u32::from_le_bytes(len_bytes) as usize;
    if raw.len() < 4 + header_len {
        return Err(CacheError::Truncated {
            path: path.to_path_buf(),
        });
    }

    let header: ArchiveHeader =
        bincode::serde::decode_from_slice(&raw[4..4 + header_len], bincode::config::standard())
            .map(|(h, _)| h)
            .map_err(|e| CacheError::InvalidHeader {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

    if header.magic != ARCHIVE_MAGIC {
        return Err(CacheError::InvalidHeader {
            path: path.to_path_buf(),
            reason: "bad magic bytes".to_string(),
        });
    }
    if header.format_version != ARCHIVE_FORMAT_VERSION {
        return Err(CacheError::VersionMismatch {
            path: path.to_path_buf(),
            expected: ARCHIVE_FORMAT_VERSION,
            actual: header.format_version,
        });
    }

    let payload = &raw[4 + header_len..];
    let code_len = header.code_len as usize;
    if payload.len() < code_len {
        return Err(CacheError::Truncated {
            path: path.to_path_buf(),
        });
    }

    let (code, type_data) = payload.split_at(code_len);
    let actual = ContentHash::from_sections(code, type_data);
    if actual != header.checksum {
        return Err(CacheError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: header.checksum.to_string(),
            actual: actual.to_string(),
        });
    }

    Ok(ArchiveContents {
        code: code.to_vec(),
        type_data: type_data.to_vec(),
    })
}
