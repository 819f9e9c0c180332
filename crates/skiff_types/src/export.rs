//! Export-data codec: the serialized form of a package's type information
//! as stored in the archive's second section.

use crate::table::PackageTypes;

/// Errors from encoding or decoding exported type data.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Type information could not be serialized.
    #[error("failed to encode type data: {reason}")]
    Encode {
        /// Description of the failure.
        reason: String,
    },

    /// A stored type-data section could not be deserialized.
    #[error("failed to decode type data: {reason}")]
    Decode {
        /// Description of the failure.
        reason: String,
    },
}

/// Serializes a package's exported type information.
pub fn encode_package(types: &PackageTypes) -> Result<Vec<u8>, ExportError> {
    bincode::serde::encode_to_vec(types, bincode::config::standard()).map_err(|e| {
        ExportError::Encode {
            reason: e.to_string(),
        }
    })
}

/// Deserializes a package's exported type information.
pub fn decode_package(bytes: &[u8]) -> Result<PackageTypes, ExportError> {
    bincode::serde::decode_from_slice(bytes, bincode::config::standard())
        .map(|(types, _)| types)
        .map_err(|e| ExportError::Decode {
            reason: e.to_string(),
        })
}
