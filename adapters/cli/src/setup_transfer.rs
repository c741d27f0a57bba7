use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use startup_survivor_engine::RunSetup;

const CODE_DOMAIN: &str = "run";
const CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded setup payload.
pub(crate) const CODE_HEADER: &str = "run:v1";
/// Delimiter used to separate the prefix, version and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes a run setup into a single-line string suitable for sharing.
pub(crate) fn encode_setup(setup: &RunSetup) -> Result<String, SetupTransferError> {
    let json = serde_json::to_vec(setup).map_err(SetupTransferError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!("{CODE_HEADER}{FIELD_DELIMITER}{encoded}"))
}

/// Decodes a run setup from a shared setup code.
///
/// Fields missing from the payload take their [`RunSetup::default`] values.
pub(crate) fn decode_setup(value: &str) -> Result<RunSetup, SetupTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SetupTransferError::EmptyCode);
    }

    let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
    let domain = parts.next().ok_or(SetupTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(SetupTransferError::MissingVersion)?;
    let payload = parts.next().ok_or(SetupTransferError::MissingPayload)?;

    if domain != CODE_DOMAIN {
        return Err(SetupTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != CODE_VERSION {
        return Err(SetupTransferError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(SetupTransferError::InvalidEncoding)?;
    serde_json::from_slice(&bytes).map_err(SetupTransferError::InvalidPayload)
}

/// Errors that can occur while encoding or decoding setup codes.
#[derive(Debug)]
pub(crate) enum SetupTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyCode,
    /// The prefix segment was missing from the code.
    MissingPrefix,
    /// The code did not contain a version segment.
    MissingVersion,
    /// The code did not include the payload segment.
    MissingPayload,
    /// The code used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The code used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The payload could not be converted to or from a run setup.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for SetupTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "setup code was empty"),
            Self::MissingPrefix => write!(f, "setup code is missing the prefix"),
            Self::MissingVersion => write!(f, "setup code is missing the version"),
            Self::MissingPayload => write!(f, "setup code is missing the payload"),
            Self::InvalidPrefix(prefix) => {
                write!(f, "setup code prefix '{prefix}' is not supported")
            }
            Self::UnsupportedVersion(version) => {
                write!(f, "setup code version '{version}' is not supported")
            }
            Self::InvalidEncoding(error) => write!(f, "could not decode setup payload: {error}"),
            Self::InvalidPayload(error) => write!(f, "could not parse setup payload: {error}"),
        }
    }
}

impl Error for SetupTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}
