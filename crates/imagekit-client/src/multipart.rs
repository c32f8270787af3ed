//! `multipart/form-data` body encoding for uploads
//!
//! The upload endpoint accepts the file content as a plain text field, so
//! every section, including `file`, is emitted as `text/plain`. Fields are
//! written in key order; the closing delimiter is appended straight after
//! the last value line.

use crate::{ClientError, Result};
use base64::{
    alphabet,
    engine::{general_purpose::STANDARD_NO_PAD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use rand::Rng;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// Reserved field carrying the file content
pub const FILE_FIELD: &str = "file";
/// Reserved field carrying the file name
pub const FILE_NAME_FIELD: &str = "fileName";

const BOUNDARY_PREFIX_LEN: usize = 15;
const BOUNDARY_HEX_LEN: usize = 32;

/// Unpadded standard alphabet that tolerates non-zero trailing bits
const LENIENT_NO_PAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// Where the upload content comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileSource {
    /// Remote URL, fetched by the API
    Url(String),
    /// Regular file on local disk
    LocalPath(PathBuf),
    /// Content already encoded as unpadded base64
    Base64(String),
}

impl FileSource {
    /// Classify a file reference, trying URL, then local path, then base64
    pub async fn resolve(file: &str) -> Result<Self> {
        if file.trim().is_empty() {
            return Err(ClientError::InvalidFile("file must not be empty".to_string()));
        }

        if is_remote_url(file) {
            return Ok(Self::Url(file.to_string()));
        }

        if let Ok(meta) = tokio::fs::metadata(file).await {
            if meta.is_file() {
                return Ok(Self::LocalPath(PathBuf::from(file)));
            }
        }

        if is_base64(file) {
            return Ok(Self::Base64(file.to_string()));
        }

        Err(ClientError::InvalidFile("file is invalid".to_string()))
    }

    /// The value sent in the `file` field
    pub async fn into_content(self) -> Result<String> {
        match self {
            Self::Url(url) => Ok(url),
            Self::Base64(data) => Ok(data),
            Self::LocalPath(path) => {
                let bytes = tokio::fs::read(&path).await?;
                debug!(path = %path.display(), size = bytes.len(), "Read local file for upload");
                Ok(STANDARD_NO_PAD.encode(bytes))
            }
        }
    }
}

/// Line breaks are ignored; the value itself is sent unchanged
fn is_base64(file: &str) -> bool {
    let compact: String = file.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    LENIENT_NO_PAD.decode(compact).is_ok()
}

fn is_remote_url(file: &str) -> bool {
    url::Url::parse(file).map(|u| u.has_host()).unwrap_or(false)
}

/// Generate a boundary: 15 dashes followed by 32 uppercase hex digits
pub fn generate_boundary() -> String {
    let mut rng = rand::thread_rng();
    let mut boundary = "-".repeat(BOUNDARY_PREFIX_LEN);
    for _ in 0..BOUNDARY_HEX_LEN {
        let digit = rng.gen_range(0..16u32);
        boundary.push(std::char::from_digit(digit, 16).unwrap_or('0').to_ascii_uppercase());
    }
    boundary
}

/// Build the upload body.
///
/// `file` and `file_name` are validated before any filesystem access and
/// take precedence over same-named entries in `fields`.
pub async fn build_body(
    file: &str,
    file_name: &str,
    fields: BTreeMap<String, String>,
    boundary: &str,
) -> Result<String> {
    if file.trim().is_empty() || file_name.trim().is_empty() {
        return Err(ClientError::InvalidFile(
            "file and fileName must not be empty".to_string(),
        ));
    }

    let content = FileSource::resolve(file).await?.into_content().await?;

    let mut fields = fields;
    fields.insert(FILE_FIELD.to_string(), content);
    fields.insert(FILE_NAME_FIELD.to_string(), file_name.to_string());

    Ok(encode_fields(&fields, boundary))
}

/// Encode already-resolved fields
pub fn encode_fields(fields: &BTreeMap<String, String>, boundary: &str) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!("--{}\r\n", boundary));
        body.push_str(&format!(
            "Content-Disposition: form-data; name=\"{}\"\r\n",
            name
        ));
        body.push_str("Content-Type: text/plain\r\n\r\n");
        body.push_str(value);
        body.push_str("\r\n");
    }
    if !fields.is_empty() {
        body.push_str(&format!("--{}--", boundary));
    }
    body
}
