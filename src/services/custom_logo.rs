// Custom Logo Service
// Validates uploaded images and inlines them as data URLs

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::models::{CustomLogo, CustomLogoInfo};

/// Largest accepted upload (2 MiB)
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum LogoError {
    #[error("File size must be less than 2MB (got {0} bytes)")]
    TooLarge(usize),

    #[error("Please select an image file (got '{0}')")]
    NotAnImage(String),

    #[error("Invalid upload encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
}

impl CustomLogo {
    /// Validate raw upload bytes and wrap them in a data URL
    pub fn from_upload(file_name: &str, mime_type: &str, bytes: &[u8]) -> Result<Self, LogoError> {
        if bytes.len() > MAX_LOGO_BYTES {
            return Err(LogoError::TooLarge(bytes.len()));
        }

        let mime_type = mime_type.trim().to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(LogoError::NotAnImage(mime_type));
        }

        let data_url = format!("data:{mime_type};base64,{}", STANDARD.encode(bytes));
        Ok(Self {
            file_name: file_name.to_string(),
            mime_type,
            size: bytes.len(),
            data_url,
        })
    }

    /// Same as [`CustomLogo::from_upload`] for base64 payloads sent over the API
    pub fn from_base64(file_name: &str, mime_type: &str, payload: &str) -> Result<Self, LogoError> {
        // Accept a full data URL as well as the bare payload
        let payload = payload
            .split_once(";base64,")
            .map(|(_, data)| data)
            .unwrap_or(payload);
        let bytes = STANDARD.decode(payload.trim())?;
        Self::from_upload(file_name, mime_type, &bytes)
    }

    pub fn info(&self) -> CustomLogoInfo {
        CustomLogoInfo {
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            size: self.size,
            size_label: format_file_size(self.size as u64),
        }
    }
}

/// Human-readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2 MB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && exponent < UNITS.len() - 1 {
        scaled /= 1024;
        exponent += 1;
    }
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let rounded = format!("{:.2}", (value * 100.0).round() / 100.0);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[exponent])
}
