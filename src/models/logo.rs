// Logo Model
// Named icons versus uploaded inline images

use serde::Serialize;

/// Uploaded logo, embedded in the badge URL as a data URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomLogo {
    pub file_name: String,
    pub mime_type: String,
    pub size: usize,
    #[serde(skip_serializing)]
    pub data_url: String,
}

/// Upload metadata returned to clients without the payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomLogoInfo {
    pub file_name: String,
    pub mime_type: String,
    pub size: usize,
    pub size_label: String,
}

/// The logo that ends up in a built URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoRef<'a> {
    None,
    Named(&'a str),
    Inline(&'a str),
}

impl<'a> LogoRef<'a> {
    /// An uploaded logo wins over the named one
    pub fn resolve(named: &'a str, custom: Option<&'a str>) -> Self {
        if let Some(data_url) = custom.filter(|value| !value.is_empty()) {
            return LogoRef::Inline(data_url);
        }
        let named = named.trim();
        if named.is_empty() {
            LogoRef::None
        } else {
            LogoRef::Named(named)
        }
    }
}
