use serde::Serialize;
use strum::{AsRefStr, EnumString};

/// Operating system family used to pick a release artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Darwin,
    Win32,
    /// No desktop release matches the client
    Unknown,
}

impl Platform {
    /// Detect the platform from a `User-Agent` header.
    ///
    /// Only desktop macOS and Windows clients are recognized. Mobile Apple and
    /// Windows Phone agents mention the desktop names too, so they are checked first.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let Some(ua) = user_agent else {
            return Platform::Unknown;
        };
        let ua = ua.to_ascii_lowercase();

        if ["iphone", "ipad", "ipod", "windows phone"]
            .iter()
            .any(|m| ua.contains(m))
        {
            Platform::Unknown
        } else if ua.contains("macintosh") || ua.contains("mac os x") {
            Platform::Darwin
        } else if ua.contains("windows") {
            Platform::Win32
        } else {
            Platform::Unknown
        }
    }

    /// Path segment in distribution links, None when unknown.
    pub fn segment(&self) -> Option<&str> {
        match self {
            Platform::Unknown => None,
            known => Some(known.as_ref()),
        }
    }
}
