//! HTTP courier request body template.
//!
//! Users declare the template base64 encoded. Ory stores it as a URL-like
//! string, `base64://<payload>` for inline templates or a plain location such
//! as `https://…` or `file://…`.

use crate::error::DecodeError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const BASE64_SCHEME: &str = "base64://";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// Inline template, stored under the `base64://` tag.
    Base64,
    /// Anything else Ory accepts as a body location, kept verbatim.
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBody {
    pub encoding: BodyEncoding,
    pub content: Vec<u8>,
}

impl ActionBody {
    /// Parse the declared `action_body` attribute.
    pub fn from_declared(declared: &str) -> Result<Self, DecodeError> {
        Ok(Self {
            encoding: BodyEncoding::Base64,
            content: STANDARD.decode(declared)?,
        })
    }

    /// Parse `request_config.body` as stored by Ory. Only a leading
    /// `base64://` tag marks an inline template.
    pub fn from_remote(remote: &str) -> Result<Self, DecodeError> {
        match remote.strip_prefix(BASE64_SCHEME) {
            Some(payload) => Ok(Self {
                encoding: BodyEncoding::Base64,
                content: STANDARD.decode(payload)?,
            }),
            None => Ok(Self {
                encoding: BodyEncoding::Raw,
                content: remote.as_bytes().to_vec(),
            }),
        }
    }

    pub fn to_remote(&self) -> String {
        match self.encoding {
            BodyEncoding::Base64 => format!("{}{}", BASE64_SCHEME, STANDARD.encode(&self.content)),
            BodyEncoding::Raw => String::from_utf8_lossy(&self.content).into_owned(),
        }
    }

    /// Value reported back in the `action_body` attribute.
    pub fn declared_value(&self) -> String {
        match self.encoding {
            BodyEncoding::Base64 => STANDARD.encode(&self.content),
            BodyEncoding::Raw => String::from_utf8_lossy(&self.content).into_owned(),
        }
    }
}

pub fn is_valid_base64(value: &str) -> bool {
    STANDARD.decode(value).is_ok()
}
