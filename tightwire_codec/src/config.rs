use crate::serde::{FormatLimits, TextEncodingKind};
use anyhow::{anyhow, Result};
use std::env;
use std::str::FromStr;

pub const ENV_VAR_MAX_BYTE_ARRAY_LEN: &str = "TIGHTWIRE_MAX_BYTE_ARRAY_LEN";
pub const ENV_VAR_MAX_STRING_LEN: &str = "TIGHTWIRE_MAX_STRING_LEN";
pub const ENV_VAR_TEXT_ENCODING: &str = "TIGHTWIRE_TEXT_ENCODING";

/// Settings a [`crate::Format`] is built from.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FormatConfig {
    pub max_byte_array_len: usize,
    pub max_string_len: usize,
    pub text_encoding: TextEncodingKind,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_byte_array_len: FormatLimits::DEFAULT_MAX_BYTE_ARRAY_LEN,
            max_string_len: FormatLimits::DEFAULT_MAX_STRING_LEN,
            text_encoding: TextEncodingKind::default(),
        }
    }
}

impl FormatConfig {
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let dflt = Self::default();
        Ok(Self {
            max_byte_array_len: parse_var(&lookup, ENV_VAR_MAX_BYTE_ARRAY_LEN)?
                .unwrap_or(dflt.max_byte_array_len),
            max_string_len: parse_var(&lookup, ENV_VAR_MAX_STRING_LEN)?
                .unwrap_or(dflt.max_string_len),
            text_encoding: parse_var(&lookup, ENV_VAR_TEXT_ENCODING)?
                .unwrap_or(dflt.text_encoding),
        })
    }

    pub fn limits(&self) -> FormatLimits {
        FormatLimits::new(self.max_byte_array_len, self.max_string_len)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(s) => {
            let t = s
                .trim()
                .parse::<T>()
                .map_err(|e| anyhow!("Invalid {key}={s:?}. {e}"))?;
            Ok(Some(t))
        }
    }
}
