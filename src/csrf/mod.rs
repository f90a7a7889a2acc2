//! CSRF header negotiation.
//!
//! A single preflight learns which header name and token the backend
//! expects; the pair is then appended to outbound requests. There is no
//! retry and no refresh. Transport is supplied by the host through
//! [`PreflightClient`].

use crate::error::{LayoutError, Result};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};

pub const HEADER_NAME_KEY: &str = "X-CSRF-HEADER";
pub const HEADER_VALUE_KEY: &str = "X-CSRF-TOKEN";

const LOG_TARGET: &str = "layout_sync::csrf";

/// Response headers, as returned by a preflight.
pub type HeaderList = Vec<(String, String)>;

/// Performs the preflight `HEAD` request against `url`.
pub trait PreflightClient {
    fn head(&self, url: &str) -> Result<HeaderList>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfHeaders {
    head_url: String,
    header_name: String,
    header_value: String,
}

impl CsrfHeaders {
    pub fn negotiate<C>(
        client: &C,
        head_url: impl Into<String>,
        logger: Option<&Logger>,
    ) -> Result<Self>
    where
        C: PreflightClient + ?Sized,
    {
        let head_url = head_url.into();
        let headers = client.head(&head_url)?;
        let header_name = find_header(&headers, HEADER_NAME_KEY)?;
        let header_value = find_header(&headers, HEADER_VALUE_KEY)?;

        if let Some(logger) = logger {
            let event = event_with_fields(
                LogLevel::Debug,
                LOG_TARGET,
                "csrf_negotiated",
                [
                    json_kv("url", head_url.as_str()),
                    json_kv("header_name", header_name.as_str()),
                    json_kv("header_count", headers.len()),
                ],
            );
            let _ = logger.log_event(event);
        }

        Ok(Self {
            head_url,
            header_name,
            header_value,
        })
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.header_name = name.into();
        self.header_value = value.into();
    }

    pub fn head_url(&self) -> &str {
        &self.head_url
    }

    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    pub fn header_value(&self) -> &str {
        &self.header_value
    }

    /// Append the negotiated pair to an outbound header list.
    pub fn apply(&self, headers: &mut HeaderList) {
        headers.push((self.header_name.clone(), self.header_value.clone()));
    }
}

fn find_header(headers: &HeaderList, key: &str) -> Result<String> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value.clone())
        .ok_or_else(|| LayoutError::CsrfHeaderMissing(key.to_string()))
}
