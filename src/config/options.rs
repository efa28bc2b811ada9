// src/config/options.rs
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::consts::*;

/// Where and how patiently to talk to the admissions form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    pub url: String,
    pub page_timeout_secs: u64,
    pub submit_timeout_secs: u64,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            url: s!(ORCR_URL),
            page_timeout_secs: FORM_PAGE_TIMEOUT_SECS,
            submit_timeout_secs: FORM_SUBMIT_TIMEOUT_SECS,
        }
    }
}

impl FormOptions {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
    pub fn page_timeout(&self) -> Duration { Duration::from_secs(self.page_timeout_secs) }
    pub fn submit_timeout(&self) -> Duration { Duration::from_secs(self.submit_timeout_secs) }
}

/// Option chain source settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainOptions {
    /// Scheme + host, no trailing slash.
    pub base_url: String,
    pub bootstrap_timeout_secs: u64,
    pub api_timeout_secs: u64,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            base_url: s!(NSE_BASE_URL),
            bootstrap_timeout_secs: CHAIN_BOOTSTRAP_TIMEOUT_SECS,
            api_timeout_secs: CHAIN_API_TIMEOUT_SECS,
        }
    }
}

impl ChainOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
    pub fn bootstrap_timeout(&self) -> Duration { Duration::from_secs(self.bootstrap_timeout_secs) }
    pub fn api_timeout(&self) -> Duration { Duration::from_secs(self.api_timeout_secs) }
}

/// What to ask the admissions form for. Every code is either `"ALL"`
/// or a value taken from the source's own dropdowns.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub round: u32,
    pub institute_type: String,
    pub institute_name: String,
    pub program_name: String,
    pub seat_category: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            round: DEFAULT_ROUND,
            institute_type: s!(SELECT_ALL),
            institute_name: s!(SELECT_ALL),
            program_name: s!(SELECT_ALL),
            seat_category: s!(SELECT_ALL),
        }
    }
}

impl Selection {
    pub fn round(round: u32) -> Self {
        Self { round, ..Self::default() }
    }
    pub fn with_institute_type(mut self, code: impl Into<String>) -> Self {
        self.institute_type = code.into();
        self
    }
    pub fn with_institute(mut self, code: impl Into<String>) -> Self {
        self.institute_name = code.into();
        self
    }
    pub fn with_program(mut self, code: impl Into<String>) -> Self {
        self.program_name = code.into();
        self
    }
    pub fn with_seat_category(mut self, code: impl Into<String>) -> Self {
        self.seat_category = code.into();
        self
    }
}

/// Batch collection knobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectOptions {
    pub workers: usize,
    pub pause_ms: u64,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self { workers: WORKERS, pause_ms: REQUEST_PAUSE_MS }
    }
}
