//! Incoming user request record

use super::RecordLookup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attributes of the user/request being targeted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    pub smid: Option<String>,
    pub country: Option<String>,
    pub operating_system: Option<String>,
    pub client_version: Option<String>,
    pub browser: Option<String>,
    pub browser_version: Option<String>,
    pub device_type: Option<String>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub device_id: Option<String>,
    pub app_version: Option<String>,
    pub platform: Option<String>,
    pub carrier: Option<String>,
    pub network_type: Option<String>,
    pub screen_resolution: Option<String>,
    pub device_model: Option<String>,
    pub os_version: Option<String>,

    /// Values for keys outside the fixed attribute set
    pub custom_fields: HashMap<String, String>,
}

impl UserRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value by lookup key; unknown keys go to custom fields
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a value by lookup key; unknown keys go to custom fields
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.slot_mut(key) {
            Some(slot) => *slot = Some(value),
            None => {
                self.custom_fields.insert(key.to_string(), value);
            }
        }
    }

    fn slot(&self, key: &str) -> Option<&Option<String>> {
        let slot = match key {
            "SMID" => &self.smid,
            "COUNTRY" => &self.country,
            "OPERATING_SYSTEM" => &self.operating_system,
            "CLIENT_VERSION" => &self.client_version,
            "BROWSER" => &self.browser,
            "BROWSER_VERSION" => &self.browser_version,
            "DEVICE_TYPE" => &self.device_type,
            "LANGUAGE" => &self.language,
            "TIMEZONE" => &self.timezone,
            "USER_AGENT" => &self.user_agent,
            "IP_ADDRESS" => &self.ip_address,
            "SESSION_ID" => &self.session_id,
            "USER_ID" => &self.user_id,
            "DEVICE_ID" => &self.device_id,
            "APP_VERSION" => &self.app_version,
            "PLATFORM" => &self.platform,
            "CARRIER" => &self.carrier,
            "NETWORK_TYPE" => &self.network_type,
            "SCREEN_RESOLUTION" => &self.screen_resolution,
            "DEVICE_MODEL" => &self.device_model,
            "OS_VERSION" => &self.os_version,
            _ => return None,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        let slot = match key {
            "SMID" => &mut self.smid,
            "COUNTRY" => &mut self.country,
            "OPERATING_SYSTEM" => &mut self.operating_system,
            "CLIENT_VERSION" => &mut self.client_version,
            "BROWSER" => &mut self.browser,
            "BROWSER_VERSION" => &mut self.browser_version,
            "DEVICE_TYPE" => &mut self.device_type,
            "LANGUAGE" => &mut self.language,
            "TIMEZONE" => &mut self.timezone,
            "USER_AGENT" => &mut self.user_agent,
            "IP_ADDRESS" => &mut self.ip_address,
            "SESSION_ID" => &mut self.session_id,
            "USER_ID" => &mut self.user_id,
            "DEVICE_ID" => &mut self.device_id,
            "APP_VERSION" => &mut self.app_version,
            "PLATFORM" => &mut self.platform,
            "CARRIER" => &mut self.carrier,
            "NETWORK_TYPE" => &mut self.network_type,
            "SCREEN_RESOLUTION" => &mut self.screen_resolution,
            "DEVICE_MODEL" => &mut self.device_model,
            "OS_VERSION" => &mut self.os_version,
            _ => return None,
        };
        Some(slot)
    }
}

impl RecordLookup for UserRecord {
    fn lookup(&self, key: &str) -> Option<&str> {
        match self.slot(key) {
            Some(slot) => slot.as_deref(),
            None => self.custom_fields.get(key).map(String::as_str),
        }
    }
}
