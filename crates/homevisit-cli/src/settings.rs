//! Backend URL configuration
//!
//! URLs are resolved from, in order of precedence, command-line flags,
//! environment variables, and the settings file. The settings file is a
//! small JSON object:
//!
//! ```json
//! {
//!   "registry_url": "https://script.example.com/registry/exec",
//!   "transfer_url": "https://script.example.com/p1/exec"
//! }
//! ```

use std::{fs, io, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::util;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Registry backend serving and updating the patient list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,
    /// Transfer backend importing patients into the second system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_url: Option<String>,
}

impl Settings {
    /// Loads settings from `path`; a missing file yields empty settings.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match fs::metadata(path) {
            Ok(_) => util::read_json_file("settings", path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file");
                Ok(Self::default())
            }
            Err(e) => Err(e)
                .with_context(|| format!("Failed to access settings file: {}", path.display())),
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;
        tracing::info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Replaces each URL that has an override.
    #[must_use]
    pub fn with_overrides(self, registry_url: Option<String>, transfer_url: Option<String>) -> Self {
        Self {
            registry_url: registry_url.or(self.registry_url),
            transfer_url: transfer_url.or(self.transfer_url),
        }
    }

    pub fn registry_url(&self) -> anyhow::Result<&str> {
        self.registry_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .context("Registry backend URL not configured (use --registry-url, HOMEVISIT_REGISTRY_URL, or `settings set`)")
    }

    pub fn transfer_url(&self) -> anyhow::Result<&str> {
        self.transfer_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .context("Transfer backend URL not configured (use --transfer-url, HOMEVISIT_TRANSFER_URL, or `settings set`)")
    }
}
