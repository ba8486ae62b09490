//! Site configuration
//!
//! The configuration ships embedded in the binary (`config/site.toml`) and is
//! parsed once at startup. Every field has a serde default, so the file only
//! needs to list what differs from the stock behavior.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use folio_types::{SectionDescriptor, SectionId};

use crate::serde_defaults::*;

const EMBEDDED_SITE_CONFIG: &str = include_str!("../config/site.toml");

/// Errors while loading embedded TOML documents
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse {document}")]
    Parse {
        document: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("section {0} is listed more than once")]
    DuplicateSection(SectionId),

    #[error("no navigation sections configured")]
    NoSections,
}

impl ConfigError {
    /// The message plus every underlying cause, so parse errors keep their
    /// line and column.
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(cause.to_string().trim_end());
            source = cause.source();
        }
        detail
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionDescriptor>,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub performance: PerformanceSettings,
    #[serde(default)]
    pub contact: ContactSettings,
    #[serde(default)]
    pub monitor: MonitorSettings,
    #[serde(default)]
    pub gestures: GestureSettings,
    #[serde(default)]
    pub animation: AnimationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_header_height")]
    pub header_height: u32,
    #[serde(default = "default_scroll_offset")]
    pub scroll_offset: u32,
    /// Scroll distance after which the header gets its shadow
    #[serde(default = "default_sticky_threshold")]
    pub sticky_threshold: u32,
    #[serde(default = "default_lazy_load_offset")]
    pub lazy_load_offset: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSettings {
    #[serde(default = "default_debounce_delay")]
    pub debounce_delay: u32,
    #[serde(default = "default_throttle_delay")]
    pub throttle_delay: u32,
    #[serde(default = "default_image_load_timeout")]
    pub image_load_timeout: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSettings {
    #[serde(default = "default_submit_delay")]
    pub submit_delay: u32,
    #[serde(default = "default_success_banner")]
    pub success_banner: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    #[serde(default = "default_interaction_capacity")]
    pub interaction_capacity: usize,
    #[serde(default = "default_error_capacity")]
    pub error_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureSettings {
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    #[serde(default = "default_double_tap_window")]
    pub double_tap_window: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSettings {
    #[serde(default = "default_animation_duration")]
    pub duration: u32,
    #[serde(default = "default_stagger_step")]
    pub stagger_step: u32,
    #[serde(default = "default_parallax_speed")]
    pub parallax_speed: f64,
}

fn default_sections() -> Vec<SectionDescriptor> {
    let entries = [
        (SectionId::Home, "Home", "house"),
        (SectionId::About, "About", "user"),
        (SectionId::Projects, "Projects", "folder"),
        (SectionId::Experience, "Experience", "briefcase"),
        (SectionId::Leadership, "Leadership", "star"),
        (SectionId::Education, "Education", "graduation-cap"),
        (SectionId::Contact, "Contact", "envelope"),
    ];
    entries
        .into_iter()
        .map(|(id, name, icon)| SectionDescriptor {
            id,
            name: name.to_string(),
            icon: icon.to_string(),
        })
        .collect()
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            header_height: default_header_height(),
            scroll_offset: default_scroll_offset(),
            sticky_threshold: default_sticky_threshold(),
            lazy_load_offset: default_lazy_load_offset(),
        }
    }
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            debounce_delay: default_debounce_delay(),
            throttle_delay: default_throttle_delay(),
            image_load_timeout: default_image_load_timeout(),
        }
    }
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            submit_delay: default_submit_delay(),
            success_banner: default_success_banner(),
        }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interaction_capacity: default_interaction_capacity(),
            error_capacity: default_error_capacity(),
        }
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            swipe_threshold: default_swipe_threshold(),
            double_tap_window: default_double_tap_window(),
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration: default_animation_duration(),
            stagger_step: default_stagger_step(),
            parallax_speed: default_parallax_speed(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            layout: LayoutSettings::default(),
            performance: PerformanceSettings::default(),
            contact: ContactSettings::default(),
            monitor: MonitorSettings::default(),
            gestures: GestureSettings::default(),
            animation: AnimationSettings::default(),
        }
    }
}

impl SiteConfig {
    /// Parse the configuration compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml_str(EMBEDDED_SITE_CONFIG)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            document: "site.toml",
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::NoSections);
        }
        let mut seen = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            if seen.contains(&section.id) {
                return Err(ConfigError::DuplicateSection(section.id));
            }
            seen.push(section.id);
        }
        Ok(())
    }

    /// Navigation label for a section, falling back to its anchor
    pub fn section_name(&self, id: SectionId) -> &str {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
            .unwrap_or(id.anchor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_detail_keeps_location() {
        let err = SiteConfig::from_toml_str("[layout]\nheader_height = \"tall\"").unwrap_err();
        let detail = err.detail();
        assert!(detail.starts_with("failed to parse site.toml: "));
        assert!(detail.contains("line 2"), "{detail}");
        assert!(detail.len() > err.to_string().len());
    }

    #[test]
    fn validation_error_detail_is_the_message() {
        let err = SiteConfig::from_toml_str("sections = []").unwrap_err();
        assert_eq!(err.detail(), "no navigation sections configured");
    }

    #[test]
    fn embedded_config_parses() {
        let config = SiteConfig::embedded().unwrap();
        assert_eq!(config.sections.len(), 7);
        assert_eq!(config.layout.header_height, 80);
        assert_eq!(config.performance.throttle_delay, 100);
        assert_eq!(config.monitor.interaction_capacity, 100);
        assert_eq!(config.monitor.error_capacity, 50);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let config = SiteConfig::from_toml_str("[layout]\nheader_height = 64\n").unwrap();
        assert_eq!(config.layout.header_height, 64);
        assert_eq!(config.layout.scroll_offset, 100);
        assert_eq!(config.contact.submit_delay, 2000);
    }

    #[test]
    fn duplicate_sections_are_rejected() {
        let text = r#"
            [[sections]]
            id = "home"
            name = "Home"

            [[sections]]
            id = "home"
            name = "Again"
        "#;
        let err = SiteConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSection(SectionId::Home)));
    }

    #[test]
    fn malformed_document_reports_parse_error() {
        let err = SiteConfig::from_toml_str("[layout\nheader_height = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn section_name_falls_back_to_anchor() {
        let mut config = SiteConfig::default();
        config.sections.retain(|s| s.id != SectionId::Leadership);
        assert_eq!(config.section_name(SectionId::About), "About");
        assert_eq!(config.section_name(SectionId::Leadership), "leadership");
    }
}
