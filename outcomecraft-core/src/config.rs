//! Configuration system for extraction and presentation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::extract::ExtractionOptions;
use crate::format::FormatOptions;
use crate::present::style::{TableStyle, is_valid_color};
use crate::reader::LoaderOptions;

/// Main configuration, read from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomesConfig {
    #[serde(default)]
    pub extraction: ExtractionOptions,
    #[serde(default)]
    pub loader: LoaderOptions,
    #[serde(default)]
    pub format: FormatOptions,
    #[serde(default)]
    pub style: TableStyle,
    /// Outcome names keyed by file stem
    #[serde(default)]
    pub names: HashMap<String, String>,
}

impl OutcomesConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: OutcomesConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Reject settings that cannot describe a usable layout or style
    pub fn validate(&self) -> Result<()> {
        let extraction = &self.extraction;
        if extraction.scan_limit == 0 {
            anyhow::bail!("Configuration error: extraction.scan_limit must be at least 1");
        }

        let [first, second] = extraction.cohort_offsets;
        if first == 0 || second == 0 {
            anyhow::bail!(
                "Configuration error: extraction.cohort_offsets must point below the header row"
            );
        }
        if first == second {
            anyhow::bail!(
                "Configuration error: extraction.cohort_offsets must name two different rows"
            );
        }

        for (key, offset) in [
            ("risk_difference_offset", extraction.risk_difference_offset),
            ("risk_ratio_offset", extraction.risk_ratio_offset),
            ("odds_ratio_offset", extraction.odds_ratio_offset),
        ] {
            if offset == 0 || offset == first || offset == second {
                anyhow::bail!(
                    "Configuration error: extraction.{} ({}) overlaps the header or cohort rows",
                    key,
                    offset
                );
            }
        }

        for (key, value) in self.style.colors() {
            // An empty stripe color turns striping off.
            if key == "stripe_background" && value.is_empty() {
                continue;
            }
            if !is_valid_color(value) {
                anyhow::bail!(
                    "Configuration error: style.{} '{}' is not a #rgb, #rrggbb or named color",
                    key,
                    value
                );
            }
        }

        if self.style.font_family.contains(['"', ';', '<', '>']) {
            anyhow::bail!(
                "Configuration error: style.font_family '{}' contains characters not allowed in CSS",
                self.style.font_family
            );
        }

        Ok(())
    }

    /// Outcome name override for a file stem, if configured
    pub fn outcome_name_for(&self, stem: &str) -> Option<&str> {
        self.names.get(stem).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionStrategy;
    use crate::format::RiskStyle;
    use crate::reader::TextEncoding;

    #[test]
    fn test_default_is_valid() {
        assert!(OutcomesConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = OutcomesConfig::from_toml_str(
            r##"
[extraction]
strategy = "fixed-offset"
fixed_header_row = 12
risk_ratio_offset = 10
odds_ratio_offset = 14

[loader]
encoding = "auto"

[format]
risk_style = "decimal"
risk_decimals = 3
show_p_values = false

[style]
header_background = "#003366"
header_text = "white"
stripe_background = ""

[names]
"stroke_export" = "Ischemic stroke"
"##,
        )
        .unwrap();

        assert_eq!(config.extraction.strategy, ExtractionStrategy::FixedOffset);
        assert_eq!(config.extraction.fixed_header_row, 12);
        assert_eq!(config.extraction.risk_difference_offset, 6);
        assert_eq!(config.extraction.risk_ratio_offset, 10);
        assert_eq!(config.loader.encoding, TextEncoding::Auto);
        assert_eq!(config.format.risk_style, RiskStyle::Decimal);
        assert_eq!(config.format.stat_decimals, 2);
        assert!(!config.format.show_p_values);
        assert_eq!(config.style.header_text, "white");
        assert_eq!(config.style.font_size_px, 16);
        assert_eq!(
            config.outcome_name_for("stroke_export"),
            Some("Ischemic stroke")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = OutcomesConfig::from_toml_str("").unwrap();
        assert_eq!(config, OutcomesConfig::default());
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        assert!(OutcomesConfig::from_toml_str("[extraction]\nstrategy = \"guess\"").is_err());
    }

    #[test]
    fn test_validation() {
        let mut bad = OutcomesConfig::default();
        bad.extraction.scan_limit = 0;
        assert!(bad.validate().is_err());

        let mut bad = OutcomesConfig::default();
        bad.extraction.cohort_offsets = [1, 1];
        assert!(bad.validate().is_err());

        let mut bad = OutcomesConfig::default();
        bad.extraction.cohort_offsets = [0, 1];
        assert!(bad.validate().is_err());

        let mut bad = OutcomesConfig::default();
        bad.extraction.odds_ratio_offset = 2;
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("odds_ratio_offset"));

        let mut bad = OutcomesConfig::default();
        bad.style.border_color = "url(javascript:x)".to_string();
        assert!(bad.validate().is_err());

        let mut bad = OutcomesConfig::default();
        bad.style.font_family = "Arial; background:red".to_string();
        assert!(bad.validate().is_err());

        let mut ok = OutcomesConfig::default();
        ok.style.stripe_background = String::new();
        assert!(ok.validate().is_ok());
    }
}
