use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_ITEMS: [&str; 7] = [
    "Caneta",
    "10% de desconto",
    "Caderneta",
    "Garrafa",
    "5% de desconto",
    "Tente novamente",
    "Perdeu a vez",
];

// Brand palette derived from #00727A
pub const DEFAULT_PALETTE: [&str; 7] = [
    "#7ec4c6", "#55b2b4", "#2ca0a2", "#138990", "#0a6f74", "#08595d", "#064347",
];

pub const DEFAULT_DAILY_LIMITS: [(&str, u32); 3] = [
    ("Garrafa", 20),
    ("Caneta", 50),
    ("Caderneta", 15),
];

pub const SPIN_DURATION_MS: f64 = 2000.0;
pub const SPIN_TURNS: u32 = 12;

/// Which deployment the wheel runs in.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WheelVariant {
    /// Daily quotas persisted in the browser, no registration.
    #[default]
    Standalone,
    /// A name/phone lead must be registered before each spin.
    LeadGated,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WheelConfig {
    pub items: Vec<String>,
    pub palette: Vec<String>,
    pub daily_limits: BTreeMap<String, u32>,
    pub spin_turns: u32,
    pub spin_duration_ms: f64,
    pub variant: WheelVariant,
    pub shuffle: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            items: DEFAULT_ITEMS.iter().map(|s| s.to_string()).collect(),
            palette: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
            daily_limits: DEFAULT_DAILY_LIMITS
                .iter()
                .map(|(label, limit)| (label.to_string(), *limit))
                .collect(),
            spin_turns: SPIN_TURNS,
            spin_duration_ms: SPIN_DURATION_MS,
            variant: WheelVariant::default(),
            shuffle: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    NoItems,
    EmptyPalette,
    ZeroTurns,
    InvalidDuration,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Invalid wheel configuration: {}", e),
            Self::NoItems => write!(f, "Wheel needs at least one item"),
            Self::EmptyPalette => write!(f, "Wheel palette is empty"),
            Self::ZeroTurns => write!(f, "Spin must make at least one full turn"),
            Self::InvalidDuration => write!(f, "Spin duration must be a positive number of milliseconds"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl WheelConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items.is_empty() {
            return Err(ConfigError::NoItems);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.spin_turns == 0 {
            return Err(ConfigError::ZeroTurns);
        }
        if !(self.spin_duration_ms.is_finite() && self.spin_duration_ms > 0.0) {
            return Err(ConfigError::InvalidDuration);
        }
        Ok(())
    }

    pub fn is_lead_gated(&self) -> bool {
        self.variant == WheelVariant::LeadGated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wheel_setup() {
        let config = WheelConfig::default();
        assert_eq!(config.items.len(), 7);
        assert_eq!(config.daily_limits.get("Garrafa"), Some(&20));
        assert_eq!(config.daily_limits.get("Tente novamente"), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = WheelConfig::from_json(r#"{"variant":"lead_gated","spin_turns":3}"#).unwrap();
        assert!(config.is_lead_gated());
        assert_eq!(config.spin_turns, 3);
        assert_eq!(config.spin_duration_ms, SPIN_DURATION_MS);
    }

    #[test]
    fn rejects_unusable_configs() {
        assert_eq!(WheelConfig::from_json(r#"{"items":[]}"#), Err(ConfigError::NoItems));
        assert_eq!(WheelConfig::from_json(r#"{"spin_turns":0}"#), Err(ConfigError::ZeroTurns));
        assert!(matches!(WheelConfig::from_json("not json"), Err(ConfigError::Parse(_))));
    }
}
