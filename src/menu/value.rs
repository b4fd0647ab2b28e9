//! Typed values for configurable menu items.
//!
//! Each configurable item has a [`ConfigSpec`] describing what it accepts and a
//! current [`ConfigValue`]. The two are kept apart so the spec can check values
//! coming back from a dialog or a loaded profile before they are stored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::menu::error::ValueError;

/// The `type` tag written next to each configurable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    Slider,
    Dropdown,
    Toggle,
    Text,
}

impl ConfigKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Slider => "slider",
            Self::Dropdown => "dropdown",
            Self::Toggle => "toggle",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a configurable item accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSpec {
    /// Integer in `min..=max`, adjusted in increments of `step`.
    Slider {
        min: i64,
        max: i64,
        step: i64,
        unit: String,
    },
    /// One of a closed set of `(value, label)` pairs, in display order.
    Dropdown { options: Vec<(String, String)> },
    Toggle,
    Text,
}

impl ConfigSpec {
    pub fn kind(&self) -> ConfigKind {
        match self {
            Self::Slider { .. } => ConfigKind::Slider,
            Self::Dropdown { .. } => ConfigKind::Dropdown,
            Self::Toggle => ConfigKind::Toggle,
            Self::Text => ConfigKind::Text,
        }
    }

    /// Display suffix for the value. Empty for everything but sliders.
    pub fn unit(&self) -> &str {
        match self {
            Self::Slider { unit, .. } => unit,
            _ => "",
        }
    }

    /// Check that `value` has the right shape and lies within bounds.
    pub fn check(&self, value: &ConfigValue) -> Result<(), ValueError> {
        match (self, value) {
            (Self::Slider { min, max, .. }, ConfigValue::Slider(v)) => {
                if (*min..=*max).contains(v) {
                    Ok(())
                } else {
                    Err(ValueError::OutOfRange {
                        value: *v,
                        min: *min,
                        max: *max,
                    })
                }
            }
            (Self::Dropdown { options }, ConfigValue::Dropdown(v)) => {
                if options.iter().any(|(option, _)| option == v) {
                    Ok(())
                } else {
                    Err(ValueError::UnknownOption { value: v.clone() })
                }
            }
            (Self::Toggle, ConfigValue::Toggle(_)) | (Self::Text, ConfigValue::Text(_)) => Ok(()),
            (spec, value) => Err(ValueError::KindMismatch {
                expected: spec.kind(),
                found: value.kind(),
            }),
        }
    }

    /// Step a value the way the left/right keys do in the configure dialog.
    ///
    /// Sliders move by `step` and clamp to their range, dropdowns cycle
    /// through their options, toggles flip. Text is returned unchanged.
    pub fn adjust(&self, value: &ConfigValue, delta: i64) -> ConfigValue {
        match (self, value) {
            (
                Self::Slider {
                    min, max, step, ..
                },
                ConfigValue::Slider(v),
            ) => ConfigValue::Slider(v.saturating_add(delta.saturating_mul(*step)).clamp(*min, *max)),
            (Self::Dropdown { options }, ConfigValue::Dropdown(v)) if !options.is_empty() => {
                let len = options.len() as i64;
                let current = options
                    .iter()
                    .position(|(option, _)| option == v)
                    .map(|idx| idx as i64)
                    .unwrap_or(0);
                let next = (current + delta).rem_euclid(len) as usize;
                ConfigValue::Dropdown(options[next].0.clone())
            }
            (Self::Toggle, ConfigValue::Toggle(v)) if delta != 0 => ConfigValue::Toggle(!v),
            _ => value.clone(),
        }
    }

    /// Human-readable form of `value`, with the dropdown label and slider unit.
    pub fn display(&self, value: &ConfigValue) -> String {
        match (self, value) {
            (Self::Slider { unit, .. }, ConfigValue::Slider(v)) => format!("{v}{unit}"),
            (Self::Dropdown { options }, ConfigValue::Dropdown(v)) => options
                .iter()
                .find(|(option, _)| option == v)
                .map(|(_, label)| label.clone())
                .unwrap_or_else(|| v.clone()),
            (_, ConfigValue::Toggle(true)) => "on".to_string(),
            (_, ConfigValue::Toggle(false)) => "off".to_string(),
            (_, value) => value.to_scalar().to_string(),
        }
    }
}

/// Current value of a configurable item, one shape per [`ConfigKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Slider(i64),
    Dropdown(String),
    Toggle(bool),
    Text(String),
}

impl ConfigValue {
    pub fn kind(&self) -> ConfigKind {
        match self {
            Self::Slider(_) => ConfigKind::Slider,
            Self::Dropdown(_) => ConfigKind::Dropdown,
            Self::Toggle(_) => ConfigKind::Toggle,
            Self::Text(_) => ConfigKind::Text,
        }
    }

    pub fn to_scalar(&self) -> Scalar {
        match self {
            Self::Slider(v) => Scalar::Int(*v),
            Self::Dropdown(v) | Self::Text(v) => Scalar::Str(v.clone()),
            Self::Toggle(v) => Scalar::Bool(*v),
        }
    }

    /// Rebuild a typed value from its written form and `type` tag.
    ///
    /// Dropdown and text values written as bare numbers or booleans are
    /// accepted as strings, since YAML may have read them that way.
    pub fn from_scalar(kind: ConfigKind, scalar: &Scalar) -> Option<Self> {
        match (kind, scalar) {
            (ConfigKind::Slider, Scalar::Int(v)) => Some(Self::Slider(*v)),
            (ConfigKind::Toggle, Scalar::Bool(v)) => Some(Self::Toggle(*v)),
            (ConfigKind::Dropdown, scalar) if !matches!(scalar, Scalar::Bool(_)) => {
                Some(Self::Dropdown(scalar.to_string()))
            }
            (ConfigKind::Text, scalar) => Some(Self::Text(scalar.to_string())),
            _ => None,
        }
    }
}

/// Untyped value as it appears in the profile document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swappiness() -> ConfigSpec {
        ConfigSpec::Slider {
            min: 0,
            max: 100,
            step: 5,
            unit: "%".to_string(),
        }
    }

    fn governor() -> ConfigSpec {
        ConfigSpec::Dropdown {
            options: vec![
                ("performance".to_string(), "Performance".to_string()),
                ("powersave".to_string(), "Power save".to_string()),
                ("schedutil".to_string(), "Scheduler driven".to_string()),
            ],
        }
    }

    #[test]
    fn slider_rejects_values_outside_range() {
        let spec = swappiness();
        assert!(spec.check(&ConfigValue::Slider(100)).is_ok());
        assert_eq!(
            spec.check(&ConfigValue::Slider(101)),
            Err(ValueError::OutOfRange {
                value: 101,
                min: 0,
                max: 100
            })
        );
    }

    #[test]
    fn check_rejects_wrong_kind() {
        let err = swappiness().check(&ConfigValue::Toggle(true)).unwrap_err();
        assert_eq!(
            err,
            ValueError::KindMismatch {
                expected: ConfigKind::Slider,
                found: ConfigKind::Toggle
            }
        );
    }

    #[test]
    fn dropdown_rejects_unknown_option() {
        let spec = governor();
        assert!(spec.check(&ConfigValue::Dropdown("powersave".into())).is_ok());
        assert!(matches!(
            spec.check(&ConfigValue::Dropdown("turbo".into())),
            Err(ValueError::UnknownOption { .. })
        ));
    }

    #[test]
    fn adjust_steps_and_clamps_slider() {
        let spec = swappiness();
        assert_eq!(
            spec.adjust(&ConfigValue::Slider(60), 1),
            ConfigValue::Slider(65)
        );
        assert_eq!(
            spec.adjust(&ConfigValue::Slider(98), 1),
            ConfigValue::Slider(100)
        );
        assert_eq!(
            spec.adjust(&ConfigValue::Slider(3), -1),
            ConfigValue::Slider(0)
        );
    }

    #[test]
    fn adjust_cycles_dropdown_in_both_directions() {
        let spec = governor();
        let first = ConfigValue::Dropdown("performance".into());
        assert_eq!(
            spec.adjust(&first, -1),
            ConfigValue::Dropdown("schedutil".into())
        );
        assert_eq!(
            spec.adjust(&first, 1),
            ConfigValue::Dropdown("powersave".into())
        );
    }

    #[test]
    fn display_uses_dropdown_label_and_slider_unit() {
        assert_eq!(swappiness().display(&ConfigValue::Slider(10)), "10%");
        assert_eq!(
            governor().display(&ConfigValue::Dropdown("powersave".into())),
            "Power save"
        );
        assert_eq!(ConfigSpec::Toggle.display(&ConfigValue::Toggle(false)), "off");
    }

    #[test]
    fn from_scalar_accepts_numeric_dropdown_values() {
        assert_eq!(
            ConfigValue::from_scalar(ConfigKind::Dropdown, &Scalar::Int(2)),
            Some(ConfigValue::Dropdown("2".into()))
        );
        assert_eq!(
            ConfigValue::from_scalar(ConfigKind::Slider, &Scalar::Str("x".into())),
            None
        );
    }
}
