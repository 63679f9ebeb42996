//! Severity code resolution.
//!
//! Upstream reports severity as a raw numeric code (the JMA scale).
//! Resolution is a two-stage static lookup: code to human-readable
//! intensity label, then label to CSS class for the presentation layer.
//! Absent or unmapped codes resolve to "Unknown" with no class.

/// Resolved intensity: human-readable label plus optional CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intensity {
    /// Display label, e.g. "5-"; "Unknown" when the code is unmapped.
    pub label: &'static str,

    /// CSS class for the presentation layer; `None` for "Unknown".
    pub css_class: Option<&'static str>,
}

impl Intensity {
    /// Resolves a raw severity code through the two-stage lookup.
    pub fn resolve(code: Option<i32>) -> Self {
        let label = code.and_then(intensity_label);
        match label {
            Some(label) => Self {
                label,
                css_class: intensity_class(label),
            },
            None => Self::unknown(),
        }
    }

    /// The fallback intensity for absent or unmapped codes.
    pub fn unknown() -> Self {
        Self {
            label: "Unknown",
            css_class: None,
        }
    }

    /// Whether this is the "Unknown" fallback.
    pub fn is_unknown(&self) -> bool {
        self.label == "Unknown"
    }
}

/// Stage 1: raw code to intensity label.
fn intensity_label(code: i32) -> Option<&'static str> {
    match code {
        10 => Some("1"),
        20 => Some("2"),
        30 => Some("3"),
        40 => Some("4"),
        45 => Some("5-"),
        50 => Some("5+"),
        55 => Some("6-"),
        60 => Some("6+"),
        70 => Some("7"),
        _ => None,
    }
}

/// Stage 2: intensity label to CSS class.
fn intensity_class(label: &str) -> Option<&'static str> {
    match label {
        "1" => Some("intensity-1"),
        "2" => Some("intensity-2"),
        "3" => Some("intensity-3"),
        "4" => Some("intensity-4"),
        "5-" => Some("intensity-5-minus"),
        "5+" => Some("intensity-5-plus"),
        "6-" => Some("intensity-6-minus"),
        "6+" => Some("intensity-6-plus"),
        "7" => Some("intensity-7"),
        _ => None,
    }
}
