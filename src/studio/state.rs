use serde::{Deserialize, Serialize};

/// Which screen is live. Exactly one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppState {
    #[default]
    Idle,
    Processing,
    Complete,
    Error,
}

impl AppState {
    pub fn shows_inputs(&self) -> bool {
        matches!(self, AppState::Idle | AppState::Error)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    #[default]
    Room,
    Furniture,
}

impl ImageSlot {
    pub fn label(&self) -> &'static str {
        match self {
            ImageSlot::Room => "Room Environment",
            ImageSlot::Furniture => "Object to Place",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "m")]
    Meters,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Feet => "ft",
            Unit::Meters => "m",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Unit::Feet => Unit::Meters,
            Unit::Meters => Unit::Feet,
        }
    }
}

/// Room size as typed. Fields stay free text so partial input survives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDimensions {
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub unit: Unit,
}

impl RoomDimensions {
    /// Returned whenever estimation cannot produce a value.
    pub fn fallback() -> Self {
        Self {
            length: "12".to_string(),
            width: "12".to_string(),
            height: "9".to_string(),
            unit: Unit::Feet,
        }
    }

    /// Length and width are what make the value worth sending.
    pub fn is_usable(&self) -> bool {
        !self.length.trim().is_empty() && !self.width.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionField {
    Length,
    Width,
    Height,
}

impl DimensionField {
    pub const ALL: [DimensionField; 3] = [
        DimensionField::Length,
        DimensionField::Width,
        DimensionField::Height,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DimensionField::Length => "Length",
            DimensionField::Width => "Width",
            DimensionField::Height => "Height",
        }
    }

    pub fn get<'a>(&self, dims: &'a RoomDimensions) -> &'a str {
        match self {
            DimensionField::Length => &dims.length,
            DimensionField::Width => &dims.width,
            DimensionField::Height => &dims.height,
        }
    }

    /// Produces a full replacement value with this field changed.
    pub fn with(&self, dims: &RoomDimensions, value: String) -> RoomDimensions {
        let mut next = dims.clone();
        match self {
            DimensionField::Length => next.length = value,
            DimensionField::Width => next.width = value,
            DimensionField::Height => next.height = value,
        }
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StepStatus {
    Pending,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingStep {
    pub id: &'static str,
    pub label: &'static str,
    pub status: StepStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_parse_from_model_json() {
        let dims: RoomDimensions =
            serde_json::from_str(r#"{"length":"14","width":"11","height":"8.5","unit":"m"}"#)
                .unwrap();
        assert_eq!(dims.length, "14");
        assert_eq!(dims.height, "8.5");
        assert_eq!(dims.unit, Unit::Meters);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let parsed = serde_json::from_str::<RoomDimensions>(
            r#"{"length":"1","width":"1","height":"1","unit":"yd"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn usable_requires_length_and_width() {
        let mut dims = RoomDimensions::default();
        assert!(!dims.is_usable());
        dims.length = "10".into();
        assert!(!dims.is_usable());
        dims.width = "9".into();
        assert!(dims.is_usable());
    }

    #[test]
    fn field_edit_replaces_whole_value() {
        let dims = RoomDimensions::fallback();
        let next = DimensionField::Height.with(&dims, "10".into());
        assert_eq!(next.height, "10");
        assert_eq!(next.length, dims.length);
        assert_eq!(dims.height, "9");
    }
}
