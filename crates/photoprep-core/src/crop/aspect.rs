//! Aspect-ratio presets for the crop tool.

use serde::{Deserialize, Serialize};

/// Fixed selection constraints offered while cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Unconstrained
    #[default]
    #[serde(rename = "free")]
    Free,
    /// 1:1
    #[serde(rename = "1:1")]
    Square,
    /// 4:3 landscape
    #[serde(rename = "4:3")]
    FourThree,
    /// 16:9 landscape
    #[serde(rename = "16:9")]
    SixteenNine,
    /// 4:5 portrait
    #[serde(rename = "4:5")]
    FourFive,
    /// 9:16 portrait
    #[serde(rename = "9:16")]
    NineSixteen,
}

impl AspectRatio {
    /// Every preset in menu order.
    pub const ALL: [AspectRatio; 6] = [
        AspectRatio::Free,
        AspectRatio::Square,
        AspectRatio::FourThree,
        AspectRatio::SixteenNine,
        AspectRatio::FourFive,
        AspectRatio::NineSixteen,
    ];

    /// Width / height, or `None` for free selection.
    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectRatio::Free => None,
            AspectRatio::Square => Some(1.0),
            AspectRatio::FourThree => Some(4.0 / 3.0),
            AspectRatio::SixteenNine => Some(16.0 / 9.0),
            AspectRatio::FourFive => Some(4.0 / 5.0),
            AspectRatio::NineSixteen => Some(9.0 / 16.0),
        }
    }

    /// Menu label, also the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Free => "free",
            AspectRatio::Square => "1:1",
            AspectRatio::FourThree => "4:3",
            AspectRatio::SixteenNine => "16:9",
            AspectRatio::FourFive => "4:5",
            AspectRatio::NineSixteen => "9:16",
        }
    }

    /// Parse a menu label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios() {
        assert_eq!(AspectRatio::Free.ratio(), None);
        assert_eq!(AspectRatio::Square.ratio(), Some(1.0));
        assert!((AspectRatio::NineSixteen.ratio().unwrap() - 0.5625).abs() < 1e-12);
    }

    #[test]
    fn test_labels_round_trip() {
        for ratio in AspectRatio::ALL {
            assert_eq!(AspectRatio::from_label(ratio.label()), Some(ratio));
        }
        assert_eq!(AspectRatio::from_label("FREE"), Some(AspectRatio::Free));
        assert_eq!(AspectRatio::from_label("3:2"), None);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&AspectRatio::SixteenNine).unwrap();
        assert_eq!(json, "\"16:9\"");
    }
}
