//! Canvas aspect ratios and their canonical pixel dimensions.
//!
//! Every ratio has two tiers of dimensions:
//! - **Preview**: the small reference canvas the interactive editor works in.
//!   Placement offsets and border thickness are authored in these units.
//! - **Export base**: the 1080p-class size the export tiers multiply.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an aspect ratio identifier is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown aspect ratio: {0}")]
pub struct AspectRatioError(pub String);

/// Supported canvas aspect ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1, Instagram post.
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// 3:4 portrait photo.
    #[serde(rename = "3:4")]
    Portrait,
    /// 4:3 landscape photo.
    #[serde(rename = "4:3")]
    Landscape,
    /// 4:5 Instagram portrait.
    #[serde(rename = "4:5")]
    PortraitPlus,
    /// 9:16 story format.
    #[serde(rename = "9:16")]
    Story,
    /// 16:9 widescreen.
    #[serde(rename = "16:9")]
    Widescreen,
}

impl AspectRatio {
    /// All ratios in the order the selector presents them.
    pub const ALL: [AspectRatio; 6] = [
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
        AspectRatio::PortraitPlus,
        AspectRatio::Story,
        AspectRatio::Widescreen,
    ];

    /// The identifier used by the UI, e.g. `"16:9"`.
    pub fn id(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::PortraitPlus => "4:5",
            AspectRatio::Story => "9:16",
            AspectRatio::Widescreen => "16:9",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectRatio::Square => "Square",
            AspectRatio::Portrait => "Portrait",
            AspectRatio::Landscape => "Landscape",
            AspectRatio::PortraitPlus => "Portrait+",
            AspectRatio::Story => "Story",
            AspectRatio::Widescreen => "Widescreen",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AspectRatio::Square => "Instagram Post",
            AspectRatio::Portrait | AspectRatio::Landscape => "Standard Photo",
            AspectRatio::PortraitPlus => "Instagram Portrait",
            AspectRatio::Story => "Instagram/TikTok",
            AspectRatio::Widescreen => "YouTube/TV",
        }
    }

    /// Nominal width:height as a pair of small integers.
    pub fn nominal(self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1, 1),
            AspectRatio::Portrait => (3, 4),
            AspectRatio::Landscape => (4, 3),
            AspectRatio::PortraitPlus => (4, 5),
            AspectRatio::Story => (9, 16),
            AspectRatio::Widescreen => (16, 9),
        }
    }

    /// Preview canvas dimensions `(width, height)`.
    pub fn preview_dimensions(self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (400, 400),
            AspectRatio::Portrait => (400, 533),
            AspectRatio::Landscape => (533, 400),
            AspectRatio::PortraitPlus => (400, 500),
            AspectRatio::Story => (360, 640),
            AspectRatio::Widescreen => (640, 360),
        }
    }

    /// Export canvas dimensions at the 1× tier.
    pub fn export_base_dimensions(self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1080, 1080),
            AspectRatio::Portrait => (1080, 1440),
            AspectRatio::Landscape => (1440, 1080),
            AspectRatio::PortraitPlus => (1080, 1350),
            AspectRatio::Story => (1080, 1920),
            AspectRatio::Widescreen => (1920, 1080),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.id() == s.trim())
            .ok_or_else(|| AspectRatioError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio_of((w, h): (u32, u32)) -> f64 {
        w as f64 / h as f64
    }

    #[test]
    fn test_dimensions_match_nominal_ratio() {
        for ratio in AspectRatio::ALL {
            let nominal = ratio_of(ratio.nominal());
            let preview = ratio_of(ratio.preview_dimensions());
            let export = ratio_of(ratio.export_base_dimensions());

            assert!(
                (preview - nominal).abs() / nominal < 1e-3,
                "{ratio} preview ratio {preview} != {nominal}"
            );
            assert!(
                (export - nominal).abs() / nominal < 1e-3,
                "{ratio} export ratio {export} != {nominal}"
            );
        }
    }

    #[test]
    fn test_parse_round_trips_ids() {
        for ratio in AspectRatio::ALL {
            assert_eq!(ratio.id().parse::<AspectRatio>(), Ok(ratio));
        }
    }

    #[test]
    fn test_parse_unknown_fails() {
        let err = "2:1".parse::<AspectRatio>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown aspect ratio: 2:1");
    }

    #[test]
    fn test_default_is_square() {
        assert_eq!(AspectRatio::default(), AspectRatio::Square);
        assert_eq!(AspectRatio::default().preview_dimensions(), (400, 400));
    }

    #[test]
    fn test_labels() {
        assert_eq!(AspectRatio::Story.name(), "Story");
        assert_eq!(AspectRatio::Widescreen.description(), "YouTube/TV");
    }
}
