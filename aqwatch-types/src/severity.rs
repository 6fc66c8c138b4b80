//! AQI severity bands and the classifier.

use std::fmt;

/// One of the six discrete AQI classification levels, ordered from least
/// to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// AQI 0 to 50.
    Good,
    /// AQI 51 to 100.
    Moderate,
    /// AQI 101 to 150.
    UnhealthySensitive,
    /// AQI 151 to 200.
    Unhealthy,
    /// AQI 201 to 300.
    VeryUnhealthy,
    /// AQI above 300.
    Hazardous,
}

/// Classify an AQI value into its severity band.
///
/// Band upper bounds are inclusive, so 50, 100, 150, 200 and 300 fall into
/// the lower band.
pub fn classify(aqi: u32) -> Severity {
    match aqi {
        0..=50 => Severity::Good,
        51..=100 => Severity::Moderate,
        101..=150 => Severity::UnhealthySensitive,
        151..=200 => Severity::Unhealthy,
        201..=300 => Severity::VeryUnhealthy,
        _ => Severity::Hazardous,
    }
}

impl Severity {
    /// Every band in ascending order.
    pub const ALL: [Severity; 6] = [
        Severity::Good,
        Severity::Moderate,
        Severity::UnhealthySensitive,
        Severity::Unhealthy,
        Severity::VeryUnhealthy,
        Severity::Hazardous,
    ];

    /// Inclusive upper AQI bound of the band, `None` for the open-ended top band.
    pub fn upper_bound(&self) -> Option<u32> {
        match self {
            Severity::Good => Some(50),
            Severity::Moderate => Some(100),
            Severity::UnhealthySensitive => Some(150),
            Severity::Unhealthy => Some(200),
            Severity::VeryUnhealthy => Some(300),
            Severity::Hazardous => None,
        }
    }

    /// Human-readable band name.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Good => "Good",
            Severity::Moderate => "Moderate",
            Severity::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            Severity::Unhealthy => "Unhealthy",
            Severity::VeryUnhealthy => "Very Unhealthy",
            Severity::Hazardous => "Hazardous",
        }
    }

    /// Short label for narrow table cells.
    pub fn short_label(&self) -> &'static str {
        match self {
            Severity::Good => "GOOD",
            Severity::Moderate => "MOD",
            Severity::UnhealthySensitive => "USG",
            Severity::Unhealthy => "UNHL",
            Severity::VeryUnhealthy => "V.UNHL",
            Severity::Hazardous => "HAZ",
        }
    }

    /// Display color of the band as an RGB triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Severity::Good => (0x22, 0xc5, 0x5e),
            Severity::Moderate => (0xea, 0xb3, 0x08),
            Severity::UnhealthySensitive => (0xf9, 0x73, 0x16),
            Severity::Unhealthy => (0xef, 0x44, 0x44),
            Severity::VeryUnhealthy => (0xa8, 0x55, 0xf7),
            Severity::Hazardous => (0x7f, 0x1d, 0x1d),
        }
    }

    /// Display color of the band as a `#rrggbb` string.
    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_good_range() {
        for aqi in 0..=50 {
            assert_eq!(classify(aqi), Severity::Good, "aqi {}", aqi);
        }
        assert_eq!(classify(51), Severity::Moderate);
    }

    #[test]
    fn test_boundaries_belong_to_lower_band() {
        assert_eq!(classify(100), Severity::Moderate);
        assert_eq!(classify(101), Severity::UnhealthySensitive);
        assert_eq!(classify(150), Severity::UnhealthySensitive);
        assert_eq!(classify(151), Severity::Unhealthy);
        assert_eq!(classify(200), Severity::Unhealthy);
        assert_eq!(classify(201), Severity::VeryUnhealthy);
        assert_eq!(classify(300), Severity::VeryUnhealthy);
    }

    #[test]
    fn test_hazardous_is_open_ended() {
        for aqi in [301, 500, 999, u32::MAX] {
            assert_eq!(classify(aqi), Severity::Hazardous);
        }
    }

    #[test]
    fn test_upper_bounds_agree_with_classifier() {
        for band in Severity::ALL {
            if let Some(bound) = band.upper_bound() {
                assert_eq!(classify(bound), band);
                assert!(classify(bound + 1) > band);
            }
        }
    }

    #[test]
    fn test_each_band_has_a_distinct_color() {
        let mut colors: Vec<String> = Severity::ALL.iter().map(|s| s.hex()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), Severity::ALL.len());
        assert_eq!(Severity::Good.hex(), "#22c55e");
    }

    #[test]
    fn test_bands_are_ordered_by_severity() {
        assert!(Severity::ALL.windows(2).all(|w| w[0] < w[1]));
    }
}
