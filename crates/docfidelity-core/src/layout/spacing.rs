//! Inter-word gap classification.

use serde::{Deserialize, Serialize};

/// Gap bands, in the container's units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingThresholds {
    /// Gaps above this (and up to `wide_gap`) are medium.
    pub medium_gap: f64,

    /// Gaps above this are tab-like.
    pub wide_gap: f64,

    /// Non-breaking spaces emitted for a medium gap.
    pub medium_nbsp: usize,

    /// Non-breaking spaces emitted for a tab-like gap.
    pub wide_nbsp: usize,
}

impl Default for SpacingThresholds {
    fn default() -> Self {
        Self {
            medium_gap: 20.0,
            wide_gap: 40.0,
            medium_nbsp: 2,
            wide_nbsp: 5,
        }
    }
}

/// Spacing class of a gap, ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpacingClass {
    /// Words touch or overlap.
    None,
    /// Ordinary word spacing.
    Normal,
    /// Medium spacing.
    Wide,
    /// Tab-like spacing.
    Tab,
}

impl SpacingClass {
    /// HTML separator placed between two words.
    ///
    /// `None` still yields one space so adjacent tokens never fuse.
    pub fn separator(self, thresholds: &SpacingThresholds) -> &'static str {
        match self {
            SpacingClass::None | SpacingClass::Normal => " ",
            SpacingClass::Wide => nbsp(thresholds.medium_nbsp),
            SpacingClass::Tab => nbsp(thresholds.wide_nbsp),
        }
    }
}

/// Classify the horizontal gap between two consecutive words.
pub fn spacing_class(gap: f64, thresholds: &SpacingThresholds) -> SpacingClass {
    if gap.is_nan() || gap <= 0.0 {
        SpacingClass::None
    } else if gap <= thresholds.medium_gap {
        SpacingClass::Normal
    } else if gap <= thresholds.wide_gap {
        SpacingClass::Wide
    } else {
        SpacingClass::Tab
    }
}

const NBSP_RUN: &str = "&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;";

fn nbsp(count: usize) -> &'static str {
    let count = count.clamp(1, NBSP_RUN.len() / 6);
    &NBSP_RUN[..count * 6]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spacing_bands() {
        let t = SpacingThresholds::default();
        assert_eq!(spacing_class(-3.0, &t), SpacingClass::None);
        assert_eq!(spacing_class(0.0, &t), SpacingClass::None);
        assert_eq!(spacing_class(4.0, &t), SpacingClass::Normal);
        assert_eq!(spacing_class(20.0, &t), SpacingClass::Normal);
        assert_eq!(spacing_class(20.5, &t), SpacingClass::Wide);
        assert_eq!(spacing_class(40.0, &t), SpacingClass::Wide);
        assert_eq!(spacing_class(40.5, &t), SpacingClass::Tab);
    }

    #[test]
    fn test_spacing_is_monotonic() {
        let t = SpacingThresholds::default();
        let gaps = [-1.0, 0.0, 0.5, 10.0, 19.9, 20.0, 21.0, 35.0, 40.0, 41.0, 200.0];
        let classes: Vec<SpacingClass> = gaps.iter().map(|g| spacing_class(*g, &t)).collect();
        for pair in classes.windows(2) {
            assert!(pair[0] <= pair[1], "{:?} after {:?}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_separators() {
        let t = SpacingThresholds::default();
        assert_eq!(SpacingClass::None.separator(&t), " ");
        assert_eq!(SpacingClass::Normal.separator(&t), " ");
        assert_eq!(SpacingClass::Wide.separator(&t), "&nbsp;&nbsp;");
        assert_eq!(SpacingClass::Tab.separator(&t), "&nbsp;".repeat(5));
    }

    #[test]
    fn test_nan_gap_is_none() {
        assert_eq!(
            spacing_class(f64::NAN, &SpacingThresholds::default()),
            SpacingClass::None
        );
    }
}
