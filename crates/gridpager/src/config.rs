#![forbid(unsafe_code)]

//! Construction-time configuration.
//!
//! [`PagerConfig`] is plain data with builder-style setters. Construction
//! only checks preconditions with `debug_assert!`; hosts that load
//! configuration from outside can call [`PagerConfig::validate`] first and
//! get a [`ConfigError`] instead.

use gridpager_core::animation::SettleCurve;
use gridpager_core::geometry::Axis;
use gridpager_core::gesture::DragRecognizerConfig;
use thiserror::Error;

use crate::drag::ThresholdRatios;
use crate::extent::{AxisExtent, GridExtent};
use crate::index::PageIndex;

/// Why a [`PagerConfig`] was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("initial {axis:?} page {page} is outside 0..{total}")]
    InitialPageOutOfRange { axis: Axis, page: i64, total: u32 },
    #[error("{axis:?} axis is configured with zero pages")]
    EmptyExtent { axis: Axis },
    #[error("{axis:?} threshold ratio {ratio} must be in (0, 1]")]
    InvalidThreshold { axis: Axis, ratio: f64 },
    #[cfg(feature = "serde")]
    #[error("failed to parse pager config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything a pager is built from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PagerConfig {
    pub initial_horizontal_page: i64,
    pub initial_vertical_page: i64,
    /// `None` makes the horizontal axis unbounded.
    pub total_horizontal_pages: Option<u32>,
    /// `None` makes the vertical axis unbounded.
    pub total_vertical_pages: Option<u32>,
    pub horizontal_threshold_ratio: f64,
    pub vertical_threshold_ratio: f64,
    /// Curve for sliding to the neighbor page.
    pub transition: SettleCurve,
    /// Curve for bouncing back.
    pub cancel_curve: SettleCurve,
    /// Clip neighbor cells to the viewport.
    pub enable_clipping: bool,
    /// Publish per-cell visibility to the context every frame.
    pub enable_page_visibility: bool,
    /// Materialize two neighbors per side instead of one.
    pub bounce: bool,
    /// Pointer recognition used by [`Pager::handle_pointer`](crate::Pager::handle_pointer).
    pub recognizer: DragRecognizerConfig,
}

impl Default for PagerConfig {
    fn default() -> Self {
        let ratios = ThresholdRatios::default();
        Self {
            initial_horizontal_page: 0,
            initial_vertical_page: 0,
            total_horizontal_pages: None,
            total_vertical_pages: None,
            horizontal_threshold_ratio: ratios.horizontal,
            vertical_threshold_ratio: ratios.vertical,
            transition: SettleCurve::default(),
            cancel_curve: SettleCurve::bouncy(),
            enable_clipping: true,
            enable_page_visibility: false,
            bounce: true,
            recognizer: DragRecognizerConfig::default(),
        }
    }
}

impl PagerConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on page `(horizontal, vertical)`.
    #[must_use]
    pub fn initial_page(mut self, horizontal: i64, vertical: i64) -> Self {
        self.initial_horizontal_page = horizontal;
        self.initial_vertical_page = vertical;
        self
    }

    /// Page count on the horizontal axis (`None` for unbounded).
    #[must_use]
    pub fn total_horizontal_pages(mut self, total: Option<u32>) -> Self {
        self.total_horizontal_pages = total;
        self
    }

    /// Page count on the vertical axis (`None` for unbounded).
    #[must_use]
    pub fn total_vertical_pages(mut self, total: Option<u32>) -> Self {
        self.total_vertical_pages = total;
        self
    }

    /// Commit ratios for both axes.
    #[must_use]
    pub fn threshold_ratios(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_threshold_ratio = horizontal;
        self.vertical_threshold_ratio = vertical;
        self
    }

    /// Commit curve.
    #[must_use]
    pub fn transition(mut self, curve: SettleCurve) -> Self {
        self.transition = curve;
        self
    }

    /// Cancel curve.
    #[must_use]
    pub fn cancel_curve(mut self, curve: SettleCurve) -> Self {
        self.cancel_curve = curve;
        self
    }

    #[must_use]
    pub fn enable_clipping(mut self, enabled: bool) -> Self {
        self.enable_clipping = enabled;
        self
    }

    #[must_use]
    pub fn enable_page_visibility(mut self, enabled: bool) -> Self {
        self.enable_page_visibility = enabled;
        self
    }

    #[must_use]
    pub fn bounce(mut self, enabled: bool) -> Self {
        self.bounce = enabled;
        self
    }

    /// Pointer recognition settings.
    #[must_use]
    pub fn recognizer(mut self, recognizer: DragRecognizerConfig) -> Self {
        self.recognizer = recognizer;
        self
    }

    /// Page ranges implied by the totals.
    #[must_use]
    pub fn extents(&self) -> GridExtent {
        GridExtent::from_totals(self.total_horizontal_pages, self.total_vertical_pages)
    }

    /// Initial page pair.
    #[must_use]
    pub fn initial_index(&self) -> PageIndex {
        PageIndex::new(self.initial_horizontal_page, self.initial_vertical_page)
    }

    /// Commit ratios.
    #[must_use]
    pub fn thresholds(&self) -> ThresholdRatios {
        ThresholdRatios {
            horizontal: self.horizontal_threshold_ratio,
            vertical: self.vertical_threshold_ratio,
        }
    }

    /// Check every precondition the pager relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extents = self.extents();
        let index = self.initial_index();
        let thresholds = self.thresholds();
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if let AxisExtent::Finite(total) = extents.get(axis) {
                if total == 0 {
                    return Err(ConfigError::EmptyExtent { axis });
                }
                let page = index.get(axis);
                if !extents.get(axis).contains(page) {
                    return Err(ConfigError::InitialPageOutOfRange { axis, page, total });
                }
            }
            let ratio = thresholds.get(axis);
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(ConfigError::InvalidThreshold { axis, ratio });
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
