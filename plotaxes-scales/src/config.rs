use plotaxes_common::types::PlotType;
use serde::{Deserialize, Serialize};

/// Fraction of the data span added beyond a truncated bound, wide enough for
/// the truncation highlight to be visible
pub const TRUNCATION_MARGIN: f64 = 0.05;

/// Fraction of the data span added beyond a non-truncated bound
pub const PADDING_MARGIN: f64 = 0.02;

/// Padding fraction used instead of [`PADDING_MARGIN`] on log-scaled axes
pub const LOG_SCALE_PADDING_MARGIN: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionMargins {
    pub truncation: f64,
    pub padding: f64,
    pub log_padding: f64,
}

impl Default for ExtensionMargins {
    fn default() -> Self {
        Self {
            truncation: TRUNCATION_MARGIN,
            padding: PADDING_MARGIN,
            log_padding: LOG_SCALE_PADDING_MARGIN,
        }
    }
}

/// Options controlling how a raw data range is extended for rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtensionOptions {
    pub plot_type: Option<PlotType>,
    pub log_scale: bool,
    pub margins: ExtensionMargins,
}

impl ExtensionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plot_type(mut self, plot_type: PlotType) -> Self {
        self.plot_type = Some(plot_type);
        self
    }

    pub fn with_log_scale(mut self, log_scale: bool) -> Self {
        self.log_scale = log_scale;
        self
    }

    pub fn with_margins(mut self, margins: ExtensionMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Cosmetic padding fraction for the lower bound when it is not truncated
    pub fn lower_padding(&self) -> f64 {
        match self.plot_type {
            Some(plot_type) if plot_type.suppresses_lower_padding() => 0.0,
            _ => self.cosmetic_padding(),
        }
    }

    /// Cosmetic padding fraction for the upper bound when it is not truncated
    pub fn upper_padding(&self) -> f64 {
        match self.plot_type {
            Some(plot_type) if plot_type.suppresses_upper_padding() => 0.0,
            _ => self.cosmetic_padding(),
        }
    }

    fn cosmetic_padding(&self) -> f64 {
        if self.log_scale {
            self.margins.log_padding
        } else {
            self.margins.padding
        }
    }
}
