//! Navigation tunables.
//!
//! Every field has a default, so a partial JSON object (for example from the
//! nav element's `data-config` attribute) only overrides what it names.

use serde::Deserialize;

use crate::error::{NavError, NavResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    pub font_family: String,
    pub font_size: f64,
    pub text_colour: String,
    /// Horizontal space added to each item's measured text width.
    pub item_padding: f64,
    /// Device pixels per CSS pixel for the GL surface.
    pub resolution: f64,
    /// Fraction of the remaining distance covered per animation frame.
    pub smoothing: f64,
    pub drag_delay_ms: u32,
    pub mask_padding: f64,
    pub background_colour: String,
    pub background_alpha: f32,
    /// Pixel x the pointer starts from when the menu opens.
    pub open_start_x: f64,
    pub time_step: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            font_family: "Fraunces".to_owned(),
            font_size: 80.0,
            text_colour: "rgba(186, 191, 204, 1)".to_owned(),
            item_padding: 50.0,
            resolution: 2.0,
            smoothing: 0.05,
            drag_delay_ms: 100,
            mask_padding: 100.0,
            background_colour: "#F9F9F9".to_owned(),
            background_alpha: 0.0,
            open_start_x: 3000.0,
            time_step: crate::filter::DEFAULT_TIME_STEP,
        }
    }
}

impl NavConfig {
    pub fn from_json(json: &str) -> NavResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the animator and renderer cannot work with.
    pub fn validate(&self) -> NavResult<()> {
        let out_of_range = |field: &'static str, value: f64| NavError::ConfigRange { field, value };

        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(out_of_range("smoothing", self.smoothing));
        }
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(out_of_range("resolution", self.resolution));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(out_of_range("font_size", self.font_size));
        }
        if !self.mask_padding.is_finite() {
            return Err(out_of_range("mask_padding", self.mask_padding));
        }
        if self.drag_delay_ms > i32::MAX as u32 {
            return Err(out_of_range("drag_delay_ms", f64::from(self.drag_delay_ms)));
        }
        Ok(())
    }

    /// CSS font shorthand used when rasterising item titles.
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }

    /// Text canvas height for one item.
    pub fn item_height(&self) -> f64 {
        self.font_size * 1.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = NavConfig::from_json(r#"{ "smoothing": 0.1, "font_size": 40 }"#).unwrap();
        assert_eq!(cfg.smoothing, 0.1);
        assert_eq!(cfg.font_size, 40.0);
        assert_eq!(cfg.drag_delay_ms, 100);
        assert_eq!(cfg.css_font(), "40px Fraunces");
    }

    #[test]
    fn unknown_fields_are_an_error() {
        assert!(NavConfig::from_json(r#"{ "smoothnes": 0.1 }"#).is_err());
        assert!(NavConfig::from_json("not json").is_err());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for json in [
            r#"{ "smoothing": 1.5 }"#,
            r#"{ "smoothing": 0 }"#,
            r#"{ "resolution": 0 }"#,
            r#"{ "font_size": -4 }"#,
            r#"{ "drag_delay_ms": 3000000000 }"#,
        ] {
            let err = NavConfig::from_json(json).unwrap_err();
            assert!(matches!(err, NavError::ConfigRange { .. }), "{json}: {err}");
        }
    }

    #[test]
    fn boundary_values_are_accepted() {
        let cfg = NavConfig::from_json(r#"{ "smoothing": 1.0, "drag_delay_ms": 0 }"#).unwrap();
        assert_eq!(cfg.smoothing, 1.0);
        assert!(NavConfig::default().validate().is_ok());
    }
}
