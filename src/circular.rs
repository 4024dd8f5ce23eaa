//! Per-letter transforms that wrap the landing page emblem text in a circle.

use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq)]
pub struct LetterTransform {
    pub letter: char,
    pub rotate_deg: f64,
    pub offset_px: f64,
}

impl LetterTransform {
    pub fn css(&self) -> String {
        format!(
            "rotateZ({}deg) translate3d({}px,{}px,0)",
            self.rotate_deg, self.offset_px, self.offset_px
        )
    }
}

pub fn letter_transforms(text: &str) -> Vec<LetterTransform> {
    let n = text.chars().count();
    if n == 0 {
        return Vec::new();
    }
    let step = 360.0 / n as f64;
    let nudge = (PI / n as f64).round();
    text.chars()
        .enumerate()
        .map(|(i, letter)| LetterTransform {
            letter,
            rotate_deg: step * i as f64,
            offset_px: nudge * i as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_spread_evenly() {
        let t = letter_transforms("abcd");
        let angles: Vec<f64> = t.iter().map(|l| l.rotate_deg).collect();
        assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);
        assert_eq!(t[1].css(), "rotateZ(90deg) translate3d(1px,1px,0)");
    }

    #[test]
    fn long_text_has_no_nudge() {
        let t = letter_transforms("portfolio * portfolio * ");
        assert!(t.iter().all(|l| l.offset_px == 0.0));
        assert_eq!(t.len(), 24);
    }

    #[test]
    fn empty_text() {
        assert!(letter_transforms("").is_empty());
    }
}
