use crate::error::{NavError, NavResult};

/// Stage background colour as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour(pub u32);

impl Colour {
    pub const DEFAULT_BACKGROUND: Colour = Colour(0xF9F9F9);

    /// Parses `#RRGGBB`, case-insensitive. Only the first six hex digits after
    /// the `#` are read, so trailing text is ignored.
    pub fn parse_hex(value: &str) -> NavResult<Self> {
        let digits = value
            .strip_prefix('#')
            .and_then(|rest| rest.get(..6))
            .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| NavError::InvalidColour(value.to_owned()))?;
        u32::from_str_radix(digits, 16)
            .map(Colour)
            .map_err(|_| NavError::InvalidColour(value.to_owned()))
    }

    /// Normalized `[r, g, b]` for GL.
    pub fn rgb_f32(self) -> [f32; 3] {
        let c = self.0;
        [
            ((c >> 16) & 0xFF) as f32 / 255.0,
            ((c >> 8) & 0xFF) as f32 / 255.0,
            (c & 0xFF) as f32 / 255.0,
        ]
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::DEFAULT_BACKGROUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upper_and_lower_case() {
        assert_eq!(Colour::parse_hex("#AABBCC").unwrap(), Colour(0xAABBCC));
        assert_eq!(Colour::parse_hex("#0a0b0c").unwrap(), Colour(0x0A0B0C));
    }

    #[test]
    fn ignores_trailing_text() {
        assert_eq!(Colour::parse_hex("#123456ff").unwrap(), Colour(0x123456));
    }

    #[test]
    fn rejects_non_colours() {
        for bad in ["not-a-color", "AABBCC", "#ABC", "#GGHHII", "", "#ééé"] {
            assert!(Colour::parse_hex(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn splits_channels() {
        assert_eq!(Colour(0xFF0000).rgb_f32(), [1.0, 0.0, 0.0]);
    }
}
