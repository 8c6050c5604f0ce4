//! `#rrggbb` codec and the 8-bit RGB triple it round-trips.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An opaque 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from wider integers, rejecting anything outside `0..=255`.
    pub fn from_channels(r: i64, g: i64, b: i64) -> crate::Result<Self> {
        Ok(Self::new(
            channel("red", r)?,
            channel("green", g)?,
            channel("blue", b)?,
        ))
    }

    /// L1 distance: sum of absolute per-channel differences (0..=765).
    #[inline]
    pub fn l1_distance(self, other: Self) -> u32 {
        u32::from(self.r.abs_diff(other.r))
            + u32::from(self.g.abs_diff(other.g))
            + u32::from(self.b.abs_diff(other.b))
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

fn channel(name: &'static str, value: i64) -> crate::Result<u8> {
    u8::try_from(value).map_err(|_| CoreError::ChannelOutOfRange {
        channel: name,
        value,
    })
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Format as `#` followed by two lowercase, zero-padded hex digits per channel.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Parse `#RRGGBB` (either case). Anything else is a [`CoreError::Parse`].
pub fn hex_to_rgb(hex: &str) -> crate::Result<Rgb> {
    let fail = |reason| CoreError::Parse {
        input: hex.to_string(),
        reason,
    };
    let digits = hex.strip_prefix('#').ok_or_else(|| fail("missing leading '#'"))?;
    if hex.len() != 7 {
        return Err(fail("expected exactly 7 characters"));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(fail("non-hex digit"));
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| fail("non-hex digit"));
    Ok(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&rgb_to_hex(*self))
    }
}

impl FromStr for Rgb {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_lowercase_and_padded() {
        assert_eq!(rgb_to_hex(Rgb::new(0, 10, 255)), "#000aff");
        assert_eq!(rgb_to_hex(Rgb::new(171, 205, 239)), "#abcdef");
        assert_eq!(Rgb::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn parses_either_case() {
        assert_eq!(hex_to_rgb("#ABCDEF").unwrap(), Rgb::new(171, 205, 239));
        assert_eq!(hex_to_rgb("#aBcDeF").unwrap(), Rgb::new(171, 205, 239));
        assert_eq!("#00ff00".parse::<Rgb>().unwrap(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn rejects_malformed() {
        for bad in [
            "", "#", "ffffff", "#fff", "#fffffff", "#ggffff", "#ff ff0", " #ffffff", "#+fffff",
            "#ffé00", "0xffffff",
        ] {
            match hex_to_rgb(bad) {
                Err(CoreError::Parse { input, .. }) => assert_eq!(input, bad),
                other => panic!("{bad:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn round_trips_every_channel_value() {
        for v in 0..=255u8 {
            for rgb in [Rgb::new(v, 0, 0), Rgb::new(0, v, 0), Rgb::new(0, 0, v), Rgb::new(v, 255 - v, v / 3)] {
                assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)).unwrap(), rgb);
            }
        }
    }

    #[test]
    fn checked_channels() {
        assert_eq!(Rgb::from_channels(1, 2, 3).unwrap(), Rgb::new(1, 2, 3));
        assert_eq!(
            Rgb::from_channels(0, 256, 0),
            Err(CoreError::ChannelOutOfRange {
                channel: "green",
                value: 256
            })
        );
        assert!(matches!(
            Rgb::from_channels(-1, 0, 0),
            Err(CoreError::ChannelOutOfRange { channel: "red", .. })
        ));
    }

    #[test]
    fn l1_distance() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(red.l1_distance(Rgb::new(250, 10, 5)), 20);
        assert_eq!(Rgb::BLACK.l1_distance(Rgb::WHITE), 765);
        assert_eq!(red.l1_distance(red), 0);
    }
}
