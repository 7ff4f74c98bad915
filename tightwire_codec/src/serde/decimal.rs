use crate::{Result, WireError};
use std::fmt;
use std::str::FromStr;

/// A fixed-point decimal: a 96-bit magnitude, a sign, and a power-of-ten scale.
///
/// The value is `(-1)^negative * magnitude / 10^scale`.
/// Equal values with different scales (`1.0` vs `1.00`) are distinct and both round-trip.
///
/// ```text
/// struct Decimal {
///     magnitude:  [u8; 12],   // little endian
///     scale:      u8,         // 0..=28
///     sign:       u8,         // 0 or 1
///     padding:    [u8; 2],    // zero
/// }
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Decimal {
    magnitude: u128,
    scale: u8,
    negative: bool,
}

impl Decimal {
    pub const MAX_SCALE: u8 = 28;
    pub const MAX_MAGNITUDE: u128 = (1u128 << 96) - 1;
    pub const WIRE_LEN: usize = 16;

    pub const ZERO: Decimal = Decimal {
        magnitude: 0,
        scale: 0,
        negative: false,
    };

    pub fn new(mantissa: i128, scale: u8) -> Option<Self> {
        Self::from_parts(mantissa.unsigned_abs(), scale, mantissa < 0)
    }

    pub fn from_parts(magnitude: u128, scale: u8, negative: bool) -> Option<Self> {
        if magnitude > Self::MAX_MAGNITUDE || scale > Self::MAX_SCALE {
            return None;
        }
        Some(Self {
            magnitude,
            scale,
            negative,
        })
    }

    pub fn mantissa(&self) -> i128 {
        let m = self.magnitude as i128;
        if self.negative {
            -m
        } else {
            m
        }
    }
    pub fn magnitude(&self) -> u128 {
        self.magnitude
    }
    pub fn scale(&self) -> u8 {
        self.scale
    }
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn to_le_bytes(&self) -> [u8; Self::WIRE_LEN] {
        let mut buf = [0u8; Self::WIRE_LEN];
        buf[..12].copy_from_slice(&self.magnitude.to_le_bytes()[..12]);
        buf[12] = self.scale;
        buf[13] = self.negative as u8;
        buf
    }

    pub fn from_le_bytes(buf: [u8; Self::WIRE_LEN]) -> Result<Self> {
        let mut mag_buf = [0u8; 16];
        mag_buf[..12].copy_from_slice(&buf[..12]);
        let magnitude = u128::from_le_bytes(mag_buf);

        let scale = buf[12];
        if scale > Self::MAX_SCALE {
            return Err(WireError::malformed(format!(
                "decimal scale {scale} > {}",
                Self::MAX_SCALE
            )));
        }
        let negative = match buf[13] {
            0 => false,
            1 => true,
            other => {
                return Err(WireError::malformed(format!("decimal sign byte {other}")));
            }
        };
        if buf[14..] != [0, 0] {
            return Err(WireError::malformed("decimal padding not zero"));
        }

        Ok(Self {
            magnitude,
            scale,
            negative,
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.magnitude.to_string();
        let scale = self.scale as usize;
        let sign = if self.negative { "-" } else { "" };
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        if digits.len() > scale {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{int}.{frac}")
        } else {
            write!(f, "{sign}0.{digits:0>scale$}")
        }
    }
}

impl FromStr for Decimal {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self> {
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int.is_empty() || !all_digits(int) || !all_digits(frac) {
            return Err(WireError::malformed(format!("not a decimal: {s:?}")));
        }

        let scale = u8::try_from(frac.len())
            .map_err(|_| WireError::malformed(format!("decimal scale too large: {s:?}")))?;
        let magnitude = format!("{int}{frac}")
            .parse::<u128>()
            .map_err(|e| WireError::malformed(format!("{e}: {s:?}")))?;

        Self::from_parts(magnitude, scale, negative)
            .ok_or_else(|| WireError::malformed(format!("decimal out of range: {s:?}")))
    }
}
