//! Text rendering for [`WideUint`]

use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::limb::Limb;
use crate::wide::WideUint;

/// Largest power of ten that fits in a `u64`.
const DECIMAL_CHUNK: u64 = 10_000_000_000_000_000_000;
const DECIMAL_CHUNK_DIGITS: usize = 19;

impl<L: Limb> WideUint<L> {
    /// Decimal rendering; round-trips through [`WideUint::from_decimal_string`].
    ///
    /// The value is peeled off in base-10^19 chunks, each of which fits a
    /// native `u64` and is formatted natively.
    pub fn to_decimal_string(self) -> String {
        if self.is_zero() {
            return String::from("0");
        }

        let chunk = Self::from_u64(DECIMAL_CHUNK);
        let mut chunks = alloc::vec::Vec::new();
        let mut rest = self;
        while !rest.is_zero() {
            let (quotient, remainder) = rest.div_rem(chunk);
            chunks.push(remainder.low_u64());
            rest = quotient;
        }

        let mut out = String::with_capacity(chunks.len() * DECIMAL_CHUNK_DIGITS);
        let mut iter = chunks.iter().rev();
        if let Some(most_significant) = iter.next() {
            out.push_str(&format!("{}", most_significant));
        }
        for chunk in iter {
            out.push_str(&format!("{:0width$}", chunk, width = DECIMAL_CHUNK_DIGITS));
        }
        out
    }

    /// Lowercase hex with a `0x` prefix and no leading zeros.
    pub fn to_hex_string(self) -> String {
        format!("{:#x}", self)
    }

    fn hex_digits(self, upper: bool) -> String {
        let mut out = String::new();
        for word in self.words_be() {
            if out.is_empty() {
                if word != 0 {
                    out = if upper {
                        format!("{:X}", word)
                    } else {
                        format!("{:x}", word)
                    };
                }
            } else if upper {
                out.push_str(&format!("{:016X}", word));
            } else {
                out.push_str(&format!("{:016x}", word));
            }
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }
}

impl<L: Limb> fmt::Display for WideUint<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "", &self.to_decimal_string())
    }
}

impl<L: Limb> fmt::LowerHex for WideUint<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.hex_digits(false))
    }
}

impl<L: Limb> fmt::UpperHex for WideUint<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.hex_digits(true))
    }
}

impl<L: Limb> fmt::Debug for WideUint<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::ToString;

    use crate::{U128, U256};

    #[test]
    fn test_decimal_rendering() {
        assert_eq!(U128::ZERO.to_decimal_string(), "0");
        assert_eq!(U128::from_u64(2434).to_decimal_string(), "2434");
        assert_eq!(
            U128::MAX.to_decimal_string(),
            "340282366920938463463374607431768211455"
        );
        assert_eq!(
            U256::MAX.to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
        // Interior chunks keep their leading zeros.
        let v = U128::from_decimal_string("10000000000000000000000000000000000001").unwrap();
        assert_eq!(v.to_string(), "10000000000000000000000000000000000001");
    }

    #[test]
    fn test_decimal_roundtrip_boundaries() {
        for s in [
            "1",
            "9999999999999999999",
            "10000000000000000000",
            "18446744073709551615",
            "18446744073709551616",
        ] {
            assert_eq!(U256::from_decimal_string(s).unwrap().to_decimal_string(), s);
        }
    }

    #[test]
    fn test_hex_rendering() {
        assert_eq!(U128::ZERO.to_hex_string(), "0x0");
        assert_eq!(format!("{:x}", U128::from_u64(255)), "ff");
        assert_eq!(format!("{:X}", U128::from_u64(255)), "FF");
        assert_eq!(format!("{:#06x}", U128::from_u64(255)), "0x00ff");
        assert_eq!(
            format!("{:x}", U256::from_words([0, 1, 0, 0xab])),
            "1000000000000000000000000000000ab"
        );
        assert_eq!(format!("{:?}", U128::from_u64(16)), "0x10");
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(format!("{:>6}", U128::from_u64(42)), "    42");
        assert_eq!(format!("{:06}", U128::from_u64(42)), "000042");
    }
}
