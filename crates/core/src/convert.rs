//! Conversions into and out of [`WideUint`]: native integers, digit
//! strings and big-endian bytes.

use alloc::vec::Vec;
use core::str::FromStr;

use crate::error::{Error, Result};
use crate::limb::Limb;
use crate::wide::{U128, U256, WideUint};

macro_rules! from_native {
    ($($native:ty),*) => {
        $(
            impl<L: Limb> From<$native> for WideUint<L> {
                #[inline]
                fn from(value: $native) -> Self {
                    WideUint::from_u64(value as u64)
                }
            }
        )*
    };
}

from_native!(u8, u16, u32, u64);

impl<L: Limb> From<u128> for WideUint<L> {
    #[inline]
    fn from(value: u128) -> Self {
        // Every WideUint is at least 128 bits wide, so nothing is lost.
        WideUint::from_u64((value >> 64) as u64).shl_bits(64) | WideUint::from_u64(value as u64)
    }
}

/// Zero-extend into the high limb.
impl From<U128> for U256 {
    #[inline]
    fn from(value: U128) -> Self {
        U256::from_parts(U128::ZERO, value)
    }
}

impl From<U128> for u128 {
    #[inline]
    fn from(value: U128) -> Self {
        value.as_u128()
    }
}

impl<L: Limb> WideUint<L> {
    /// Number of bytes in the big-endian encoding.
    pub const BYTES: usize = (Self::BITS / 8) as usize;

    /// Parse a decimal string by repeated `value = value * 10 + digit`.
    ///
    /// Values past `2^BITS - 1` wrap, like every other operation on the type.
    pub fn from_decimal_string(s: &str) -> Result<Self> {
        Self::parse_digits(s, 0, 10)
    }

    /// Parse a hexadecimal string (`0x`/`0X` prefix optional) by repeated
    /// `value = value * 16 + digit`.
    pub fn from_hex_string(s: &str) -> Result<Self> {
        let offset = if s.starts_with("0x") || s.starts_with("0X") {
            2
        } else {
            0
        };
        Self::parse_digits(&s[offset..], offset, 16)
    }

    fn parse_digits(digits: &str, offset: usize, radix: u32) -> Result<Self> {
        if digits.is_empty() {
            return Err(Error::Empty);
        }

        let radix_value = Self::from_u64(radix as u64);
        let mut value = Self::ZERO;
        for (index, ch) in digits.char_indices() {
            let digit = ch.to_digit(radix).ok_or(Error::InvalidDigit {
                ch,
                index: index + offset,
            })?;
            value = value
                .wrapping_mul(radix_value)
                .wrapping_add(Self::from_u64(digit as u64));
        }
        Ok(value)
    }

    /// Build from big-endian bytes; shorter slices are zero-extended.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > Self::BYTES {
            return Err(Error::InvalidLength {
                len: bytes.len(),
                max: Self::BYTES,
            });
        }
        Ok(bytes.iter().fold(Self::ZERO, |acc, &byte| {
            acc.shl_bits(8) | Self::from_u64(byte as u64)
        }))
    }

    /// Big-endian bytes, always `BYTES` long.
    pub fn to_be_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::BYTES);
        for word in self.words_be() {
            out.extend_from_slice(&word.to_be_bytes());
        }
        out
    }

    /// 64-bit words, most significant first.
    pub(crate) fn words_be(self) -> impl Iterator<Item = u64> {
        let count = Self::BITS / 64;
        (0..count)
            .rev()
            .map(move |i| self.shr_bits(i * 64).low_u64())
    }
}

/// Accepts decimal, or hexadecimal with a `0x`/`0X` prefix.
impl<L: Limb> FromStr for WideUint<L> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex_string(s)
        } else {
            Self::from_decimal_string(s)
        }
    }
}

impl TryFrom<U256> for U128 {
    type Error = Error;

    /// Narrow a 256-bit value that fits in 128 bits.
    fn try_from(value: U256) -> Result<Self> {
        if value.high_half().is_zero() {
            Ok(value.low_half())
        } else {
            Err(Error::InvalidLength {
                len: U256::BYTES,
                max: U128::BYTES,
            })
        }
    }
}
