//! Struct-style format code parsing and scalar encoding.
//!
//! A format string is an optional decimal repeat count followed by a single
//! code character: `"B"` is one unsigned byte, `"2H"` two unsigned shorts,
//! `"10s"` a 10-byte string, `"4x"` four pad bytes.

use crate::error::FormatError;
use crate::mode::Mode;

/// A single format code character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    Bool,
    /// Fixed-size byte string (`s`); the repeat count is the byte width.
    Bytes,
    /// Pad bytes (`x`); the repeat count is the number of zero bytes.
    Pad,
}

impl Code {
    /// Parse one code character.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'b' => Some(Code::I8),
            'B' => Some(Code::U8),
            'h' => Some(Code::I16),
            'H' => Some(Code::U16),
            'i' | 'l' => Some(Code::I32),
            'I' | 'L' => Some(Code::U32),
            'q' => Some(Code::I64),
            'Q' => Some(Code::U64),
            '?' => Some(Code::Bool),
            's' => Some(Code::Bytes),
            'x' => Some(Code::Pad),
            _ => None,
        }
    }

    /// Width in bytes of one scalar of this code. `Bytes` and `Pad` count
    /// per repeat unit, so their unit width is 1.
    pub const fn width(self) -> usize {
        match self {
            Code::I8 | Code::U8 | Code::Bool | Code::Bytes | Code::Pad => 1,
            Code::I16 | Code::U16 => 2,
            Code::I32 | Code::U32 => 4,
            Code::I64 | Code::U64 => 8,
        }
    }

    /// True for the integer codes (everything except `?`, `s` and `x`).
    pub const fn is_integer(self) -> bool {
        !matches!(self, Code::Bool | Code::Bytes | Code::Pad)
    }

    /// True for `b`, `h`, `i`, `q`.
    pub const fn is_signed(self) -> bool {
        matches!(self, Code::I8 | Code::I16 | Code::I32 | Code::I64)
    }
}

/// A parsed format string: a code plus its repeat count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub code: Code,
    pub repeat: usize,
}

impl FormatSpec {
    /// Parse a format string, failing atomically on anything outside the
    /// `\d*<code>` grammar.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        let mut chars = s.chars();
        let last = chars.next_back().ok_or(FormatError::Empty)?;
        let code = Code::from_char(last).ok_or(FormatError::UnknownCode(last))?;

        let digits = chars.as_str();
        let repeat = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<usize>()
                .map_err(|_| FormatError::InvalidRepeat(s.to_string()))?
        };

        Ok(FormatSpec { code, repeat })
    }

    /// Total packed size in bytes.
    pub const fn size_bytes(&self) -> usize {
        self.repeat * self.code.width()
    }
}

/// Shape predicate for the pad grammar (`\d*x`). Never errors on malformed
/// input, only returns false.
pub fn is_pad_format(s: &str) -> bool {
    match s.strip_suffix('x') {
        Some(digits) => digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// Append an unsigned integer of `width` bytes under `mode`.
pub fn put_uint(out: &mut Vec<u8>, value: u64, width: usize, mode: Mode) -> Result<(), FormatError> {
    if width < 8 && value >= 1u64 << (width * 8) {
        return Err(FormatError::UnsignedOverflow(value, width));
    }
    if mode.is_little_endian() {
        out.extend_from_slice(&value.to_le_bytes()[..width]);
    } else {
        out.extend_from_slice(&value.to_be_bytes()[8 - width..]);
    }
    Ok(())
}

/// Append a signed integer of `width` bytes under `mode` (two's complement).
pub fn put_int(out: &mut Vec<u8>, value: i64, width: usize, mode: Mode) -> Result<(), FormatError> {
    if width < 8 {
        let bits = width as u32 * 8;
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << (bits - 1)) - 1;
        if value < min || value > max {
            return Err(FormatError::SignedOverflow(value, width));
        }
    }
    if mode.is_little_endian() {
        out.extend_from_slice(&value.to_le_bytes()[..width]);
    } else {
        out.extend_from_slice(&value.to_be_bytes()[8 - width..]);
    }
    Ok(())
}

/// Read an unsigned integer of `width` bytes from the front of `buf`,
/// returning the value and the remaining slice.
pub fn get_uint(buf: &[u8], width: usize, mode: Mode) -> Result<(u64, &[u8]), FormatError> {
    if buf.len() < width {
        return Err(FormatError::BufferUnderrun {
            needed: width,
            available: buf.len(),
        });
    }
    let (head, rest) = buf.split_at(width);
    let mut value = 0u64;
    if mode.is_little_endian() {
        for (i, b) in head.iter().enumerate() {
            value |= (*b as u64) << (i * 8);
        }
    } else {
        for b in head {
            value = (value << 8) | *b as u64;
        }
    }
    Ok((value, rest))
}

/// Read a signed integer of `width` bytes from the front of `buf`.
pub fn get_int(buf: &[u8], width: usize, mode: Mode) -> Result<(i64, &[u8]), FormatError> {
    let (raw, rest) = get_uint(buf, width, mode)?;
    let shift = 64 - width as u32 * 8;
    Ok((((raw << shift) as i64) >> shift, rest))
}
