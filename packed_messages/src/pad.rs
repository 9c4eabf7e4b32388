//! Padding element: fixed, semantically empty zero bytes.

use wire_formats::{Code, FormatSpec, Mode, is_pad_format};

use crate::element::FieldDesc;
use crate::error::{MessageError, Result};

/// Zero bytes injected for manual alignment or protocol filler,
/// independent of any record value.
///
/// Alignment is computed from this element's own size, not from the
/// cumulative offset in the enclosing message, so a pad only produces
/// correct message-wide alignment when placed immediately after the
/// boundary that needs aligning.
#[derive(Debug, Clone)]
pub struct ElementPad {
    base: usize,
    alignment: usize,
}

impl ElementPad {
    /// Shape predicate: a format field whose format matches `\d*x`.
    pub fn valid(field: &FieldDesc) -> bool {
        match field {
            FieldDesc::Format { format, .. } => is_pad_format(format),
            _ => false,
        }
    }

    /// Build from a validated description. The declared name is discarded;
    /// padding has no addressable value.
    pub fn new(field: FieldDesc, alignment: usize) -> Result<Self> {
        let format = match field {
            FieldDesc::Format { format, .. } => format,
            other => {
                return Err(MessageError::SchemaDefinition {
                    field: other.name().to_string(),
                });
            }
        };
        let spec = FormatSpec::parse(&format)?;
        debug_assert_eq!(spec.code, Code::Pad);
        Ok(Self {
            base: spec.repeat,
            alignment: alignment.max(1),
        })
    }

    /// Total emitted length: the smallest multiple of the alignment that
    /// is `>= base`.
    pub fn padded_len(&self) -> usize {
        let over = self.base % self.alignment;
        self.base + if over == 0 { 0 } else { self.alignment - over }
    }

    pub fn pack(&self) -> Vec<u8> {
        vec![0u8; self.padded_len()]
    }

    /// Consume exactly as many bytes as `pack` produces and return the
    /// rest; the decoded value of padding is nothing.
    pub fn unpack<'a>(&self, buf: &'a [u8]) -> Result<&'a [u8]> {
        let len = self.padded_len();
        if buf.len() < len {
            return Err(MessageError::BufferUnderrun {
                needed: len,
                available: buf.len(),
            });
        }
        Ok(&buf[len..])
    }

    /// Padding has no byte-order sensitive content; kept for the shared
    /// contract.
    pub fn set_mode(&mut self, _mode: Mode) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(format: &str, alignment: usize) -> ElementPad {
        ElementPad::new(FieldDesc::scalar("pad", format), alignment).unwrap()
    }

    #[test]
    fn test_valid_shapes() {
        assert!(ElementPad::valid(&FieldDesc::scalar("a", "x")));
        assert!(ElementPad::valid(&FieldDesc::scalar("a", "4x")));
        assert!(!ElementPad::valid(&FieldDesc::scalar("a", "b")));
        assert!(!ElementPad::valid(&FieldDesc::scalar("a", "10s")));
        assert!(!ElementPad::valid(&FieldDesc::labelled("a", "B", [("one", 1)])));
    }

    #[test]
    fn test_pack_is_zero_bytes() {
        assert_eq!(pad("x", 1).pack(), vec![0]);
        assert_eq!(pad("3x", 1).pack(), vec![0, 0, 0]);
        assert_eq!(pad("0x", 1).pack(), Vec::<u8>::new());
    }

    #[test]
    fn test_alignment_rounds_up() {
        // Smallest multiple of the alignment >= base, always < base + alignment.
        for base in 0..9usize {
            for alignment in 1..5usize {
                let p = pad(&format!("{base}x"), alignment);
                let len = p.pack().len();
                assert_eq!(len % alignment, 0, "base {base} alignment {alignment}");
                assert!(len >= base);
                assert!(len < base + alignment);
            }
        }
    }

    #[test]
    fn test_default_alignment_adds_nothing() {
        for base in 0..9usize {
            assert_eq!(pad(&format!("{base}x"), 1).pack().len(), base);
        }
    }

    #[test]
    fn test_unpack_consumes_exactly_pack_len() {
        let p = pad("3x", 4);
        let mut buf = p.pack();
        buf.extend_from_slice(b"tail");

        let rest = p.unpack(&buf).unwrap();
        assert_eq!(rest, b"tail");
    }

    #[test]
    fn test_unpack_underrun() {
        let p = pad("4x", 1);
        assert_eq!(
            p.unpack(&[0, 0]),
            Err(MessageError::BufferUnderrun {
                needed: 4,
                available: 2
            })
        );
    }
}
