//! The message: an ordered element list sharing one byte-order mode.

use wire_formats::Mode;

use crate::element::{Element, FieldDesc};
use crate::error::{MessageError, Result};
use crate::value::Record;

/// A compiled schema: the ordered list of elements a record packs through.
///
/// Built once from field descriptions; building fails fast, no partial
/// schema is ever produced. The wire layout is exactly the concatenation
/// of each element's bytes in field order, with no implicit framing.
#[derive(Debug, Clone)]
pub struct Message {
    name: String,
    elements: Vec<Element>,
    mode: Mode,
    alignment: usize,
}

impl Message {
    pub fn new(name: &str, fields: Vec<FieldDesc>, mode: Mode) -> Result<Self> {
        Self::with_alignment(name, fields, mode, 1)
    }

    /// Build with an explicit pad alignment (propagated to pad elements).
    pub fn with_alignment(
        name: &str,
        fields: Vec<FieldDesc>,
        mode: Mode,
        alignment: usize,
    ) -> Result<Self> {
        if alignment == 0 {
            return Err(MessageError::SchemaDefinition {
                field: name.to_string(),
            });
        }

        let mut elements = Vec::with_capacity(fields.len());
        let mut declared: Vec<String> = Vec::new();

        for field in fields {
            let element = Element::from_field(field, mode, alignment)?;

            // A length reference must name a field declared earlier, so its
            // value is already decoded when the referencing element runs.
            if let Some(reference) = element.reference() {
                if !declared.iter().any(|n| n == reference) {
                    return Err(MessageError::SchemaDefinition {
                        field: reference.to_string(),
                    });
                }
            }
            // Two fields with one name would pack from a single value and
            // last-win on unpack.
            if let Some(name) = element.name() {
                if declared.iter().any(|n| n == name) {
                    return Err(MessageError::SchemaDefinition {
                        field: name.to_string(),
                    });
                }
                declared.push(name.to_string());
            }
            elements.push(element);
        }

        Ok(Self {
            name: name.to_string(),
            elements,
            mode,
            alignment,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of elements, padding included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Rebind every element (and embedded sub-message) to a new byte
    /// order. Exclusive access makes concurrent rebinding impossible; a
    /// shared schema must be rebound before it is shared.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        for element in &mut self.elements {
            element.set_mode(mode);
        }
    }

    /// Builder-style mode rebind.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.set_mode(mode);
        self
    }

    /// Total packed size when every element's size is statically known;
    /// `None` as soon as any element is variable-length.
    pub fn packed_size(&self) -> Option<usize> {
        self.elements
            .iter()
            .try_fold(0usize, |total, e| Some(total + e.packed_size()?))
    }

    /// One all-zero encoding of the static size, for pad-to-count filler.
    pub fn zero_filler(&self) -> Option<Vec<u8>> {
        self.packed_size().map(|size| vec![0u8; size])
    }

    /// Check that the record supplies every field the schema needs.
    pub fn validate(&self, record: &Record) -> Result<()> {
        for element in &self.elements {
            element.validate(record)?;
        }
        Ok(())
    }

    /// Pack a record: validate everything first, then concatenate each
    /// element's bytes in field order.
    pub fn pack(&self, record: &Record) -> Result<Vec<u8>> {
        self.validate(record)?;

        let mut out = Vec::new();
        for element in &self.elements {
            out.extend(element.pack(record)?);
        }
        Ok(out)
    }

    /// Unpack a buffer that holds exactly one message.
    pub fn unpack(&self, buf: &[u8]) -> Result<Record> {
        let (record, rest) = self.unpack_partial(buf)?;
        if !rest.is_empty() {
            return Err(MessageError::TrailingBytes {
                remaining: rest.len(),
            });
        }
        Ok(record)
    }

    /// Unpack one message from the front of `buf`, returning the record
    /// and whatever bytes remain.
    ///
    /// The partially decoded record is threaded into each element as
    /// context, so later elements can resolve length references against
    /// fields decoded before them.
    pub fn unpack_partial<'a>(&self, buf: &'a [u8]) -> Result<(Record, &'a [u8])> {
        let mut record = Record::new();
        let mut rest = buf;

        for element in &self.elements {
            let (value, remaining) = element.unpack(&record, rest)?;
            rest = remaining;
            if let (Some(name), Some(value)) = (element.name(), value) {
                record.set(name, value);
            }
        }
        Ok((record, rest))
    }

    /// Project a record into the canonical shape this schema packs.
    pub fn make(&self, record: &Record) -> Result<Record> {
        let mut out = Record::new();
        for element in &self.elements {
            if let (Some(name), Some(value)) = (element.name(), element.make(record)?) {
                out.set(name, value);
            }
        }
        Ok(out)
    }
}
