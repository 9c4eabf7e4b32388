//! Basic element: a fixed-format scalar, scalar array or byte-string field.

use wire_formats::{Code, FormatSpec, Mode, format};

use crate::element::FieldDesc;
use crate::error::{MessageError, Result};
use crate::value::{Record, Value};

/// A plain fixed-width field described by a format string such as `"H"`,
/// `"2H"`, `"10s"` or `"?"`.
#[derive(Debug, Clone)]
pub struct ElementBasic {
    name: String,
    spec: FormatSpec,
    mode: Mode,
}

impl ElementBasic {
    /// Generic fallback predicate: any format field whose format parses and
    /// is not padding. Tried last by the registry.
    pub fn valid(field: &FieldDesc) -> bool {
        match field {
            FieldDesc::Format { format, .. } => matches!(
                FormatSpec::parse(format),
                Ok(spec) if spec.code != Code::Pad
            ),
            _ => false,
        }
    }

    pub fn new(field: FieldDesc, mode: Mode) -> Result<Self> {
        let (name, format) = match field {
            FieldDesc::Format { name, format } => (name, format),
            other => {
                return Err(MessageError::SchemaDefinition {
                    field: other.name().to_string(),
                });
            }
        };
        let spec = FormatSpec::parse(&format)?;
        if spec.code == Code::Pad {
            // Padding belongs to ElementPad, which the registry tries first.
            return Err(MessageError::SchemaDefinition { field: name });
        }
        Ok(Self { name, spec, mode })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn packed_size(&self) -> usize {
        self.spec.size_bytes()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn validate(&self, record: &Record) -> Result<()> {
        if record.contains(&self.name) {
            Ok(())
        } else {
            Err(MessageError::MissingField {
                field: self.name.clone(),
            })
        }
    }

    pub fn pack(&self, record: &Record) -> Result<Vec<u8>> {
        let value = record.get(&self.name).ok_or_else(|| MessageError::MissingField {
            field: self.name.clone(),
        })?;

        let mut out = Vec::with_capacity(self.packed_size());
        match self.spec.code {
            Code::Bytes => match value {
                Value::Bytes(bytes) => self.put_padded_bytes(&mut out, bytes),
                Value::Str(s) => self.put_padded_bytes(&mut out, s.as_bytes()),
                _ => return Err(self.wrong_type()),
            },
            _ if self.spec.repeat == 1 => self.put_scalar(&mut out, value)?,
            _ => match value {
                Value::Array(items) if items.len() == self.spec.repeat => {
                    for item in items {
                        self.put_scalar(&mut out, item)?;
                    }
                }
                _ => return Err(self.wrong_type()),
            },
        }
        Ok(out)
    }

    pub fn unpack<'a>(&self, buf: &'a [u8]) -> Result<(Value, &'a [u8])> {
        match self.spec.code {
            Code::Bytes => {
                let len = self.spec.repeat;
                if buf.len() < len {
                    return Err(MessageError::BufferUnderrun {
                        needed: len,
                        available: buf.len(),
                    });
                }
                let (head, rest) = buf.split_at(len);
                Ok((Value::Bytes(head.to_vec()), rest))
            }
            _ if self.spec.repeat == 1 => self.get_scalar(buf),
            _ => {
                let mut items = Vec::with_capacity(self.spec.repeat);
                let mut rest = buf;
                for _ in 0..self.spec.repeat {
                    let (v, r) = self.get_scalar(rest)?;
                    items.push(v);
                    rest = r;
                }
                Ok((Value::Array(items), rest))
            }
        }
    }

    /// Project the record's value into the canonical shape this format
    /// packs: range-checked integers, width-normalized byte strings.
    pub fn make(&self, record: &Record) -> Result<Value> {
        let value = record.get(&self.name).ok_or_else(|| MessageError::MissingField {
            field: self.name.clone(),
        })?;

        match self.spec.code {
            Code::Bool => match value {
                Value::Bool(b) => Ok(Value::Bool(*b)),
                _ => Err(self.wrong_type()),
            },
            Code::Bytes => {
                let mut bytes = match value {
                    Value::Bytes(b) => b.clone(),
                    Value::Str(s) => s.as_bytes().to_vec(),
                    _ => return Err(self.wrong_type()),
                };
                bytes.resize(self.spec.repeat, 0);
                Ok(Value::Bytes(bytes))
            }
            _ => {
                // Packing a throwaway buffer doubles as the range check.
                self.pack(record)?;
                Ok(value.clone())
            }
        }
    }

    fn put_scalar(&self, out: &mut Vec<u8>, value: &Value) -> Result<()> {
        let width = self.spec.code.width();
        if self.spec.code == Code::Bool {
            return match value {
                Value::Bool(b) => {
                    out.push(*b as u8);
                    Ok(())
                }
                _ => Err(self.wrong_type()),
            };
        }
        let result = if self.spec.code.is_signed() {
            let v = match value {
                Value::Signed(v) => *v,
                Value::Unsigned(v) => {
                    i64::try_from(*v).map_err(|_| self.out_of_range())?
                }
                _ => return Err(self.wrong_type()),
            };
            format::put_int(out, v, width, self.mode)
        } else {
            let v = match value {
                Value::Unsigned(v) => *v,
                Value::Signed(v) => {
                    u64::try_from(*v).map_err(|_| self.out_of_range())?
                }
                _ => return Err(self.wrong_type()),
            };
            format::put_uint(out, v, width, self.mode)
        };
        result.map_err(|_| self.out_of_range())
    }

    fn get_scalar<'a>(&self, buf: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let width = self.spec.code.width();
        if self.spec.code == Code::Bool {
            let (raw, rest) = format::get_uint(buf, 1, self.mode)?;
            return Ok((Value::Bool(raw != 0), rest));
        }
        if self.spec.code.is_signed() {
            let (v, rest) = format::get_int(buf, width, self.mode)?;
            Ok((Value::Signed(v), rest))
        } else {
            let (v, rest) = format::get_uint(buf, width, self.mode)?;
            Ok((Value::Unsigned(v), rest))
        }
    }

    /// Truncate or zero-pad to the declared byte width.
    fn put_padded_bytes(&self, out: &mut Vec<u8>, bytes: &[u8]) {
        let len = self.spec.repeat.min(bytes.len());
        out.extend_from_slice(&bytes[..len]);
        out.resize(self.spec.repeat, 0);
    }

    fn wrong_type(&self) -> MessageError {
        MessageError::WrongType {
            field: self.name.clone(),
        }
    }

    fn out_of_range(&self) -> MessageError {
        MessageError::ValueOutOfRange {
            field: self.name.clone(),
        }
    }
}
