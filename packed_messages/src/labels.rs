//! Labelled element: an integer field constrained to a label table.

use wire_formats::{FormatSpec, Mode, format};

use crate::element::FieldDesc;
use crate::error::{MessageError, Result};
use crate::value::{Record, Value};

/// An enumerated field. Records carry the label; the wire carries the
/// discriminant, encoded with a single integer format code.
#[derive(Debug, Clone)]
pub struct ElementLabels {
    name: String,
    spec: FormatSpec,
    mode: Mode,
    table: Vec<(String, u64)>,
}

impl ElementLabels {
    /// Shape predicate: a labels field whose format is a bare integer code.
    pub fn valid(field: &FieldDesc) -> bool {
        match field {
            FieldDesc::Labels { format, .. } => matches!(
                FormatSpec::parse(format),
                Ok(spec) if spec.code.is_integer() && !spec.code.is_signed() && spec.repeat == 1
            ),
            _ => false,
        }
    }

    pub fn new(field: FieldDesc, mode: Mode) -> Result<Self> {
        let (name, format, variants) = match field {
            FieldDesc::Labels {
                name,
                format,
                variants,
            } => (name, format, variants),
            other => {
                return Err(MessageError::SchemaDefinition {
                    field: other.name().to_string(),
                });
            }
        };
        let spec = FormatSpec::parse(&format)?;

        // Duplicate labels or discriminants make decode ambiguous.
        for (i, (label, value)) in variants.iter().enumerate() {
            let clash = variants[..i]
                .iter()
                .any(|(l, v)| l == label || v == value);
            if clash {
                return Err(MessageError::SchemaDefinition { field: name });
            }
        }

        // Every discriminant must fit the declared width.
        let width = spec.code.width();
        if width < 8 {
            let limit = 1u64 << (width * 8);
            if variants.iter().any(|(_, v)| *v >= limit) {
                return Err(MessageError::SchemaDefinition { field: name });
            }
        }

        Ok(Self {
            name,
            spec,
            mode,
            table: variants,
        })
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
        let discriminant = self.discriminant_for(record)?;
        let mut out = Vec::with_capacity(self.packed_size());
        format::put_uint(&mut out, discriminant, self.spec.code.width(), self.mode)?;
        Ok(out)
    }

    pub fn unpack<'a>(&self, buf: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let (raw, rest) = format::get_uint(buf, self.spec.code.width(), self.mode)?;
        let label = self
            .table
            .iter()
            .find(|(_, v)| *v == raw)
            .map(|(l, _)| l.clone())
            .ok_or(MessageError::UnknownDiscriminant {
                field: self.name.clone(),
                value: raw,
            })?;
        Ok((Value::Str(label), rest))
    }

    pub fn make(&self, record: &Record) -> Result<Value> {
        let (label, _) = self.lookup(record)?;
        Ok(Value::Str(label.to_string()))
    }

    fn discriminant_for(&self, record: &Record) -> Result<u64> {
        let (_, discriminant) = self.lookup(record)?;
        Ok(discriminant)
    }

    /// Resolve the record's label against the table.
    fn lookup<'a>(&self, record: &'a Record) -> Result<(&'a str, u64)> {
        let label = match record.get(&self.name) {
            Some(Value::Str(label)) => label,
            Some(_) => {
                return Err(MessageError::WrongType {
                    field: self.name.clone(),
                });
            }
            None => {
                return Err(MessageError::MissingField {
                    field: self.name.clone(),
                });
            }
        };
        self.table
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| (label.as_str(), *v))
            .ok_or(MessageError::UnknownLabel {
                field: self.name.clone(),
            })
    }
}
