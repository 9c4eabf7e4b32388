//! Variable-length element: a repeated sub-structure whose count is fixed
//! in the schema or bound to another field of the same record.

use wire_formats::Mode;

use crate::element::{FieldDesc, Ref};
use crate::error::{MessageError, Result};
use crate::message::Message;
use crate::value::{Record, Value};

/// A repeated embedded [`Message`].
///
/// Three counting styles, chosen by the [`Ref`] shape:
/// - `Ref::Fixed(n)` — always exactly `n` sub-records on the wire; short
///   input is padded out with all-zero filler (never an error).
/// - `Ref::Objects(field)` — the named field holds the number of
///   sub-records. At pack time the actual sequence length wins; the field
///   is only consulted when unpacking.
/// - `Ref::Bytes(field)` — the named field is a byte budget. Packing stops
///   before the sub-record that would overflow it; whole sub-records are
///   dropped silently, never split. Callers must size the budget field
///   correctly or trailing data is lost by design.
#[derive(Debug, Clone)]
pub struct ElementVariable {
    name: String,
    schema: Message,
    count: Ref,
}

impl ElementVariable {
    /// Shape predicate: a sub-records field with a usable count reference.
    pub fn valid(field: &FieldDesc) -> bool {
        match field {
            FieldDesc::Subrecords { count, .. } => match count {
                Ref::Fixed(_) => true,
                Ref::Objects(f) | Ref::Bytes(f) => !f.is_empty(),
            },
            _ => false,
        }
    }

    pub fn new(field: FieldDesc, mode: Mode) -> Result<Self> {
        let (name, schema, count) = match field {
            FieldDesc::Subrecords {
                name,
                schema,
                count,
            } => (name, schema, count),
            other => {
                return Err(MessageError::SchemaDefinition {
                    field: other.name().to_string(),
                });
            }
        };
        Ok(Self {
            name,
            // The embedded schema follows the enclosing message's mode.
            schema: schema.with_mode(mode),
            count,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> &Ref {
        &self.count
    }

    pub fn schema(&self) -> &Message {
        &self.schema
    }

    /// Statically known only for a fixed count of a fixed-size sub-message.
    pub fn packed_size(&self) -> Option<usize> {
        match self.count {
            Ref::Fixed(n) => self.schema.packed_size().map(|size| n * size),
            _ => None,
        }
    }

    /// Rebinding recurses into the sub-message; the element has no byte
    /// order of its own.
    pub fn set_mode(&mut self, mode: Mode) {
        self.schema.set_mode(mode);
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

    /// The repeat count is always taken from the sequence actually being
    /// packed, never from the record's length field.
    pub fn pack(&self, record: &Record) -> Result<Vec<u8>> {
        let records = self.sub_records(record)?;
        let mut out = Vec::new();

        match &self.count {
            Ref::Fixed(n) => {
                for index in 0..*n {
                    match records.get(index) {
                        Some(sub) if !sub.is_empty() => out.extend(self.schema.pack(sub)?),
                        // Missing or empty positions become all-zero filler.
                        _ => out.extend(self.zero_filler()?),
                    }
                }
            }
            Ref::Objects(_) => {
                for sub in records {
                    out.extend(self.schema.pack(sub)?);
                }
            }
            Ref::Bytes(field) => {
                let budget = record.get_count(field).ok_or(MessageError::UnresolvedRef {
                    field: field.clone(),
                })?;
                for sub in records {
                    let encoded = self.schema.pack(sub)?;
                    // Soft cutoff: a sub-record that would overflow the
                    // budget is dropped whole, not truncated.
                    if out.len() + encoded.len() > budget {
                        break;
                    }
                    out.extend(encoded);
                }
            }
        }

        Ok(out)
    }

    /// Decode this element's sub-records, resolving any length reference
    /// against the already-decoded fields in `ctx`.
    pub fn unpack<'a>(&self, ctx: &Record, buf: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let mut out = Vec::new();
        let mut rest = buf;

        match &self.count {
            Ref::Fixed(n) => {
                for _ in 0..*n {
                    let (sub, remaining) = self.schema.unpack_partial(rest)?;
                    out.push(sub);
                    rest = remaining;
                }
            }
            Ref::Objects(field) => {
                let n = ctx.get_count(field).ok_or(MessageError::UnresolvedRef {
                    field: field.clone(),
                })?;
                for _ in 0..n {
                    let (sub, remaining) = self.schema.unpack_partial(rest)?;
                    out.push(sub);
                    rest = remaining;
                }
            }
            Ref::Bytes(field) => {
                let budget = ctx.get_count(field).ok_or(MessageError::UnresolvedRef {
                    field: field.clone(),
                })?;
                let mut used = 0;
                while used < budget {
                    let before = rest.len();
                    let (sub, remaining) = self.schema.unpack_partial(rest)?;
                    // A zero-size sub-message can never make progress
                    // against the budget.
                    if remaining.len() == before {
                        break;
                    }
                    used += before - remaining.len();
                    out.push(sub);
                    rest = remaining;
                }
            }
        }

        Ok((Value::Records(out), rest))
    }

    /// Canonical projection: every sub-record through the sub-message's
    /// own `make`. The length reference is not consulted.
    pub fn make(&self, record: &Record) -> Result<Value> {
        let records = self.sub_records(record)?;
        let mut out = Vec::with_capacity(records.len());
        for sub in records {
            out.push(self.schema.make(sub)?);
        }
        Ok(Value::Records(out))
    }

    fn sub_records<'a>(&self, record: &'a Record) -> Result<&'a [Record]> {
        match record.get(&self.name) {
            Some(Value::Records(records)) => Ok(records),
            Some(_) => Err(MessageError::WrongType {
                field: self.name.clone(),
            }),
            None => Err(MessageError::MissingField {
                field: self.name.clone(),
            }),
        }
    }

    fn zero_filler(&self) -> Result<Vec<u8>> {
        self.schema
            .zero_filler()
            .ok_or(MessageError::UnsizedFiller {
                field: self.name.clone(),
            })
    }
}
