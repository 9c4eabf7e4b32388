//! The element sum type and its registry dispatch.
//!
//! A message schema is an ordered list of field descriptions. Each
//! description is classified by trying every element variant's shape
//! predicate in a fixed priority order and constructing the first match.
//! Classification happens once at schema build time, never per
//! pack/unpack call.

use wire_formats::Mode;

use crate::basic::ElementBasic;
use crate::error::{MessageError, Result};
use crate::labels::ElementLabels;
use crate::message::Message;
use crate::pad::ElementPad;
use crate::value::{Record, Value};
use crate::variable::ElementVariable;

/// How a variable-length element finds its repeat count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ref {
    /// Fixed count of sub-records, baked into the schema.
    Fixed(usize),
    /// The named field holds the number of sub-records.
    Objects(String),
    /// The named field holds a byte budget for the encoded payload.
    Bytes(String),
}

impl Ref {
    pub fn objects(field: &str) -> Self {
        Ref::Objects(field.to_string())
    }

    pub fn bytes(field: &str) -> Self {
        Ref::Bytes(field.to_string())
    }

    /// The referenced field name, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Ref::Fixed(_) => None,
            Ref::Objects(f) | Ref::Bytes(f) => Some(f),
        }
    }
}

impl From<usize> for Ref {
    fn from(n: usize) -> Self {
        Ref::Fixed(n)
    }
}

/// A raw schema-author field description, before classification.
///
/// The shapes mirror the description tuples a schema is written as:
/// `Format` covers both plain fields and padding (the pad grammar
/// decides), `Subrecords` is a variable-length field, `Labels` an
/// enumerated one.
#[derive(Debug, Clone)]
pub enum FieldDesc {
    Format {
        name: String,
        format: String,
    },
    Subrecords {
        name: String,
        schema: Message,
        count: Ref,
    },
    Labels {
        name: String,
        format: String,
        variants: Vec<(String, u64)>,
    },
}

impl FieldDesc {
    /// A plain fixed-format field, or padding when the format matches the
    /// pad grammar (the name is discarded for padding).
    pub fn scalar(name: &str, format: &str) -> Self {
        FieldDesc::Format {
            name: name.to_string(),
            format: format.to_string(),
        }
    }

    /// A repeated sub-structure whose count comes from `count`.
    pub fn variable(name: &str, schema: Message, count: impl Into<Ref>) -> Self {
        FieldDesc::Subrecords {
            name: name.to_string(),
            schema,
            count: count.into(),
        }
    }

    /// An enumerated field: an integer format plus label/discriminant pairs.
    pub fn labelled<'a>(
        name: &str,
        format: &str,
        variants: impl IntoIterator<Item = (&'a str, u64)>,
    ) -> Self {
        FieldDesc::Labels {
            name: name.to_string(),
            format: format.to_string(),
            variants: variants
                .into_iter()
                .map(|(label, value)| (label.to_string(), value))
                .collect(),
        }
    }

    /// The declared field name (present even for padding, where it is
    /// discarded at construction).
    pub fn name(&self) -> &str {
        match self {
            FieldDesc::Format { name, .. }
            | FieldDesc::Subrecords { name, .. }
            | FieldDesc::Labels { name, .. } => name,
        }
    }
}

/// One schema element: the unit a message packs and unpacks by.
#[derive(Debug, Clone)]
pub enum Element {
    Pad(ElementPad),
    Variable(ElementVariable),
    Labels(ElementLabels),
    Basic(ElementBasic),
}

/// Most specific shape first: the pad grammar would otherwise be eaten by
/// the basic fallback.
type Valid = fn(&FieldDesc) -> bool;
type Build = fn(FieldDesc, Mode, usize) -> Result<Element>;

const REGISTRY: &[(Valid, Build)] = &[
    (ElementPad::valid, |f, _, a| {
        ElementPad::new(f, a).map(Element::Pad)
    }),
    (ElementVariable::valid, |f, m, _| {
        ElementVariable::new(f, m).map(Element::Variable)
    }),
    (ElementLabels::valid, |f, m, _| {
        ElementLabels::new(f, m).map(Element::Labels)
    }),
    (ElementBasic::valid, |f, m, _| {
        ElementBasic::new(f, m).map(Element::Basic)
    }),
];

impl Element {
    /// Classify a field description and construct the matching element.
    pub fn from_field(field: FieldDesc, mode: Mode, alignment: usize) -> Result<Self> {
        for (valid, build) in REGISTRY {
            if valid(&field) {
                return build(field, mode, alignment);
            }
        }
        Err(MessageError::SchemaDefinition {
            field: field.name().to_string(),
        })
    }

    /// The field name this element decodes into; `None` for padding.
    pub fn name(&self) -> Option<&str> {
        match self {
            Element::Pad(_) => None,
            Element::Variable(e) => Some(e.name()),
            Element::Labels(e) => Some(e.name()),
            Element::Basic(e) => Some(e.name()),
        }
    }

    /// The field name another element may reference for its length.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Element::Variable(e) => e.count().field(),
            _ => None,
        }
    }

    /// Check the record supplies what this element needs before packing.
    pub fn validate(&self, record: &Record) -> Result<()> {
        match self {
            Element::Pad(_) => Ok(()),
            Element::Variable(e) => e.validate(record),
            Element::Labels(e) => e.validate(record),
            Element::Basic(e) => e.validate(record),
        }
    }

    /// Pack this element's own field(s) from the record.
    pub fn pack(&self, record: &Record) -> Result<Vec<u8>> {
        match self {
            Element::Pad(e) => Ok(e.pack()),
            Element::Variable(e) => e.pack(record),
            Element::Labels(e) => e.pack(record),
            Element::Basic(e) => e.pack(record),
        }
    }

    /// Consume exactly this element's bytes from the front of `buf`,
    /// returning the decoded value (`None` for padding) and the rest.
    /// `ctx` is the decoded-so-far record, for length references.
    pub fn unpack<'a>(&self, ctx: &Record, buf: &'a [u8]) -> Result<(Option<Value>, &'a [u8])> {
        match self {
            Element::Pad(e) => e.unpack(buf).map(|rest| (None, rest)),
            Element::Variable(e) => e.unpack(ctx, buf).map(|(v, rest)| (Some(v), rest)),
            Element::Labels(e) => e.unpack(buf).map(|(v, rest)| (Some(v), rest)),
            Element::Basic(e) => e.unpack(buf).map(|(v, rest)| (Some(v), rest)),
        }
    }

    /// Project the record's value for this field into its canonical packed
    /// shape; `None` for padding.
    pub fn make(&self, record: &Record) -> Result<Option<Value>> {
        match self {
            Element::Pad(_) => Ok(None),
            Element::Variable(e) => e.make(record).map(Some),
            Element::Labels(e) => e.make(record).map(Some),
            Element::Basic(e) => e.make(record).map(Some),
        }
    }

    /// Rebind byte order. Idempotent; recurses into embedded sub-messages.
    /// Exclusive access via `&mut` stands in for the external
    /// synchronization a shared rebind would otherwise need.
    pub fn set_mode(&mut self, mode: Mode) {
        match self {
            Element::Pad(e) => e.set_mode(mode),
            Element::Variable(e) => e.set_mode(mode),
            Element::Labels(e) => e.set_mode(mode),
            Element::Basic(e) => e.set_mode(mode),
        }
    }

    /// Statically-known packed size, when the element has one.
    pub fn packed_size(&self) -> Option<usize> {
        match self {
            Element::Pad(e) => Some(e.padded_len()),
            Element::Variable(e) => e.packed_size(),
            Element::Labels(e) => Some(e.packed_size()),
            Element::Basic(e) => Some(e.packed_size()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_beats_basic_fallback() {
        let element = Element::from_field(FieldDesc::scalar("pad1", "3x"), Mode::Native, 1).unwrap();
        assert!(matches!(element, Element::Pad(_)));
        assert_eq!(element.name(), None);
    }

    #[test]
    fn test_basic_fallback() {
        let element = Element::from_field(FieldDesc::scalar("a", "H"), Mode::Native, 1).unwrap();
        assert!(matches!(element, Element::Basic(_)));
        assert_eq!(element.name(), Some("a"));
    }

    #[test]
    fn test_variable_shape() {
        let sub = Message::new("Sub", vec![FieldDesc::scalar("x", "B")], Mode::Native).unwrap();
        let element =
            Element::from_field(FieldDesc::variable("items", sub, 3), Mode::Native, 1).unwrap();
        assert!(matches!(element, Element::Variable(_)));
        assert_eq!(element.reference(), None);
    }

    #[test]
    fn test_labels_shape() {
        let element = Element::from_field(
            FieldDesc::labelled("kind", "B", [("one", 1), ("two", 2)]),
            Mode::Native,
            1,
        )
        .unwrap();
        assert!(matches!(element, Element::Labels(_)));
    }

    #[test]
    fn test_no_variant_accepts() {
        // Neither the pad grammar nor any other predicate accepts these, so
        // the registry reports a schema definition error naming the field.
        for format in ["Z", "", "1", "9S", "/"] {
            let err =
                Element::from_field(FieldDesc::scalar("bad", format), Mode::Native, 1).unwrap_err();
            assert_eq!(
                err,
                MessageError::SchemaDefinition {
                    field: "bad".to_string()
                },
                "{format:?}"
            );
        }
    }
}
