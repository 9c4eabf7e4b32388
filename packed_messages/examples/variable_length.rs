//! Variable-length fields: object-counted, byte-budgeted and fixed-count.

use packed_messages::{FieldDesc, Message, MessageError, Mode, Record, Ref};

fn sample() -> Message {
    Message::new(
        "Sample",
        vec![FieldDesc::scalar("id", "B"), FieldDesc::scalar("value", "H")],
        Mode::Little,
    )
    .expect("static schema")
}

fn main() -> Result<(), MessageError> {
    // The `count` field tells unpack how many samples follow. Packing
    // ignores it and emits whatever the sequence holds.
    let counted = Message::new(
        "Counted",
        vec![
            FieldDesc::scalar("count", "H"),
            FieldDesc::variable("samples", sample(), Ref::objects("count")),
        ],
        Mode::Little,
    )?;

    let record = Record::new().with("count", 2u16).with(
        "samples",
        vec![
            Record::new().with("id", 1u8).with("value", 100u16),
            Record::new().with("id", 2u8).with("value", 200u16),
        ],
    );
    let bytes = counted.pack(&record)?;
    println!("object-counted: {} bytes", bytes.len());
    println!("decoded: {:?}", counted.unpack(&bytes)?.get("samples"));

    // A byte budget instead: samples that would overflow it are dropped
    // whole. Size the budget field carefully.
    let budgeted = Message::new(
        "Budgeted",
        vec![
            FieldDesc::scalar("payload_len", "B"),
            FieldDesc::variable("samples", sample(), Ref::bytes("payload_len")),
        ],
        Mode::Little,
    )?;

    let record = Record::new().with("payload_len", 7u8).with(
        "samples",
        vec![
            Record::new().with("id", 1u8).with("value", 1u16),
            Record::new().with("id", 2u8).with("value", 2u16),
            Record::new().with("id", 3u8).with("value", 3u16),
        ],
    );
    // Each sample is 3 bytes; a budget of 7 keeps two and drops the third.
    let bytes = budgeted.pack(&record)?;
    println!("byte-budgeted: {} payload bytes", bytes.len() - 1);

    // A fixed count pads short input with zero filler.
    let fixed = Message::new(
        "Fixed",
        vec![FieldDesc::variable("samples", sample(), 4)],
        Mode::Little,
    )?;
    let record = Record::new().with(
        "samples",
        vec![Record::new().with("id", 9u8).with("value", 9u16)],
    );
    let bytes = fixed.pack(&record)?;
    println!("fixed-count: {} bytes ({} supplied)", bytes.len(), 1);

    Ok(())
}
