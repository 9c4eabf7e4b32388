//! Pack and unpack a small fixed-layout message.

use packed_messages::{FieldDesc, Message, MessageError, Mode, Record};

fn main() -> Result<(), MessageError> {
    let schema = Message::new(
        "Header",
        vec![
            FieldDesc::scalar("version", "B"),
            FieldDesc::scalar("pad", "3x"),
            FieldDesc::labelled("kind", "B", [("data", 0), ("control", 1)]),
            FieldDesc::scalar("sequence", "H"),
            FieldDesc::scalar("tag", "4s"),
        ],
        Mode::Network,
    )?;

    let record = Record::new()
        .with("version", 2u8)
        .with("kind", "control")
        .with("sequence", 777u16)
        .with("tag", "demo");

    let bytes = schema.pack(&record)?;
    println!("packed {} bytes: {bytes:02X?}", bytes.len());

    let decoded = schema.unpack(&bytes)?;
    for (name, value) in decoded.iter() {
        println!("{name}: {value:?}");
    }

    Ok(())
}
