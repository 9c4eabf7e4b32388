// tests/prop_roundtrip.rs

use proptest::prelude::*;

use packed_messages::{FieldDesc, Message, Mode, Record, Ref, Value};

fn sub_message(mode: Mode) -> Message {
    Message::new(
        "Sub",
        vec![FieldDesc::scalar("x", "B"), FieldDesc::scalar("y", "H")],
        mode,
    )
    .unwrap()
}

fn sub_record(x: u8, y: u16) -> Record {
    Record::new().with("x", x).with("y", y)
}

fn any_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::Native),
        Just(Mode::Little),
        Just(Mode::Big),
        Just(Mode::Network),
    ]
}

proptest! {
    #[test]
    fn prop_pad_roundtrip_consumes_exactly_its_bytes(
        base in 0usize..32,
        alignment in 1usize..8,
    ) {
        let schema = Message::with_alignment(
            "PadOnly",
            vec![FieldDesc::scalar("pad", &format!("{base}x"))],
            Mode::Native,
            alignment,
        ).unwrap();

        let bytes = schema.pack(&Record::new()).unwrap();

        // Smallest multiple of the alignment >= base, always < base + alignment.
        prop_assert_eq!(bytes.len() % alignment, 0);
        prop_assert!(bytes.len() >= base);
        prop_assert!(bytes.len() < base + alignment);
        prop_assert!(bytes.iter().all(|b| *b == 0));

        // Unpacking its own output leaves nothing behind and decodes to
        // nothing.
        let record = schema.unpack(&bytes).unwrap();
        prop_assert!(record.is_empty());
    }

    #[test]
    fn prop_scalar_roundtrip(
        a in any::<i16>(),
        b in any::<u32>(),
        mode in any_mode(),
    ) {
        let schema = Message::new(
            "Scalars",
            vec![FieldDesc::scalar("a", "h"), FieldDesc::scalar("b", "I")],
            mode,
        ).unwrap();

        let record = Record::new().with("a", a).with("b", b);
        let bytes = schema.pack(&record).unwrap();
        prop_assert_eq!(bytes.len(), 6);

        let decoded = schema.unpack(&bytes).unwrap();
        prop_assert_eq!(decoded.get("a"), Some(&Value::Signed(a as i64)));
        prop_assert_eq!(decoded.get("b"), Some(&Value::Unsigned(b as u64)));
    }

    #[test]
    fn prop_fixed_count_roundtrip(
        subs in prop::collection::vec((any::<u8>(), any::<u16>()), 3),
        mode in any_mode(),
    ) {
        let schema = Message::new(
            "Fixed",
            vec![FieldDesc::variable("items", sub_message(mode), 3)],
            mode,
        ).unwrap();

        let items: Vec<Record> = subs.iter().map(|(x, y)| sub_record(*x, *y)).collect();
        let record = Record::new().with("items", items.clone());

        let bytes = schema.pack(&record).unwrap();
        prop_assert_eq!(bytes.len(), 3 * 3);

        let decoded = schema.unpack(&bytes).unwrap();
        prop_assert_eq!(decoded.get("items"), Some(&Value::Records(items)));
    }

    #[test]
    fn prop_fixed_count_pads_to_count(supplied in 0usize..3) {
        let schema = Message::new(
            "Fixed",
            vec![FieldDesc::variable("items", sub_message(Mode::Little), 3)],
            Mode::Little,
        ).unwrap();

        let items: Vec<Record> = (0..supplied).map(|i| sub_record(i as u8 + 1, 1)).collect();
        let bytes = schema.pack(&Record::new().with("items", items)).unwrap();

        // Always exactly count * sub_size bytes, missing positions all-zero.
        prop_assert_eq!(bytes.len(), 9);
        prop_assert!(bytes[supplied * 3..].iter().all(|b| *b == 0));
    }

    #[test]
    fn prop_dynamic_count_roundtrip(
        subs in prop::collection::vec((any::<u8>(), any::<u16>()), 0..8),
        mode in any_mode(),
    ) {
        let schema = Message::new(
            "Dyn",
            vec![
                FieldDesc::scalar("n", "H"),
                FieldDesc::variable("items", sub_message(mode), Ref::objects("n")),
            ],
            mode,
        ).unwrap();

        let items: Vec<Record> = subs.iter().map(|(x, y)| sub_record(*x, *y)).collect();
        let record = Record::new()
            .with("n", subs.len() as u16)
            .with("items", items.clone());

        let bytes = schema.pack(&record).unwrap();
        let decoded = schema.unpack(&bytes).unwrap();
        prop_assert_eq!(decoded.get("items"), Some(&Value::Records(items)));
    }

    /// The byte-counted pack path drops whole sub-records that would
    /// overflow the budget; this pins the documented soft-cutoff policy.
    #[test]
    fn prop_byte_budget_soft_cutoff(
        budget in 0usize..32,
        supplied in 0usize..8,
    ) {
        let schema = Message::new(
            "Budget",
            vec![
                FieldDesc::scalar("len", "B"),
                FieldDesc::variable("items", sub_message(Mode::Little), Ref::bytes("len")),
            ],
            Mode::Little,
        ).unwrap();

        let items: Vec<Record> = (0..supplied).map(|i| sub_record(i as u8, 0)).collect();
        let record = Record::new()
            .with("len", budget as u8)
            .with("items", items);

        let bytes = schema.pack(&record).unwrap();
        let payload = bytes.len() - 1;

        // Sub-records encode to 3 bytes; whatever fits the budget is kept,
        // the rest is silently dropped.
        let kept = supplied.min(budget / 3);
        prop_assert_eq!(payload, kept * 3);
    }

    #[test]
    fn prop_mode_rebind_preserves_length(
        a in any::<u16>(),
        b in any::<u64>(),
    ) {
        let mut schema = Message::new(
            "Rebind",
            vec![FieldDesc::scalar("a", "H"), FieldDesc::scalar("b", "Q")],
            Mode::Little,
        ).unwrap();
        let record = Record::new().with("a", a).with("b", b);

        let little = schema.pack(&record).unwrap();
        schema.set_mode(Mode::Big);
        let big = schema.pack(&record).unwrap();

        prop_assert_eq!(little.len(), big.len());

        // Each field's bytes are exactly reversed, never reordered across
        // field boundaries.
        let mut reversed: Vec<u8> = Vec::new();
        reversed.extend(little[0..2].iter().rev());
        reversed.extend(little[2..10].iter().rev());
        prop_assert_eq!(reversed, big);
    }
}

#[test]
fn byte_budget_example_from_the_docs() {
    // Sub-records of encoded size 4, budget 10: two fit, two are dropped.
    let four_wide = Message::new(
        "Four",
        vec![FieldDesc::scalar("a", "H"), FieldDesc::scalar("b", "H")],
        Mode::Little,
    )
    .unwrap();
    let schema = Message::new(
        "Budget",
        vec![
            FieldDesc::scalar("len", "B"),
            FieldDesc::variable("items", four_wide, Ref::bytes("len")),
        ],
        Mode::Little,
    )
    .unwrap();

    let sub = |a: u16, b: u16| Record::new().with("a", a).with("b", b);
    let record = Record::new().with("len", 10u8).with(
        "items",
        vec![sub(1, 1), sub(2, 2), sub(3, 3), sub(4, 4)],
    );

    let bytes = schema.pack(&record).unwrap();
    assert_eq!(bytes.len() - 1, 8);
}
