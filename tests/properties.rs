use huffpack::{Artifact, BitString, compress, decompress_by_table, pack, unpack};
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-e]{0,64}",
        "\\PC{0,128}",
        any::<String>(),
    ]
}

proptest! {
    #[test]
    fn compress_then_decode_returns_input(text in arb_text()) {
        let compressed = compress(&text);
        let bits = unpack(&compressed.payload, compressed.padding).unwrap();
        prop_assert_eq!(decompress_by_table(&bits, &compressed.table), text);
    }

    #[test]
    fn generated_tables_are_prefix_free(text in arb_text()) {
        let table = compress(&text).table;
        let codes: Vec<_> = table.iter().map(|(_, code)| code.clone()).collect();
        for (i, a) in codes.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(a), "{} prefixes {}", a, b);
                }
            }
        }
        prop_assert!(table.is_prefix_free());
    }

    #[test]
    fn padding_stays_within_a_byte(text in arb_text()) {
        let compressed = compress(&text);
        prop_assert!(compressed.padding <= 7);
        let bits = compressed.bits().unwrap();
        prop_assert_eq!(compressed.payload.len() * 8 - compressed.padding as usize, bits.len());
        if bits.len() % 8 == 0 {
            prop_assert_eq!(compressed.padding, 0);
        }
    }

    #[test]
    fn unpack_inverts_pack(raw in proptest::collection::vec(any::<bool>(), 0..200)) {
        let bits = BitString::from(raw);
        let (bytes, padding) = pack(&bits);
        prop_assert_eq!(unpack(&bytes, padding).unwrap(), bits);
    }

    #[test]
    fn repeated_symbol_costs_one_bit(symbol in any::<char>(), count in 1usize..100) {
        let text: String = std::iter::repeat_n(symbol, count).collect();
        let compressed = compress(&text);
        prop_assert_eq!(compressed.table.len(), 1);
        prop_assert_eq!(compressed.table.get(symbol).unwrap().to_string(), "0");
        prop_assert_eq!(compressed.bit_len(), count);
    }

    #[test]
    fn artifact_bytes_roundtrip(text in arb_text().prop_filter("non-empty", |t| !t.is_empty())) {
        let artifact = Artifact::new(compress(&text));
        let restored = Artifact::from_bytes(&artifact.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(&restored, &artifact);
        prop_assert_eq!(restored.decompress(true).unwrap(), text);
    }

    #[test]
    fn compression_is_deterministic(text in arb_text()) {
        prop_assert_eq!(compress(&text), compress(&text));
    }
}
