use huffpack::analyzer::compare_texts;
use huffpack::{Artifact, HuffError, compress, decompress_by_table, unpack};

#[test]
fn small_alphabet_end_to_end() {
    let text = "aabbbcccc";
    let compressed = compress(text);

    let a = compressed.table.get('a').unwrap().len();
    let b = compressed.table.get('b').unwrap().len();
    let c = compressed.table.get('c').unwrap().len();
    assert!(c < a && c < b);
    assert!(a >= b);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abc.huf");
    let artifact = Artifact::new(compressed.clone());
    artifact.save(&path).unwrap();

    let loaded = Artifact::load(&path).unwrap();
    assert_eq!(loaded, artifact);
    assert_eq!(loaded.clone().into_compressed(), compressed);

    let bits = unpack(&loaded.payload, loaded.padding).unwrap();
    assert_eq!(decompress_by_table(&bits, &loaded.table), text);
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.huf");
    Artifact::new(compress("hello hello")).save(&path).unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("out.huf")]);
}

#[test]
fn save_overwrites_existing_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.huf");
    Artifact::new(compress("first version")).save(&path).unwrap();
    Artifact::new(compress("second")).save(&path).unwrap();
    assert_eq!(Artifact::load(&path).unwrap().decompress(true).unwrap(), "second");
}

#[test]
fn load_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Artifact::load(&dir.path().join("nope.huf")).unwrap_err();
    assert!(matches!(err, HuffError::Io { .. }));
}

#[test]
fn save_into_missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/out.huf");
    let err = Artifact::new(compress("abc")).save(&path).unwrap_err();
    assert!(matches!(err, HuffError::Io { .. }));
}

#[test]
fn truncated_artifact_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cut.huf");
    let data = Artifact::new(compress("some longer text to compress"))
        .to_bytes()
        .unwrap();
    std::fs::write(&path, &data[..data.len() / 4]).unwrap();
    assert!(matches!(
        Artifact::load(&path),
        Err(HuffError::CorruptArtifact(_))
    ));
}

#[test]
fn multiline_unicode_document_survives_disk() {
    let text = "Primera línea con acentos: áéíóú ñ.\n\
                Second line, with punctuation; and digits 0123456789.\n\
                第三行 — emoji 🎉🎉 and tabs\tinside.\n";
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.huf");
    Artifact::new(compress(text)).save(&path).unwrap();

    let restored = Artifact::load(&path).unwrap().decompress(true).unwrap();
    assert_eq!(restored, text);
    assert!(compare_texts(text, &restored, 25).is_identical());
}

#[test]
fn compressed_artifact_is_smaller_for_repetitive_text() {
    let text = "the rain in spain stays mainly in the plain. ".repeat(200);
    let data = Artifact::new(compress(&text)).to_bytes().unwrap();
    assert!(data.len() < text.len() * 3 / 5);
}

#[test]
fn corrupted_payload_still_decodes_permissively() {
    let mut artifact = Artifact::new(compress("aabbbcccc"));
    // Flip the last meaningful bit; the tail no longer ends on a code boundary.
    let last = artifact.payload.len() - 1;
    artifact.payload[last] ^= 0b0000_0100;
    let permissive = artifact.decompress(false).unwrap();
    assert_ne!(permissive, "aabbbcccc");
    assert!(matches!(
        artifact.decompress(true),
        Err(HuffError::TrailingBits(1))
    ));
}
