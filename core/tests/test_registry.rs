// File-level compress/decompress through the registry.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use huffpack_core::compression::{CompressOptions, CompressionError, Registry};
    use huffpack_core::huffman::{Container, FrequencyTable};

    fn roundtrip_file(content: &[u8]) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.bin");
        let packed = dir.path().join("input.huff");
        let restored = dir.path().join("restored.bin");
        fs::write(&input, content).unwrap();

        let registry = Registry::standard();
        registry.compress("huffman", &input, &packed, &CompressOptions::new()).unwrap();
        registry.decompress("huffman", &packed, &restored).unwrap();

        assert_eq!(fs::read(&restored).unwrap(), content.to_vec());
    }

    #[test]
    fn huffman_file_roundtrip() {
        roundtrip_file(b"aaaabbbcc");
        roundtrip_file(b"");
        roundtrip_file(&[0u8; 513]);
        roundtrip_file(&(0..=255u8).cycle().take(10_000).collect::<Vec<_>>());
    }

    #[test]
    fn output_is_a_readable_container() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.huff");
        let content = b"hello huffman";
        fs::write(&input, content).unwrap();

        Registry::standard()
            .select("huffman")
            .unwrap()
            .compress(&input, &output, &CompressOptions::new().with("level", 9))
            .unwrap();

        let container = Container::from_bytes(&fs::read(&output).unwrap()).unwrap();
        assert_eq!(container.table.len(), FrequencyTable::from_bytes(content).len());
        assert_eq!(container.table.len(), 10);
    }

    #[cfg(unix)]
    #[test]
    fn restored_file_keeps_read_access_for_others() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let packed = dir.path().join("input.huff");
        let restored = dir.path().join("restored.txt");
        fs::write(&input, b"shared output").unwrap();

        let registry = Registry::standard();
        registry.compress("huffman", &input, &packed, &CompressOptions::new()).unwrap();
        registry.decompress("huffman", &packed, &restored).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode();
        assert_eq!(mode(&packed) & 0o044, mode(&input) & 0o044);
        assert_eq!(mode(&restored) & 0o044, mode(&input) & 0o044);
        assert_eq!(mode(&restored) & 0o600, 0o600);
    }

    #[test]
    fn unknown_algorithm() {
        let dir = tempfile::tempdir().unwrap();
        let err = Registry::standard()
            .compress("brotli", &dir.path().join("a"), &dir.path().join("b"), &CompressOptions::new())
            .unwrap_err();
        assert!(matches!(err, CompressionError::UnsupportedAlgorithm { .. }));
        assert!(err.to_string().contains("brotli"));
    }

    #[test]
    fn missing_input_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.huff");
        let err = Registry::standard()
            .compress("huffman", &dir.path().join("missing"), &output, &CompressOptions::new())
            .unwrap_err();
        assert!(matches!(err, CompressionError::Io { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn failed_decompress_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.huff");
        let output = dir.path().join("out.txt");
        fs::write(&bogus, b"not an archive").unwrap();
        fs::write(&output, b"previous").unwrap();

        let err = Registry::standard().decompress("huffman", &bogus, &output).unwrap_err();
        assert!(matches!(err, CompressionError::MalformedContainer(_)));
        assert_eq!(fs::read(&output).unwrap(), b"previous".to_vec());
    }

    #[test]
    fn external_tools_do_not_decompress() {
        let registry = Registry::standard();
        for name in ["7zip", "paq"] {
            let err = registry
                .decompress(name, Path::new("in"), Path::new("out"))
                .unwrap_err();
            assert!(matches!(err, CompressionError::DecompressUnsupported { .. }), "{}", name);
        }
    }
}
