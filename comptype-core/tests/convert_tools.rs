//! Conversions through the real system tools.
//!
//! Each test returns early when one of the tools it needs is not installed.

use comptype_core::{
    ComptypeError, Format, compress, convert, convert_detailed, decompress, detect_format,
    find_program, run_command_with,
};
use std::fs;
use std::path::{Path, PathBuf};

const CONTENT: &str = "id,name,value\n1,alpha,0.5\n2,beta,1.5\n3,gamma,2.5\n";

fn tools_available(tools: &[&str]) -> bool {
    let missing: Vec<&str> = tools
        .iter()
        .copied()
        .filter(|tool| find_program(tool).is_none())
        .collect();
    if !missing.is_empty() {
        eprintln!("skipping: missing tools {:?}", missing);
        return false;
    }
    true
}

fn tools_for(format: Format) -> Vec<&'static str> {
    let mut tools = codec_tools(format);
    tools.insert(0, "file");
    tools
}

/// Programs named by the format's templates, without the sniffing tool.
fn codec_tools(format: Format) -> Vec<&'static str> {
    let mut tools = Vec::new();
    for template in [format.compress_cmd(), format.decompress_cmd()]
        .into_iter()
        .chain(format.list_cmd())
    {
        if let Some(program) = template.split_whitespace().find(|t| !t.contains('=')) {
            tools.push(program);
        }
    }
    tools
}

fn write_plain(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, CONTENT.repeat(20)).expect("write test file");
    path
}

#[test]
fn test_round_trip_each_format() -> Result<(), Box<dyn std::error::Error>> {
    for format in [Format::Gzip, Format::Bzip2, Format::Xz, Format::Zip] {
        if !tools_available(&tools_for(format)) {
            continue;
        }

        let dir = tempfile::tempdir()?;
        let original = write_plain(dir.path(), "data.txt");
        let expected = fs::read(&original)?;

        let compressed = convert(&original, format.name())?;
        assert_eq!(
            compressed,
            dir.path().join(format!("data.txt.{}", format.extension()))
        );
        assert!(compressed.exists(), "{format}: no output");
        assert!(!original.exists(), "{format}: input left behind");
        assert_eq!(detect_format(&compressed), format);

        let restored = convert(&compressed, "plain")?;
        assert_eq!(restored, original, "{format}");
        assert_eq!(fs::read(&restored)?, expected, "{format}: content changed");
        assert!(!compressed.exists(), "{format}: archive left behind");
        assert_eq!(detect_format(&restored), Format::Plain);
    }
    Ok(())
}

#[test]
fn test_compress_decompress_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    for format in [Format::Gzip, Format::Bzip2, Format::Xz, Format::Zip] {
        if !tools_available(&codec_tools(format)) {
            continue;
        }

        let dir = tempfile::tempdir()?;
        let original = write_plain(dir.path(), "data.txt");
        let expected = fs::read(&original)?;

        let compressed = compress(&original, format)?;
        assert_eq!(
            compressed,
            dir.path().join(format!("data.txt.{}", format.extension()))
        );
        assert!(compressed.exists(), "{format}: no output");
        assert!(!original.exists(), "{format}: input left behind");

        let restored = decompress(&compressed, format)?;
        assert_eq!(restored, original, "{format}");
        assert_eq!(fs::read(&restored)?, expected, "{format}: content changed");
        assert!(!compressed.exists(), "{format}: compressed file left behind");
    }
    Ok(())
}

#[test]
fn test_zip_member_renamed_without_detection() -> Result<(), Box<dyn std::error::Error>> {
    if !tools_available(&codec_tools(Format::Zip)) {
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let inner = write_plain(dir.path(), "inner.csv");
    let expected = fs::read(&inner)?;
    let archive = dir.path().join("archive.zip");
    fs::rename(compress(&inner, Format::Zip)?, &archive)?;

    let restored = decompress(&archive, Format::Zip)?;
    assert_eq!(restored, dir.path().join("inner.csv"));
    assert_eq!(fs::read(&restored)?, expected);
    assert!(!archive.exists());
    Ok(())
}

#[test]
fn test_zip_member_count_without_detection() -> Result<(), Box<dyn std::error::Error>> {
    if !tools_available(&codec_tools(Format::Zip)) {
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let first = write_plain(dir.path(), "a.txt");
    let second = write_plain(dir.path(), "b.txt");
    let archive = dir.path().join("archive.zip");
    let out = run_command_with(
        &second,
        Format::Zip.compress_cmd(),
        &[archive.as_os_str(), first.as_os_str()],
    );
    assert!(out.success, "{}", out.output);

    let err = decompress(&archive, Format::Zip).expect_err("two members must be rejected");
    assert!(
        matches!(err, ComptypeError::UnsupportedMemberCount { count: 2, .. }),
        "{err:?}"
    );
    assert!(archive.exists());
    Ok(())
}

#[test]
fn test_empty_zip_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    if !tools_available(&["zipinfo"]) {
        return Ok(());
    }

    // End-of-central-directory record only: a valid archive with no members.
    let mut empty = b"PK\x05\x06".to_vec();
    empty.resize(22, 0);

    let dir = tempfile::tempdir()?;
    let archive = dir.path().join("empty.zip");
    fs::write(&archive, &empty)?;

    let err = decompress(&archive, Format::Zip).expect_err("empty archive must be rejected");
    assert!(
        matches!(err, ComptypeError::UnsupportedMemberCount { count: 0, .. }),
        "{err:?}"
    );
    assert!(err.to_string().contains("No file"));
    assert_eq!(fs::read(&archive)?, empty);
    Ok(())
}

#[test]
fn test_plain_to_gzip() -> Result<(), Box<dyn std::error::Error>> {
    if !tools_available(&tools_for(Format::Gzip)) {
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let source = write_plain(dir.path(), "data.txt");

    let conversion = convert_detailed(&source, "gzip")?;
    assert_eq!(conversion.source_format, Format::Plain);
    assert_eq!(conversion.target_format, Format::Gzip);
    assert_eq!(conversion.destination, dir.path().join("data.txt.gz"));
    assert!(conversion.destination.exists());
    // `gzip -f` replaces its input.
    assert!(!source.exists());
    Ok(())
}

#[test]
fn test_gzip_to_bzip2() -> Result<(), Box<dyn std::error::Error>> {
    if !tools_available(&["file", "gzip", "gunzip", "bzip2", "bunzip2"]) {
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let plain = write_plain(dir.path(), "data.txt");
    let expected = fs::read(&plain)?;
    let gz = compress(&plain, Format::Gzip)?;
    assert_eq!(gz, dir.path().join("data.txt.gz"));

    let conversion = convert_detailed(&gz, "bzip2")?;
    assert_eq!(conversion.source_format, Format::Gzip);
    assert_eq!(conversion.destination, dir.path().join("data.txt.bz2"));
    assert!(!gz.exists());
    assert_eq!(detect_format(&conversion.destination), Format::Bzip2);

    let restored = decompress(&conversion.destination, Format::Bzip2)?;
    assert_eq!(fs::read(restored)?, expected);
    Ok(())
}

#[test]
fn test_gzip_to_gzip_is_not_double_wrapped() -> Result<(), Box<dyn std::error::Error>> {
    if !tools_available(&tools_for(Format::Gzip)) {
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let plain = write_plain(dir.path(), "data.txt");
    let expected = fs::read(&plain)?;
    let gz = compress(&plain, Format::Gzip)?;

    let again = convert(&gz, "gzip")?;
    assert_eq!(again, gz);
    assert_eq!(detect_format(&again), Format::Gzip);

    let restored = decompress(&again, Format::Gzip)?;
    assert_eq!(detect_format(&restored), Format::Plain);
    assert_eq!(fs::read(restored)?, expected);
    Ok(())
}

#[test]
fn test_zip_member_name_differs_from_archive() -> Result<(), Box<dyn std::error::Error>> {
    if !tools_available(&tools_for(Format::Zip)) {
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let inner = write_plain(dir.path(), "inner.csv");
    let expected = fs::read(&inner)?;
    let zipped = compress(&inner, Format::Zip)?;
    assert!(!inner.exists());

    let archive = dir.path().join("archive.zip");
    fs::rename(&zipped, &archive)?;

    let restored = convert(&archive, "plain")?;
    assert_eq!(restored, dir.path().join("inner.csv"));
    assert_eq!(fs::read(&restored)?, expected);
    assert!(!archive.exists());
    Ok(())
}

#[test]
fn test_zip_with_several_members_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    if !tools_available(&tools_for(Format::Zip)) {
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let first = write_plain(dir.path(), "a.txt");
    let second = write_plain(dir.path(), "b.txt");
    let archive = dir.path().join("archive.zip");

    let out = run_command_with(
        &second,
        Format::Zip.compress_cmd(),
        &[archive.as_os_str(), first.as_os_str()],
    );
    assert!(out.success, "{}", out.output);

    let err = convert(&archive, "gzip").expect_err("two members must be rejected");
    assert!(
        matches!(err, ComptypeError::UnsupportedMemberCount { count: 2, .. }),
        "{err:?}"
    );
    assert!(err.to_string().contains("More than one file"));
    assert!(archive.exists());
    Ok(())
}

#[test]
fn test_decompress_failure_surfaces_tool_output() -> Result<(), Box<dyn std::error::Error>> {
    if !tools_available(&["gunzip"]) {
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let fake = write_plain(dir.path(), "fake.gz");

    let err = decompress(&fake, Format::Gzip).expect_err("plain text is not gzip");
    match err {
        ComptypeError::CommandFailed { output } => assert!(!output.is_empty()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(fake.exists());
    Ok(())
}

#[test]
fn test_unknown_target_name_means_plain() -> Result<(), Box<dyn std::error::Error>> {
    if !tools_available(&["file"]) {
        return Ok(());
    }

    let dir = tempfile::tempdir()?;
    let source = write_plain(dir.path(), "data.txt");

    let destination = convert(&source, "lz4")?;
    assert_eq!(destination, source);
    assert!(source.exists());
    assert_eq!(
        fs::read(&source)?,
        CONTENT.repeat(20).as_bytes(),
        "file must be untouched"
    );
    Ok(())
}

#[test]
fn test_detect_directory_and_empty_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    if find_program("file").is_none() {
        assert_eq!(detect_format(dir.path()), Format::Undefined);
        assert_eq!(detect_format(""), Format::Undefined);
        return;
    }

    assert_eq!(detect_format(dir.path()), Format::Plain);
    assert!(matches!(
        detect_format(""),
        Format::Plain | Format::Undefined
    ));
}
