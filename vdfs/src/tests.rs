use std::io::Cursor;

use crate::{Archive, ArchiveWriter, FileNode, VdfError};

fn sample_archive() -> Result<Vec<u8>, VdfError> {
    let mut buf = Vec::new();
    ArchiveWriter::new("Meshes for testing")
        .add_file("README.TXT", b"hello".to_vec())
        .add_file("MESHES/_COMPILED/CHEST.MRM", b"mesh".to_vec())
        .add_file("MESHES\\_COMPILED\\BARREL-C.TEX", b"tex!".to_vec())
        .write(&mut buf)?;
    Ok(buf)
}

#[test]
fn header_and_catalog() -> Result<(), anyhow::Error> {
    let archive = Archive::from_reader(&mut Cursor::new(sample_archive()?))?;

    assert_eq!(archive.header().comment, "Meshes for testing");
    assert_eq!(archive.header().entry_count, 5);
    assert_eq!(archive.header().file_count, 3);
    assert_eq!(archive.header().catalog_offset, 296);

    let root = archive.children(None)?;
    assert_eq!(root.len(), 2);
    assert_eq!(root[0].name, "MESHES");
    assert!(root[0].is_dir());
    assert_eq!(root[1].name, "README.TXT");
    assert!(root[1].is_last());

    let compiled = archive.children(Some(&root[0]))?;
    assert_eq!(compiled.len(), 1);
    assert_eq!(compiled[0].name, "_COMPILED");
    Ok(())
}

#[test]
fn files_are_found_depth_first() -> Result<(), anyhow::Error> {
    let archive = Archive::from_reader(&mut Cursor::new(sample_archive()?))?;
    let files = archive.files()?;

    let paths = files.iter().map(|f| f.path.as_str()).collect::<Vec<_>>();
    assert_eq!(
        paths,
        vec![
            "README.TXT",
            "MESHES/_COMPILED/BARREL-C.TEX",
            "MESHES/_COMPILED/CHEST.MRM"
        ]
    );
    assert_eq!(files[2].name, "CHEST.MRM");
    Ok(())
}

#[test]
fn file_contents_are_read() -> Result<(), anyhow::Error> {
    let bytes = sample_archive()?;
    let archive = Archive::from_reader(&mut Cursor::new(bytes.clone()))?;
    let files = archive.files()?;

    let chest = files.iter().find(|f| f.name == "CHEST.MRM").expect("chest is in the archive");
    assert_eq!(archive.read_from(&mut Cursor::new(bytes.clone()), chest)?, b"mesh");

    let readme = files.iter().find(|f| f.name == "README.TXT").expect("readme is in the archive");
    assert_eq!(archive.read_from(&mut Cursor::new(bytes), readme)?, b"hello");
    Ok(())
}

#[test]
fn reading_past_the_end_fails() -> Result<(), anyhow::Error> {
    let bytes = sample_archive()?;
    let archive = Archive::from_reader(&mut Cursor::new(bytes.clone()))?;
    let bogus = FileNode {
        path: "BOGUS".to_string(),
        name: "BOGUS".to_string(),
        offset: bytes.len() as u32 - 2,
        size: 16,
    };

    let result = archive.read_from(&mut Cursor::new(bytes), &bogus);
    assert!(matches!(result, Err(VdfError::EntryOutOfBounds { .. })));
    Ok(())
}

#[test]
fn invalid_signature_is_rejected() {
    let mut bytes = vec![0x1Au8; 256];
    bytes.extend_from_slice(b"NOT_A_VDF_FILE!!");
    bytes.extend_from_slice(&[0u8; 24]);

    let result = Archive::from_reader(&mut Cursor::new(bytes));
    assert!(matches!(result, Err(VdfError::InvalidSignature { .. })));
}

#[test]
fn cyclic_catalog_is_rejected() -> Result<(), anyhow::Error> {
    let mut bytes = sample_archive()?;
    // Point the MESHES directory (entry 0) back to the root level.
    let offset_field = 296 + 64;
    bytes[offset_field..offset_field + 4].copy_from_slice(&0u32.to_le_bytes());

    let archive = Archive::from_reader(&mut Cursor::new(bytes))?;
    assert!(matches!(archive.files(), Err(VdfError::CatalogCycle { index: 0 })));
    Ok(())
}

#[test]
fn empty_archive_has_no_files() -> Result<(), anyhow::Error> {
    let mut buf = Vec::new();
    ArchiveWriter::new("").write(&mut buf)?;

    let archive = Archive::from_reader(&mut Cursor::new(buf))?;
    assert!(archive.children(None)?.is_empty());
    assert!(archive.files()?.is_empty());
    Ok(())
}

#[test]
fn file_count_is_not_trusted() -> Result<(), anyhow::Error> {
    let mut bytes = sample_archive()?;
    // header: 256 byte comment, 16 byte signature, entry count, file count
    bytes[276..280].copy_from_slice(&u32::MAX.to_le_bytes());

    let archive = Archive::from_reader(&mut Cursor::new(bytes))?;
    assert_eq!(archive.header().file_count, u32::MAX);
    assert_eq!(archive.files()?.len(), 3);
    Ok(())
}
