//! Archive creation and extraction.
//!
//! Writes zip archives (deflate) and reads zip, the tar family with
//! optional gzip/bzip2/xz compression, and bare single-stream gzip.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use skiff_core::FsError;

/// Recognized archive suffixes, longest first so compound suffixes win.
const ARCHIVE_SUFFIXES: [&str; 8] = [
    ".tar.bz2", ".tar.gz", ".tar.xz", ".tgz", ".zip", ".tar", ".bz2", ".gz",
];

/// Check whether a file name carries a recognized archive suffix.
///
/// This drives the caller-owned dispatch rule: exactly one target, nothing
/// else selected, recognized suffix means extract instead of archive.
pub fn is_archive(name: &str) -> bool {
    let lower = name.to_lowercase();
    ARCHIVE_SUFFIXES.iter().any(|s| lower.ends_with(s))
}

/// The archive's base name with the full recognized suffix stripped:
/// `data.tar.gz` becomes `data`, `note.gz` becomes `note`.
pub fn archive_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let lower = name.to_lowercase();
    for suffix in ARCHIVE_SUFFIXES {
        if lower.ends_with(suffix) && name.len() > suffix.len() {
            return name[..name.len() - suffix.len()].to_string();
        }
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(name)
}

/// Ensure an output name carries the zip suffix.
pub fn normalize_archive_name(name: &str) -> String {
    if name.ends_with(".zip") {
        name.to_string()
    } else {
        format!("{name}.zip")
    }
}

/// Create a zip archive from the given entries.
///
/// Directories are stored recursively with paths relative to their parent,
/// so the top-level directory name is preserved inside the archive; plain
/// files are stored by bare name.
pub fn create_archive(targets: &[PathBuf], out_path: &Path) -> Result<(), FsError> {
    let file = File::create(out_path).map_err(|e| FsError::io(out_path, e))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for target in targets {
        if target.is_dir() {
            let base = target.parent().unwrap_or(Path::new(""));
            add_dir_recursive(&mut writer, target, base, options)?;
        } else {
            let name = target
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            add_file(&mut writer, target, &name, options)?;
        }
    }

    writer.finish().map_err(|e| FsError::io(out_path, e.into()))?;
    tracing::debug!(target: "ops", "created archive {}", out_path.display());
    Ok(())
}

/// Extract an archive next to itself.
///
/// The destination is always `<parent>/<stem>` with the whole recognized
/// suffix stripped. Unrecognized suffixes fail before anything is created.
/// Returns the destination path.
pub fn extract(archive: &Path) -> Result<PathBuf, FsError> {
    let lower = archive
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let parent = archive.parent().unwrap_or(Path::new(""));
    let dest = parent.join(archive_stem(archive));

    if lower.ends_with(".zip") {
        let file = File::open(archive).map_err(|e| FsError::io(archive, e))?;
        let mut zip = ZipArchive::new(file).map_err(|e| FsError::io(archive, e.into()))?;
        fs::create_dir_all(&dest).map_err(|e| FsError::io(&dest, e))?;
        zip.extract(&dest).map_err(|e| FsError::io(archive, e.into()))?;
    } else if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
        let file = File::open(archive).map_err(|e| FsError::io(archive, e))?;
        unpack_tar(flate2::read::GzDecoder::new(file), archive, &dest)?;
    } else if lower.ends_with(".tar.bz2") {
        let file = File::open(archive).map_err(|e| FsError::io(archive, e))?;
        unpack_tar(bzip2::read::BzDecoder::new(file), archive, &dest)?;
    } else if lower.ends_with(".tar.xz") {
        let file = File::open(archive).map_err(|e| FsError::io(archive, e))?;
        unpack_tar(xz2::read::XzDecoder::new(file), archive, &dest)?;
    } else if lower.ends_with(".tar") {
        let file = File::open(archive).map_err(|e| FsError::io(archive, e))?;
        unpack_tar(file, archive, &dest)?;
    } else if lower.ends_with(".gz") {
        // Bare single-stream gzip decompresses to one file named by the
        // stripped suffix.
        let file = File::open(archive).map_err(|e| FsError::io(archive, e))?;
        let mut decoder = flate2::read::GzDecoder::new(file);
        let mut out = File::create(&dest).map_err(|e| FsError::io(&dest, e))?;
        io::copy(&mut decoder, &mut out).map_err(|e| FsError::io(archive, e))?;
    } else {
        return Err(FsError::UnsupportedFormat {
            path: archive.to_path_buf(),
        });
    }

    tracing::debug!(target: "ops", "extracted {} -> {}", archive.display(), dest.display());
    Ok(dest)
}

fn unpack_tar<R: Read>(reader: R, archive: &Path, dest: &Path) -> Result<(), FsError> {
    fs::create_dir_all(dest).map_err(|e| FsError::io(dest, e))?;
    tar::Archive::new(reader)
        .unpack(dest)
        .map_err(|e| FsError::io(archive, e))
}

fn add_dir_recursive(
    writer: &mut ZipWriter<File>,
    dir: &Path,
    base: &Path,
    options: SimpleFileOptions,
) -> Result<(), FsError> {
    let rel = zip_entry_name(dir, base);
    writer
        .add_directory(format!("{rel}/"), options)
        .map_err(|e| FsError::io(dir, e.into()))?;

    let entries = fs::read_dir(dir).map_err(|e| FsError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| FsError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            add_dir_recursive(writer, &path, base, options)?;
        } else {
            let rel = zip_entry_name(&path, base);
            add_file(writer, &path, &rel, options)?;
        }
    }
    Ok(())
}

fn add_file(
    writer: &mut ZipWriter<File>,
    path: &Path,
    entry_name: &str,
    options: SimpleFileOptions,
) -> Result<(), FsError> {
    writer
        .start_file(entry_name, options)
        .map_err(|e| FsError::io(path, e.into()))?;
    let mut input = File::open(path).map_err(|e| FsError::io(path, e))?;
    io::copy(&mut input, writer).map_err(|e| FsError::io(path, e))?;
    Ok(())
}

/// Forward-slash relative entry name for archive members.
fn zip_entry_name(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_archive() {
        assert!(is_archive("a.zip"));
        assert!(is_archive("A.ZIP"));
        assert!(is_archive("a.tar.gz"));
        assert!(is_archive("a.tgz"));
        assert!(is_archive("a.tar.bz2"));
        assert!(is_archive("a.tar.xz"));
        assert!(is_archive("a.gz"));
        assert!(is_archive("a.bz2"));
        assert!(!is_archive("a.txt"));
        assert!(!is_archive("archive"));
    }

    #[test]
    fn test_archive_stem_strips_full_suffix() {
        assert_eq!(archive_stem(Path::new("/x/data.tar.gz")), "data");
        assert_eq!(archive_stem(Path::new("/x/data.tgz")), "data");
        assert_eq!(archive_stem(Path::new("/x/note.gz")), "note");
        assert_eq!(archive_stem(Path::new("/x/pack.zip")), "pack");
        assert_eq!(archive_stem(Path::new("/x/plain.txt")), "plain");
    }

    #[test]
    fn test_normalize_archive_name() {
        assert_eq!(normalize_archive_name("backup"), "backup.zip");
        assert_eq!(normalize_archive_name("backup.zip"), "backup.zip");
    }

    #[test]
    fn test_zip_round_trip_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = tmp.path().join("tree");
        fs::create_dir_all(tree.join("sub")).unwrap();
        fs::write(tree.join("root.txt"), b"root").unwrap();
        fs::write(tree.join("sub/leaf.txt"), b"leaf").unwrap();

        let out = tmp.path().join("bundle.zip");
        create_archive(&[tree.clone()], &out).unwrap();
        assert!(out.is_file());

        let dest = extract(&out).unwrap();
        assert_eq!(dest, tmp.path().join("bundle"));
        // Top-level directory name is preserved inside the archive.
        assert_eq!(fs::read(dest.join("tree/root.txt")).unwrap(), b"root");
        assert_eq!(fs::read(dest.join("tree/sub/leaf.txt")).unwrap(), b"leaf");
    }

    #[test]
    fn test_zip_stores_plain_file_by_bare_name() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("single.txt");
        fs::write(&file, b"solo").unwrap();

        let out = tmp.path().join("one.zip");
        create_archive(&[file], &out).unwrap();

        let dest = extract(&out).unwrap();
        assert_eq!(fs::read(dest.join("single.txt")).unwrap(), b"solo");
    }

    #[test]
    fn test_extract_tar_gz_into_stem_directory() {
        let tmp = tempfile::tempdir().unwrap();

        // Build a data.tar.gz fixture.
        let payload = tmp.path().join("payload");
        fs::create_dir(&payload).unwrap();
        fs::write(payload.join("inside.txt"), b"tarred").unwrap();

        let archive_path = tmp.path().join("data.tar.gz");
        let gz = flate2::write::GzEncoder::new(
            File::create(&archive_path).unwrap(),
            flate2::Compression::default(),
        );
        let mut builder = tar::Builder::new(gz);
        builder.append_dir_all("payload", &payload).unwrap();
        builder.into_inner().unwrap().finish().unwrap();

        let dest = extract(&archive_path).unwrap();
        assert_eq!(dest, tmp.path().join("data"));
        assert_eq!(fs::read(dest.join("payload/inside.txt")).unwrap(), b"tarred");
    }

    #[test]
    fn test_extract_bare_gzip_stream() {
        let tmp = tempfile::tempdir().unwrap();
        let archive_path = tmp.path().join("note.gz");

        use std::io::Write;
        let mut gz = flate2::write::GzEncoder::new(
            File::create(&archive_path).unwrap(),
            flate2::Compression::default(),
        );
        gz.write_all(b"plain text body").unwrap();
        gz.finish().unwrap();

        let dest = extract(&archive_path).unwrap();
        assert_eq!(dest, tmp.path().join("note"));
        assert_eq!(fs::read(&dest).unwrap(), b"plain text body");
    }

    #[test]
    fn test_extract_unsupported_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let weird = tmp.path().join("blob.rar");
        fs::write(&weird, b"not really").unwrap();

        let err = extract(&weird).unwrap_err();
        assert!(matches!(err, FsError::UnsupportedFormat { .. }));
        assert!(!tmp.path().join("blob").exists());
    }
}
