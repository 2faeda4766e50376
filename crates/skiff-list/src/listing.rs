//! The listing pipeline: enumerate, sort, hide, filter.

use std::cmp::Ordering;
use std::path::Path;
use std::time::UNIX_EPOCH;

use skiff_core::{Entry, FsError, SortMode};

/// Produce the ordered entry sequence for one directory level.
///
/// Passes run in a fixed order: sort first, then hidden-file exclusion,
/// then the substring filter. Sorting before filtering keeps the relative
/// order of survivors independent of which entries are filtered out.
pub fn list_directory(
    dir: &Path,
    show_hidden: bool,
    sort: SortMode,
    filter: &str,
) -> Result<Vec<Entry>, FsError> {
    let read = std::fs::read_dir(dir).map_err(|e| FsError::io(dir, e))?;

    let mut entries: Vec<Entry> = read
        .filter_map(|e| e.ok())
        .map(|e| Entry::from_path(e.path()))
        .collect();

    sort_entries(&mut entries, sort);

    if !show_hidden {
        entries.retain(|e| !e.name.starts_with('.'));
    }

    if !filter.is_empty() {
        let needle = filter.to_lowercase();
        entries.retain(|e| e.name_lower.contains(&needle));
    }

    Ok(entries)
}

/// Sort entries in place. Directories always come before files; the mode
/// chooses the ordering within each group. The sort is stable, so entries
/// that compare equal keep their enumeration order.
fn sort_entries(entries: &mut [Entry], mode: SortMode) {
    let cmp = match mode {
        SortMode::Name => cmp_name,
        SortMode::Size => cmp_size,
        SortMode::Modified => cmp_modified,
        SortMode::Type => cmp_type,
    };
    entries.sort_by(|a, b| dirs_first(a, b).then_with(|| cmp(a, b)));
}

fn dirs_first(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir.cmp(&a.is_dir)
}

fn cmp_name(a: &Entry, b: &Entry) -> Ordering {
    a.name_lower.cmp(&b.name_lower)
}

/// Ascending size; directories carry size 0 and are dominated by the
/// directories-first key anyway.
fn cmp_size(a: &Entry, b: &Entry) -> Ordering {
    a.size.cmp(&b.size)
}

/// Most recently modified first; unknown times sort last.
fn cmp_modified(a: &Entry, b: &Entry) -> Ordering {
    let at = a.modified.unwrap_or(UNIX_EPOCH);
    let bt = b.modified.unwrap_or(UNIX_EPOCH);
    bt.cmp(&at)
}

fn cmp_type(a: &Entry, b: &Entry) -> Ordering {
    a.extension_lower()
        .cmp(&b.extension_lower())
        .then_with(|| a.name_lower.cmp(&b.name_lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), name.as_bytes()).unwrap();
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_directories_before_files_every_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        fs::create_dir(dir.join("zeta_dir")).unwrap();
        fs::create_dir(dir.join("alpha_dir")).unwrap();
        touch(dir, "aardvark.txt");
        touch(dir, "zz.txt");

        for mode in [
            SortMode::Name,
            SortMode::Size,
            SortMode::Modified,
            SortMode::Type,
        ] {
            let listing = list_directory(dir, false, mode, "").unwrap();
            let split = listing.iter().position(|e| !e.is_dir).unwrap();
            assert!(listing[..split].iter().all(|e| e.is_dir), "{mode}");
            assert!(listing[split..].iter().all(|e| !e.is_dir), "{mode}");
        }
    }

    #[test]
    fn test_name_sort_case_insensitive() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        touch(dir, "Banana");
        touch(dir, "apple");
        touch(dir, "Cherry");

        let listing = list_directory(dir, false, SortMode::Name, "").unwrap();
        assert_eq!(names(&listing), ["apple", "Banana", "Cherry"]);
    }

    #[test]
    fn test_size_sort_ascending() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("big"), [0u8; 300]).unwrap();
        fs::write(dir.join("small"), [0u8; 10]).unwrap();
        fs::write(dir.join("mid"), [0u8; 100]).unwrap();

        let listing = list_directory(dir, false, SortMode::Size, "").unwrap();
        assert_eq!(names(&listing), ["small", "mid", "big"]);
    }

    #[test]
    fn test_type_sort_extension_then_name() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        touch(dir, "b.rs");
        touch(dir, "a.toml");
        touch(dir, "a.rs");

        let listing = list_directory(dir, false, SortMode::Type, "").unwrap();
        assert_eq!(names(&listing), ["a.rs", "b.rs", "a.toml"]);
    }

    #[test]
    fn test_hidden_excluded_unless_requested() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        touch(dir, ".secret");
        touch(dir, "visible");

        let listing = list_directory(dir, false, SortMode::Name, "").unwrap();
        assert_eq!(names(&listing), ["visible"]);

        let listing = list_directory(dir, true, SortMode::Name, "").unwrap();
        assert_eq!(names(&listing), [".secret", "visible"]);
    }

    #[test]
    fn test_hidden_toggle_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        touch(dir, ".dot");
        touch(dir, "one");
        touch(dir, "two");

        let before = names(&list_directory(dir, false, SortMode::Name, "").unwrap())
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        let _ = list_directory(dir, true, SortMode::Name, "").unwrap();
        let after = names(&list_directory(dir, false, SortMode::Name, "").unwrap())
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        assert_eq!(before, after);
    }

    #[test]
    fn test_filter_case_insensitive_substring() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        touch(dir, "Report.txt");
        touch(dir, "notes.md");
        touch(dir, "port.log");

        let listing = list_directory(dir, false, SortMode::Name, "PORT").unwrap();
        assert_eq!(names(&listing), ["port.log", "Report.txt"]);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        touch(dir, "a");
        touch(dir, "b");
        fs::create_dir(dir.join("d")).unwrap();

        // Empty filter still goes through the sort and hidden passes.
        let listing = list_directory(dir, false, SortMode::Name, "").unwrap();
        assert_eq!(names(&listing), ["d", "a", "b"]);
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let err = list_directory(
            Path::new("/no/such/dir"),
            false,
            SortMode::Name,
            "",
        )
        .unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }
}
