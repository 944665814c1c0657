use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Find files recursively in a directory that match a predicate
pub fn find_files<P, F>(path: P, predicate: &F) -> io::Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    F: Fn(&Path) -> bool + ?Sized,
{
    let mut result = Vec::new();

    if !path.as_ref().exists() {
        return Ok(result);
    }

    if path.as_ref().is_file() {
        if predicate(path.as_ref()) {
            result.push(path.as_ref().to_path_buf());
        }
        return Ok(result);
    }

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let entry_path = entry.path();

        if entry_path.is_file() {
            if predicate(&entry_path) {
                result.push(entry_path);
            }
        } else if entry_path.is_dir() {
            let mut sub_results = find_files(&entry_path, predicate)?;
            result.append(&mut sub_results);
        }
    }

    Ok(result)
}

/// Recursively copy a directory tree, creating missing directories and
/// overwriting existing files. Returns the number of files copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<u64> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let entry_path = entry.path();
        let target = dst.join(entry.file_name());

        if entry_path.is_dir() {
            copied += copy_dir_recursive(&entry_path, &target)?;
        } else {
            fs::copy(&entry_path, &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Count regular files in a directory tree
pub fn count_files(path: &Path) -> io::Result<u64> {
    Ok(find_files(path, &|_: &Path| true)?.len() as u64)
}
