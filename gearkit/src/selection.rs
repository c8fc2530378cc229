// Dataset selection: single files, multiple files or whole directory trees.
//
// File content is never opened; a selection only records which paths were
// picked.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{GearError, GearResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    /// Named directly rather than found inside a directory.
    pub explicit: bool,
    /// Extension matches one of the accepted hints.
    pub accepted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    files: Vec<SelectedFile>,
}

impl FileSelection {
    /// Expand `paths` into a selection. Directories contribute every regular
    /// file beneath them, unfiltered.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P], accepted_extensions: &[String]) -> GearResult<Self> {
        let mut files = Vec::new();

        for path in paths {
            let path = path.as_ref();
            let metadata = fs::metadata(path).map_err(|e| {
                GearError::Selection(format!("cannot read {}: {}", path.display(), e))
            })?;

            if metadata.is_dir() {
                let before = files.len();
                collect_dir(path, accepted_extensions, &mut files)?;
                debug!("Directory {} contributed {} files", path.display(), files.len() - before);
            } else {
                files.push(SelectedFile {
                    path: path.to_path_buf(),
                    explicit: true,
                    accepted: has_accepted_extension(path, accepted_extensions),
                });
            }
        }

        Ok(Self { files })
    }

    /// Selection of `count` placeholder names, for previews and tests.
    pub fn synthetic(count: usize) -> Self {
        let files = (0..count)
            .map(|i| SelectedFile {
                path: PathBuf::from(format!("sample_{:04}.csv", i)),
                explicit: true,
                accepted: true,
            })
            .collect();
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    /// Explicitly named files whose extension is not an accepted hint.
    pub fn unrecognized(&self) -> impl Iterator<Item = &SelectedFile> {
        self.files.iter().filter(|f| f.explicit && !f.accepted)
    }
}

fn collect_dir(dir: &Path, accepted_extensions: &[String], out: &mut Vec<SelectedFile>) -> GearResult<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    entries.sort();

    for path in entries {
        let file_type = fs::symlink_metadata(&path)?.file_type();
        if file_type.is_dir() {
            collect_dir(&path, accepted_extensions, out)?;
        } else if file_type.is_file() {
            let accepted = has_accepted_extension(&path, accepted_extensions);
            out.push(SelectedFile {
                path,
                explicit: false,
                accepted,
            });
        }
    }
    Ok(())
}

fn has_accepted_extension(path: &Path, accepted_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            accepted_extensions
                .iter()
                .any(|accepted| accepted.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn hints() -> Vec<String> {
        vec!["csv".to_string(), ".xlsx".to_string(), "json".to_string()]
    }

    #[test]
    fn test_directory_tree_is_walked_unfiltered() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("broken_teeth");
        fs::create_dir(&nested).unwrap();
        File::create(dir.path().join("h30hz0.csv")).unwrap();
        File::create(nested.join("b30hz0.csv")).unwrap();
        File::create(nested.join("README.txt")).unwrap();

        let selection = FileSelection::from_paths(&[dir.path()], &hints()).unwrap();
        assert_eq!(selection.len(), 3);
        // Only explicit files are flagged.
        assert_eq!(selection.unrecognized().count(), 0);
    }

    #[test]
    fn test_explicit_files_checked_against_hints() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("run.CSV");
        let xlsx = dir.path().join("run.xlsx");
        let bin = dir.path().join("run.bin");
        for p in [&csv, &xlsx, &bin] {
            File::create(p).unwrap();
        }

        let selection = FileSelection::from_paths(&[&csv, &xlsx, &bin], &hints()).unwrap();
        assert_eq!(selection.len(), 3);
        let flagged: Vec<&PathBuf> = selection.unrecognized().map(|f| &f.path).collect();
        assert_eq!(flagged, vec![&bin]);
    }

    #[test]
    fn test_missing_path_is_selection_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        let result = FileSelection::from_paths(&[missing], &hints());
        assert!(matches!(result, Err(GearError::Selection(_))));
    }

    #[test]
    fn test_empty_directory_gives_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let selection = FileSelection::from_paths(&[dir.path()], &hints()).unwrap();
        assert!(selection.is_empty());
    }
}
