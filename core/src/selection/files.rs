use std::path::{Path, PathBuf};

/// Recursively collects `*.dcm` files below `root`
///
/// The extension match is case-insensitive. Results are sorted so that
/// the order handed to the view locator does not depend on the platform's
/// directory iteration order.
pub fn collect_dicom_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    visit(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn visit(directory: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();

        if path.is_dir() {
            visit(&path, files)?;
        } else if path.is_file() && has_dcm_extension(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn has_dcm_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("dcm"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_collect_dicom_files_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("study").join("series");
        fs::create_dir_all(&nested).unwrap();

        File::create(temp_dir.path().join("top.dcm")).unwrap();
        File::create(nested.join("deep.DCM")).unwrap();
        File::create(nested.join("notes.txt")).unwrap();
        File::create(temp_dir.path().join("image.dicom")).unwrap();

        let files = collect_dicom_files(temp_dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.contains(&temp_dir.path().join("top.dcm")));
        assert!(files.contains(&nested.join("deep.DCM")));
    }

    #[test]
    fn test_collect_dicom_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["c.dcm", "a.dcm", "b.dcm"] {
            File::create(temp_dir.path().join(name)).unwrap();
        }

        let files = collect_dicom_files(temp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.dcm", "b.dcm", "c.dcm"]);
    }

    #[test]
    fn test_collect_dicom_files_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        assert!(collect_dicom_files(&temp_dir.path().join("absent")).is_err());
    }
}
