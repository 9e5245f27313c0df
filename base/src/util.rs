use std::fs::create_dir_all;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Could not convert path to string: {0:?}")]
pub struct PathError(pub PathBuf);

pub fn path_to_str(path: &Path) -> Result<String, PathError> {
    path.to_str()
        .map(String::from)
        .ok_or_else(|| PathError(path.to_path_buf()))
}

pub fn mkdirp<P: AsRef<Path>>(path: P) -> io::Result<()> {
    if let Err(e) = create_dir_all(path) {
        if e.kind() != io::ErrorKind::AlreadyExists {
            return Err(e);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mkdirp_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        mkdirp(&nested).unwrap();
        mkdirp(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn path_to_str_keeps_utf8_paths() {
        let path = PathBuf::from("/var/lib/catalog/catalog.db");
        assert_eq!(path_to_str(&path).unwrap(), "/var/lib/catalog/catalog.db");
    }
}
