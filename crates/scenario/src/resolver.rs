use crate::value::FILE_PREFIX;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::trace;

/// Resolves `file:` references found in scenario documents.
pub trait FileResolver {
    /// Sets the file that relative references are resolved against.
    fn set_context(&mut self, context_path: &Path);

    /// Turns a reference, with or without the `file:` prefix, into a path.
    fn resolve_absolute_path(&self, value: &str) -> PathBuf;

    /// Reads the referenced file.
    fn resolve_file_value(&self, value: &str) -> io::Result<Vec<u8>>;
}

/// Reads files relative to the directory of the current scenario file.
#[derive(Clone, Debug, Default)]
pub struct DefaultFileResolver {
    context_dir: PathBuf,
}

impl DefaultFileResolver {
    /// Creates a resolver relative to `context_dir`.
    pub fn new(context_dir: impl Into<PathBuf>) -> Self {
        Self {
            context_dir: context_dir.into(),
        }
    }

    /// Directory relative references are resolved against.
    pub fn context_dir(&self) -> &Path {
        &self.context_dir
    }
}

impl FileResolver for DefaultFileResolver {
    fn set_context(&mut self, context_path: &Path) {
        self.context_dir = if context_path.is_dir() {
            context_path.to_path_buf()
        } else {
            context_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        };
    }

    fn resolve_absolute_path(&self, value: &str) -> PathBuf {
        let relative = Path::new(value.strip_prefix(FILE_PREFIX).unwrap_or(value));
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            self.context_dir.join(relative)
        }
    }

    fn resolve_file_value(&self, value: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve_absolute_path(value);
        trace!(path = %path.display(), "resolving file value");
        fs::read(path)
    }
}

/// Rejects every file reference.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFileResolver;

impl FileResolver for NoFileResolver {
    fn set_context(&mut self, _context_path: &Path) {}

    fn resolve_absolute_path(&self, value: &str) -> PathBuf {
        PathBuf::from(value.strip_prefix(FILE_PREFIX).unwrap_or(value))
    }

    fn resolve_file_value(&self, _value: &str) -> io::Result<Vec<u8>> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "file references are not resolved",
        ))
    }
}
