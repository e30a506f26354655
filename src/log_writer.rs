use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Component, Path, PathBuf},
};

use crate::error::{Error, Result};

/// Writes the same bytes to every registered writer, in registration order.
///
/// A failing writer does not stop the others from receiving the bytes; the first
/// failure is reported once all writers have been tried.
#[derive(Default)]
pub struct MultiWriter {
    writers: Vec<Box<dyn Write + Send>>,
}

impl MultiWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, writer: Box<dyn Write + Send>) {
        self.writers.push(writer);
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl Write for MultiWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_all(buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut first_error = None;
        for writer in &mut self.writers {
            if let Err(e) = writer.write_all(buf) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut first_error = None;
        for writer in &mut self.writers {
            if let Err(e) = writer.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// A log file opened in append mode.
///
/// Writes go straight to the file: the handle lives as long as the logger and is never
/// explicitly closed, so nothing may be left sitting in a user-space buffer.
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    file: File,
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Drops `.` and folds `..` into the preceding component, without touching the filesystem.
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

impl LogFile {
    /// Opens `path` for appending, creating missing parent directories and the file itself.
    /// Existing content is never truncated.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidArgument("no log file specified"));
        }
        let path = clean(&std::path::absolute(path).map_err(io_error(path))?);
        if fs::metadata(&path).is_err() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(io_error(&path))?;
            }
            // another caller may have created and written it meanwhile
            match File::options().write(true).create_new(true).open(&path) {
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(io_error(&path)(e)),
            }
        }
        let file = File::options()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(io_error(&path))?;
        Ok(Self { path, file })
    }

    /// Absolute path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
