//! Storage layer: a single JSON file holding every task keyed by id.

use crate::types::Task;
use indexmap::IndexMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default tasks file name.
pub const TASKS_FILE: &str = "tasks.json";

/// Suffix of the scratch file written before the rename.
const TMP_SUFFIX: &str = ".tmp";

/// All tasks, keyed by id, in insertion order.
pub type TaskMap = IndexMap<String, Task>;

/// What was found at the tasks path.
#[derive(Debug)]
pub enum FileState {
    /// No file yet.
    Missing,
    /// Parsed cleanly.
    Loaded(TaskMap),
    /// File exists but is not a valid task map.
    Corrupt(String),
}

/// Handle for the tasks file.
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file. A path that cannot exist yet counts as missing; other
    /// I/O failures are errors.
    pub fn read(&self) -> io::Result<FileState> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                return Ok(FileState::Missing);
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_reader::<_, TaskMap>(BufReader::new(file)) {
            Ok(tasks) => Ok(FileState::Loaded(tasks)),
            Err(e) if e.is_io() => Err(e.into()),
            Err(e) => Ok(FileState::Corrupt(e.to_string())),
        }
    }

    /// Overwrite the file with `tasks`.
    ///
    /// Writes a sibling temp file first and renames it over the target, so a
    /// failed write leaves the previous contents in place.
    pub fn write(&self, tasks: &TaskMap) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.tmp_path();
        let result = (|| {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer_pretty(&mut writer, tasks)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            fs::rename(&tmp_path, &self.path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(TMP_SUFFIX);
        PathBuf::from(name)
    }
}
