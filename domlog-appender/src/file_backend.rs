use crate::format::{render_line, render_summary};
use domlog_core::{Backend, Coalescer, Error, Level, Outcome};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A file-backed [`Backend`] (component C3).
///
/// Opens its target file for append on first use (or on an explicit
/// [`open`](Backend::open)); [`reopen`](Backend::reopen) is the rotation
/// primitive an external SIGHUP handler drives after renaming the target
/// out from under the process. A backend with no target (`target: None`)
/// writes to stderr and is always considered open.
#[derive(Debug)]
pub struct FileBackend {
    name: String,
    target: Option<PathBuf>,
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    file: Option<File>,
    coalescer: Coalescer,
}

impl FileBackend {
    /// Create a backend that appends to `target`. The file is not opened
    /// until the first write or an explicit [`open`](Backend::open) call.
    pub fn new(name: impl Into<String>, target: impl AsRef<Path>) -> Self {
        FileBackend {
            name: name.into(),
            target: Some(target.as_ref().to_path_buf()),
            state: Mutex::new(State {
                file: None,
                coalescer: Coalescer::new(),
            }),
        }
    }

    /// Create a backend with no file target; writes go to stderr and the
    /// backend is always open (there is nothing to rotate).
    pub fn stderr(name: impl Into<String>) -> Self {
        FileBackend {
            name: name.into(),
            target: None,
            state: Mutex::new(State {
                file: None,
                coalescer: Coalescer::new(),
            }),
        }
    }

    fn open_file(&self) -> Result<File, Error> {
        let path = self
            .target
            .as_ref()
            .expect("open_file is only called when target is Some");
        let mut opts = OpenOptions::new();
        opts.append(true).create(true);
        match opts.open(path) {
            Ok(file) => Ok(file),
            Err(_) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).map_err(|e| Error::io(path.clone(), e))?;
                }
                opts.open(path).map_err(|e| Error::io(path.clone(), e))
            }
        }
    }

    /// Write raw bytes, transparently opening the file if it is currently
    /// closed. For a target-less backend, writes to stderr instead.
    fn write_raw(&self, state: &mut State, bytes: &[u8]) -> Result<(), Error> {
        if self.target.is_none() {
            let mut stderr = io::stderr();
            return stderr
                .write_all(bytes)
                .map_err(|e| Error::io(PathBuf::new(), e));
        }

        if state.file.is_none() {
            state.file = Some(self.open_file()?);
        }
        let file = state.file.as_mut().expect("just opened above");
        file.write_all(bytes).map_err(|e| {
            state.file = None;
            Error::io(self.target.clone().unwrap(), e)
        })
    }
}

impl Backend for FileBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    fn open(&self) -> Result<(), Error> {
        if self.target.is_none() {
            return Ok(());
        }
        let mut state = self.state.lock();
        if state.file.is_some() {
            return Err(Error::AlreadyOpen(self.name.clone()));
        }
        state.file = Some(self.open_file()?);
        Ok(())
    }

    fn close(&self) -> Result<(), Error> {
        let mut state = self.state.lock();
        if let Some(mut file) = state.file.take() {
            let _ = file.flush();
        }
        Ok(())
    }

    fn dispatch(&self, level: Level, text: &str, domain_label: &str) -> Result<(), Error> {
        let mut state = self.state.lock();
        match state.coalescer.record(level, text, domain_label) {
            Outcome::Coalesced => Ok(()),
            Outcome::Emit => {
                let line = render_line(level, text, domain_label);
                self.write_raw(&mut state, line.as_bytes())
            }
            Outcome::FlushThenEmit(summary) => {
                let summary_line = render_summary(&summary);
                self.write_raw(&mut state, summary_line.as_bytes())?;
                let line = render_line(level, text, domain_label);
                self.write_raw(&mut state, line.as_bytes())
            }
        }
    }

    fn force_log(&self, text: &str) -> Result<(), Error> {
        let mut state = self.state.lock();
        if let Some(summary) = state.coalescer.flush() {
            let summary_line = render_summary(&summary);
            self.write_raw(&mut state, summary_line.as_bytes())?;
        }
        let line = render_line(Level::Message, text, "");
        self.write_raw(&mut state, line.as_bytes())
    }

    fn flush_pending(&self) -> Result<(), Error> {
        let mut state = self.state.lock();
        if let Some(summary) = state.coalescer.flush() {
            let summary_line = render_summary(&summary);
            self.write_raw(&mut state, summary_line.as_bytes())?;
        }
        Ok(())
    }
}
