use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::Error;

pub const CONVERTER_STEM: &str = "davst";
pub const INVENTORY_APPLY: &str = "ia";

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Location of the external converter, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConverterConfig {
    path: PathBuf,
}

impl ConverterConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The converter's file name on this platform, e.g. `davst.exe` on Windows.
    pub fn default_file_name() -> String {
        format!("{CONVERTER_STEM}{}", std::env::consts::EXE_SUFFIX)
    }

    pub fn beside(dir: &Path) -> Self {
        Self::new(dir.join(Self::default_file_name()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_present(&self) -> Result<(), Error> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(Error::ConverterMissing {
                path: self.path.clone(),
            })
        }
    }
}

/// Snapshot of the two paths taken when the user triggers a conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl ConversionRequest {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    fn ensure_inputs_exist(&self) -> Result<(), InvocationError> {
        for path in [&self.source, &self.destination] {
            if !path.is_file() {
                return Err(InvocationError::InputMissing { path: path.clone() });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionResult {
    /// All of stdout, a line separator, then all of stderr.
    pub combined_output: String,
    /// Logged only; the converter's exit code carries no meaning here.
    pub exit_code: Option<i32>,
}

#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    #[error("Failed to start {}: {source}", converter.display())]
    LaunchFailure {
        converter: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} no longer exists.", path.display())]
    InputMissing { path: PathBuf },
    #[error("Failed while waiting for the converter: {0}")]
    Wait(#[source] io::Error),
    #[error("Conversion cancelled.")]
    Cancelled,
}

#[derive(Clone, Debug)]
pub struct ConverterInvoker {
    config: ConverterConfig,
}

impl ConverterInvoker {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Human-readable command line with each path double-quoted.
    pub fn command_line(&self, request: &ConversionRequest) -> String {
        format!(
            "{} {INVENTORY_APPLY} -i \"{}\" -o \"{}\"",
            self.config.path().display(),
            request.source.display(),
            request.destination.display()
        )
    }

    fn command(&self, request: &ConversionRequest) -> Command {
        let mut command = Command::new(self.config.path());
        command
            .arg(INVENTORY_APPLY)
            .arg("-i")
            .arg(&request.source)
            .arg("-o")
            .arg(&request.destination)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        command
    }

    /// Runs the converter and blocks the calling thread until it exits.
    /// There is no timeout and no way to cancel; see [`Self::spawn`].
    pub fn invoke(&self, request: &ConversionRequest) -> Result<ConversionResult, InvocationError> {
        self.run(request, None)
    }

    /// Runs the converter on a worker thread.
    pub fn spawn(&self, request: ConversionRequest) -> ConversionJob {
        let progress = Arc::new(Mutex::new(JobProgress::Running));
        let cancel = Arc::new(AtomicBool::new(false));

        let invoker = self.clone();
        let thread_request = request.clone();
        let thread_progress = Arc::clone(&progress);
        let thread_cancel = Arc::clone(&cancel);

        let spawned = thread::Builder::new()
            .name("converter".to_string())
            .spawn(move || {
                let result = invoker.run(&thread_request, Some(&thread_cancel));
                let mut guard = thread_progress
                    .lock()
                    .unwrap_or_else(|poison| poison.into_inner());
                *guard = JobProgress::Finished(result);
            });

        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(source) => {
                tracing::error!(%source, "failed to start converter worker thread");
                let mut guard = progress.lock().unwrap_or_else(|poison| poison.into_inner());
                *guard = JobProgress::Finished(Err(InvocationError::LaunchFailure {
                    converter: self.config.path().to_path_buf(),
                    source,
                }));
                None
            }
        };

        ConversionJob {
            request,
            progress,
            cancel,
            handle,
        }
    }

    fn run(
        &self,
        request: &ConversionRequest,
        cancel: Option<&AtomicBool>,
    ) -> Result<ConversionResult, InvocationError> {
        request.ensure_inputs_exist().inspect_err(|err| {
            tracing::error!(%err, "converter input vanished before launch");
        })?;

        tracing::info!(command = %self.command_line(request), "launching converter");
        let mut child = self.command(request).spawn().map_err(|source| {
            tracing::error!(converter = %self.config.path().display(), %source, "failed to launch converter");
            InvocationError::LaunchFailure {
                converter: self.config.path().to_path_buf(),
                source,
            }
        })?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match cancel {
            Some(flag) => match wait_cancellable(&mut child, flag) {
                Ok(status) => status,
                Err(err) => {
                    // Readers are not joined: a grandchild of the converter can keep
                    // the pipes open long after the converter itself was killed.
                    drop((stdout, stderr));
                    return Err(err);
                }
            },
            None => child.wait().map_err(InvocationError::Wait)?,
        };

        let stdout = collect(stdout)?;
        let stderr = collect(stderr)?;
        tracing::info!(exit_code = ?status.code(), "converter finished");

        Ok(ConversionResult {
            combined_output: format!("{stdout}{LINE_SEPARATOR}{stderr}"),
            exit_code: status.code(),
        })
    }
}

type DrainHandle = thread::JoinHandle<io::Result<Vec<u8>>>;

fn drain<R>(mut reader: R) -> DrainHandle
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    })
}

fn collect(handle: Option<DrainHandle>) -> Result<String, InvocationError> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| {
            InvocationError::Wait(io::Error::new(
                io::ErrorKind::Other,
                "output reader thread panicked",
            ))
        })?
        .map_err(InvocationError::Wait)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn wait_cancellable(child: &mut Child, cancel: &AtomicBool) -> Result<ExitStatus, InvocationError> {
    loop {
        if let Some(status) = child.try_wait().map_err(InvocationError::Wait)? {
            return Ok(status);
        }

        if cancel.load(Ordering::SeqCst) {
            tracing::warn!(pid = child.id(), "cancelling converter");
            if let Err(err) = child.kill() {
                tracing::warn!(%err, "failed to kill converter");
            }
            let _ = child.wait();
            return Err(InvocationError::Cancelled);
        }

        thread::sleep(CANCEL_POLL_INTERVAL);
    }
}

enum JobProgress {
    Running,
    Finished(Result<ConversionResult, InvocationError>),
    Collected,
}

/// A conversion running on a worker thread. Poll it from the UI loop.
pub struct ConversionJob {
    request: ConversionRequest,
    progress: Arc<Mutex<JobProgress>>,
    cancel: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ConversionJob {
    pub fn request(&self) -> &ConversionRequest {
        &self.request
    }

    /// Kills the converter if it is still running. The job then finishes
    /// with [`InvocationError::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelling(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Returns the outcome once, the first time it is polled after the
    /// converter exits.
    pub fn poll(&mut self) -> Option<Result<ConversionResult, InvocationError>> {
        let outcome = {
            let mut guard = self
                .progress
                .lock()
                .unwrap_or_else(|poison| poison.into_inner());
            match &*guard {
                JobProgress::Finished(_) => {
                    match std::mem::replace(&mut *guard, JobProgress::Collected) {
                        JobProgress::Finished(outcome) => Some(outcome),
                        _ => None,
                    }
                }
                JobProgress::Running | JobProgress::Collected => None,
            }
        };

        if outcome.is_some() {
            if let Some(handle) = self.handle.take() {
                let _ = handle.join();
            }
        }

        outcome
    }

    pub fn wait(mut self) -> Result<ConversionResult, InvocationError> {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }

        self.poll().unwrap_or_else(|| {
            Err(InvocationError::Wait(io::Error::new(
                io::ErrorKind::Other,
                "converter job ended without a result",
            )))
        })
    }
}
