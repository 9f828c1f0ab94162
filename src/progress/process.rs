//! Progress window hosted in a child process.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use log::{debug, warn};

use super::{PROGRESS_WINDOW_FLAG, ProgressIndicator};

/// Runs the progress window as a separate OS process.
///
/// The child is killed (and reaped) on [`stop`](ProgressIndicator::stop) or
/// when this value is dropped. Failing to spawn only logs a warning.
#[derive(Debug)]
pub struct WindowProcess {
    program: PathBuf,
    args: Vec<OsString>,
    child: Option<Child>,
}

impl WindowProcess {
    /// Indicator that runs `program` with `args` while active.
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            child: None,
        }
    }

    /// Indicator that re-runs the current executable in progress window mode.
    pub fn current_exe() -> io::Result<Self> {
        let program = std::env::current_exe()?;
        Ok(Self::new(program, [PROGRESS_WINDOW_FLAG]))
    }

    #[cfg(test)]
    fn is_running(&mut self) -> bool {
        match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(Ok(Some(_))) | None => false,
            Some(Err(err)) => {
                warn!("could not query progress window: {err}");
                false
            }
        }
    }
}

impl ProgressIndicator for WindowProcess {
    fn start(&mut self) {
        if self.child.is_some() {
            return;
        }

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                debug!("progress window started (pid {})", child.id());
                self.child = Some(child);
            }
            Err(err) => warn!(
                "could not start progress window {}: {err}",
                self.program.display()
            ),
        }
    }

    fn stop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        match child.try_wait() {
            Ok(Some(status)) => {
                debug!("progress window already exited ({status})");
                return;
            }
            Ok(None) => {}
            Err(err) => warn!("could not query progress window: {err}"),
        }

        if let Err(err) = child.kill() {
            warn!("could not kill progress window: {err}");
        }
        match child.wait() {
            Ok(status) => debug!("progress window stopped ({status})"),
            Err(err) => warn!("could not reap progress window: {err}"),
        }
    }
}

impl Drop for WindowProcess {
    fn drop(&mut self) {
        self.stop();
    }
}
