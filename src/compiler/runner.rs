/// Process execution seam for the compiler.
use std::ffi::OsString;
use std::io;
use std::process::Command;

/// Captured result of one finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Standard output, decoded lossily as UTF-8.
    pub stdout: String,
    /// Standard error, decoded lossily as UTF-8.
    pub stderr: String,
}

impl PassOutput {
    /// Whether the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Something that can run an external program to completion.
pub trait ProcessRunner {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// A non-zero exit is not an error; it is reported in [`PassOutput`].
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the process could not be spawned or its
    /// output could not be collected.
    fn run(&self, program: &str, args: &[OsString]) -> io::Result<PassOutput>;
}

/// Runs programs with [`std::process::Command`], stdin closed and both
/// output streams captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[OsString]) -> io::Result<PassOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(PassOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
