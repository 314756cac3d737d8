use anyhow::{Context, Result};
use log::{debug, info};
use std::{
    ffi::OsStr,
    path::Path,
    process::{Command, Output, Stdio},
};

use crate::{
    models::{BuildStatus, ImageTag},
    services::ContainerEngine,
};

/// Drives a docker compatible command line client.
pub struct CliEngine {
    program: String,
}

impl CliEngine {
    pub fn new<P: Into<String>>(program: P) -> CliEngine {
        CliEngine {
            program: program.into(),
        }
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(args);
        debug!("running {:?}", command);
        command
    }

    fn output<I, S>(&self, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to run {:?}", self.program))
    }
}

impl ContainerEngine for CliEngine {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&mut self) -> Result<bool> {
        let status = self
            .command(&["info"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .with_context(|| format!("failed to run {:?}", self.program))?;

        info!("{} info exited with {}", self.program, status);
        Ok(status.success())
    }

    fn build_image(
        &mut self,
        dockerfile: &Path,
        tag: &ImageTag,
        context: &Path,
    ) -> Result<BuildStatus> {
        let output = self.output(&[
            OsStr::new("build"),
            OsStr::new("-f"),
            dockerfile.as_os_str(),
            OsStr::new("-t"),
            OsStr::new(&tag.0),
            context.as_os_str(),
        ])?;

        if output.status.success() {
            Ok(BuildStatus::Built)
        } else {
            info!("building {} exited with {}", tag, output.status);
            Ok(BuildStatus::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }

    fn image_size(&mut self, tag: &ImageTag) -> Result<Option<String>> {
        let output = self.output(&["images", "--format={{.Size}}", tag.0.as_str()])?;

        if !output.status.success() {
            info!("listing {} exited with {}", tag, output.status);
            return Ok(None);
        }

        let size = String::from_utf8_lossy(&output.stdout).trim().to_owned();
        debug!("{} reports size {:?}", tag, size);
        Ok(Some(size))
    }

    fn remove_image(&mut self, tag: &ImageTag) -> Result<()> {
        let status = self
            .command(&["rmi", tag.0.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("failed to run {:?}", self.program))?;

        debug!("removing {} exited with {}", tag, status);
        Ok(())
    }
}
