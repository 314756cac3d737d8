use anyhow::Result;
use std::path::Path;

use crate::models::{BuildStatus, ImageTag};

/// The calls made against a container engine. An `Err` means the engine
/// could not be invoked at all; a failing command is reported through
/// the return value instead.
pub trait ContainerEngine {
    fn name(&self) -> &str;

    fn is_available(&mut self) -> Result<bool>;

    fn build_image(&mut self, dockerfile: &Path, tag: &ImageTag, context: &Path)
        -> Result<BuildStatus>;

    /// Returns the human readable size reported for `tag`, or `None` when
    /// the engine refused to list it.
    fn image_size(&mut self, tag: &ImageTag) -> Result<Option<String>>;

    fn remove_image(&mut self, tag: &ImageTag) -> Result<()>;
}
