use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    path::{Path, PathBuf},
};

use crate::models::{default_specs, BuildSpec, DEFAULT_REPOSITORY};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ImageEntry {
    pub name: String,
    pub dockerfile: PathBuf,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    pub engine: Option<String>,
    pub repository: Option<String>,
    pub context: Option<PathBuf>,
    pub cleanup: Option<bool>,
    pub images: Option<Vec<ImageEntry>>,
}

/// Settings for one benchmark run.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    pub engine: String,
    pub repository: String,
    pub context: PathBuf,
    pub cleanup: bool,
    pub specs: Vec<BuildSpec>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            engine: "docker".into(),
            repository: DEFAULT_REPOSITORY.into(),
            context: PathBuf::from("."),
            cleanup: false,
            specs: default_specs(),
        }
    }
}

impl BenchConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<BenchConfig> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("couldn't open {:?}", path))?;
        let file: ConfigFile =
            serde_yaml::from_reader(file).with_context(|| format!("couldn't parse {:?}", path))?;

        Ok(BenchConfig::default().merge(file))
    }

    fn merge(self, file: ConfigFile) -> BenchConfig {
        let specs = match file.images {
            Some(images) => images
                .into_iter()
                .map(|image| BuildSpec::new(image.name, image.dockerfile))
                .collect(),
            None => self.specs,
        };

        BenchConfig {
            engine: file.engine.unwrap_or(self.engine),
            repository: file.repository.unwrap_or(self.repository),
            context: file.context.unwrap_or(self.context),
            cleanup: file.cleanup.unwrap_or(self.cleanup),
            specs,
        }
    }
}
