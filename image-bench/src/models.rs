use std::{collections::BTreeMap as Map, fmt, path::PathBuf, time::Duration};

/// A named build configuration and the instruction file it builds from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildSpec {
    pub name: String,
    pub dockerfile: PathBuf,
}

impl BuildSpec {
    pub fn new<N: Into<String>, P: Into<PathBuf>>(name: N, dockerfile: P) -> BuildSpec {
        BuildSpec {
            name: name.into(),
            dockerfile: dockerfile.into(),
        }
    }
}

/// The three build strategies compared when nothing else is configured.
pub fn default_specs() -> Vec<BuildSpec> {
    vec![
        BuildSpec::new("singlestage", "singlestage.Dockerfile"),
        BuildSpec::new("standalone", "standalone.Dockerfile"),
        BuildSpec::new("multistage", "multistage.Dockerfile"),
    ]
}

pub const DEFAULT_REPOSITORY: &str = "uv-example";

#[derive(Clone, Debug, Hash, PartialOrd, Ord, PartialEq, Eq)]
pub struct ImageTag(pub String);

impl ImageTag {
    pub fn for_spec(repository: &str, spec: &BuildSpec) -> ImageTag {
        ImageTag(format!("{}:{}", repository, spec.name))
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildStatus {
    Built,
    Failed { stderr: String },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BuildResult {
    pub size_mb: f64,
    pub duration: Duration,
}

pub type Results = Map<String, BuildResult>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet as Set;

    #[test]
    fn tags_are_derived_from_spec_names() {
        let tags = default_specs()
            .iter()
            .map(|spec| ImageTag::for_spec(DEFAULT_REPOSITORY, spec))
            .collect::<Vec<_>>();

        assert_eq!(
            tags,
            vec![
                ImageTag("uv-example:singlestage".into()),
                ImageTag("uv-example:standalone".into()),
                ImageTag("uv-example:multistage".into()),
            ]
        );
    }

    #[test]
    fn tags_are_deterministic_and_distinct() {
        let specs = default_specs();
        let first = specs
            .iter()
            .map(|spec| ImageTag::for_spec(DEFAULT_REPOSITORY, spec))
            .collect::<Vec<_>>();
        let second = specs
            .iter()
            .map(|spec| ImageTag::for_spec(DEFAULT_REPOSITORY, spec))
            .collect::<Vec<_>>();

        assert_eq!(first, second);
        assert_eq!(first.iter().collect::<Set<_>>().len(), specs.len());
    }
}
