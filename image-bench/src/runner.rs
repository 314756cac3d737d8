use anyhow::Result;
use crossterm::{
    style::{self, Colorize, Styler},
    QueueableCommand,
};
use log::{info, warn};
use std::{
    io::Write,
    path::PathBuf,
    time::{Duration, Instant},
};

use crate::{
    config::BenchConfig,
    models::{BuildResult, BuildSpec, BuildStatus, ImageTag, Results},
    services::ContainerEngine,
    units::{format_duration, format_megabytes, parse_size_mb},
};

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The engine or an instruction file was missing, nothing was built.
    Aborted,
    Completed(Results),
}

pub struct Benchmark {
    engine: Box<dyn ContainerEngine>,
    specs: Vec<BuildSpec>,
    repository: String,
    context: PathBuf,
    remove_images: bool,
}

impl Benchmark {
    pub fn new<E>(engine: E, config: BenchConfig) -> Benchmark
    where
        E: 'static + ContainerEngine,
    {
        Benchmark {
            engine: Box::new(engine),
            specs: config.specs,
            repository: config.repository,
            context: config.context,
            remove_images: config.cleanup,
        }
    }

    fn tag(&self, spec: &BuildSpec) -> ImageTag {
        ImageTag::for_spec(&self.repository, spec)
    }

    fn dockerfile_path(&self, spec: &BuildSpec) -> PathBuf {
        if spec.dockerfile.is_absolute() {
            spec.dockerfile.clone()
        } else {
            self.context.join(&spec.dockerfile)
        }
    }

    /// Checks that the engine answers and that every instruction file is
    /// present. Prints the reason before returning `false`.
    pub fn check_prerequisites(&mut self, out: &mut impl Write) -> Result<bool> {
        let available = match self.engine.is_available() {
            Ok(available) => available,
            Err(err) => {
                warn!("{:#}", err);
                false
            }
        };

        if !available {
            writeln!(out, "❌ {} does not seem to be running.", self.engine.name())?;
            return Ok(false);
        }

        for spec in self.specs.iter() {
            let dockerfile = self.dockerfile_path(spec);
            if !dockerfile.exists() {
                writeln!(out, "❌ Dockerfile not found: {}", dockerfile.display())?;
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Builds one image and returns its tag together with the wall-clock
    /// build time, or `None` if the engine reported a failure.
    pub fn build(
        &mut self,
        spec: &BuildSpec,
        out: &mut impl Write,
    ) -> Result<Option<(ImageTag, Duration)>> {
        let tag = self.tag(spec);
        let dockerfile = self.dockerfile_path(spec);

        writeln!(
            out,
            "📦 Building '{}' from {}...",
            spec.name,
            spec.dockerfile.display()
        )?;
        out.flush()?;

        let start = Instant::now();
        let status = self.engine.build_image(&dockerfile, &tag, &self.context)?;
        let elapsed = start.elapsed();
        info!("built {} in {:?}: {:?}", tag, elapsed, status);

        match status {
            BuildStatus::Built => Ok(Some((tag, elapsed))),
            BuildStatus::Failed { stderr } => {
                writeln!(out, "❌ Failed to build {}:", spec.name)?;
                writeln!(out, "{}", stderr)?;
                Ok(None)
            }
        }
    }

    /// Returns the size of `tag` in megabytes. A size string in a unit
    /// other than MB or GB is an error.
    pub fn measure_size(&mut self, tag: &ImageTag, out: &mut impl Write) -> Result<Option<f64>> {
        match self.engine.image_size(tag)? {
            Some(size) => Ok(Some(parse_size_mb(&size)?)),
            None => {
                writeln!(out, "⚠️  Failed to inspect image size for {}", tag)?;
                Ok(None)
            }
        }
    }

    /// Removes every image this benchmark tags. Failures are ignored.
    pub fn cleanup(&mut self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "\n🧹 Cleaning up images...")?;

        let tags = self.specs.iter().map(|spec| self.tag(spec)).collect::<Vec<_>>();
        for tag in tags.iter() {
            if let Err(err) = self.engine.remove_image(tag) {
                warn!("couldn't remove {}: {:#}", tag, err);
            }
        }

        Ok(())
    }

    pub fn run(&mut self, out: &mut impl Write) -> Result<Outcome> {
        if !self.check_prerequisites(out)? {
            return Ok(Outcome::Aborted);
        }

        out.queue(style::PrintStyledContent(
            "🚀 Starting image size comparison...\n\n".bold(),
        ))?;

        let measured = self.measure_all(out);

        if self.remove_images {
            self.cleanup(out)?;
        }
        writeln!(out, "\nDone ✅")?;
        out.flush()?;

        Ok(Outcome::Completed(measured?))
    }

    fn measure_all(&mut self, out: &mut impl Write) -> Result<Results> {
        let mut results = Results::new();

        for spec in self.specs.clone().iter() {
            let (tag, duration) = match self.build(spec, out)? {
                Some(built) => built,
                None => continue,
            };

            let size_mb = match self.measure_size(&tag, out)? {
                Some(size_mb) => size_mb,
                None => continue,
            };

            results.insert(spec.name.clone(), BuildResult { size_mb, duration });

            out.queue(style::PrintStyledContent("✅ Image ".green()))?;
            writeln!(out, "'{}' built:", spec.name)?;
            writeln!(out, "   • Size: {} MB", format_megabytes(size_mb))?;
            writeln!(out, "   • Build time: {}\n", format_duration(duration))?;
        }

        if results.is_empty() {
            writeln!(out, "❌ No images were successfully built and measured")?;
        } else {
            write_rankings(&results, out)?;
        }

        Ok(results)
    }
}

fn sorted_by<K>(results: &Results, key: K) -> Vec<(&str, &BuildResult)>
where
    K: Fn(&BuildResult) -> f64,
{
    let mut sorted = results
        .iter()
        .map(|(name, result)| (name.as_str(), result))
        .collect::<Vec<_>>();
    sorted.sort_by(|(_, a), (_, b)| key(*a).total_cmp(&key(*b)));
    sorted
}

/// Prints the results ranked by size and then by build time, smallest and
/// fastest first.
pub fn write_rankings(results: &Results, out: &mut impl Write) -> Result<()> {
    out.queue(style::PrintStyledContent("📊 Final Comparison:\n\n".bold()))?;

    writeln!(out, "Size (including all dependencies):")?;
    for (name, result) in sorted_by(results, |result| result.size_mb) {
        writeln!(out, "• {:<12} → {} MB", name, format_megabytes(result.size_mb))?;
    }

    writeln!(out, "\nBuild time:")?;
    for (name, result) in sorted_by(results, |result| result.duration.as_secs_f64()) {
        writeln!(out, "• {:<12} → {}", name, format_duration(result.duration))?;
    }

    Ok(())
}
