//! The batch loop: one composite image and one video per audio file, strictly in order.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::encode::{EncodeJob, Encoder, ProgressSink};
use crate::foundation::error::{StillframeError, StillframeResult};
use crate::render::FrameComposer;

/// Artifacts produced for one audio file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOutput {
    /// Input audio.
    pub audio: PathBuf,
    /// Composite still image.
    pub image: PathBuf,
    /// Encoded video.
    pub video: PathBuf,
}

/// Outcome of a completed batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Outputs in processing order.
    pub outputs: Vec<BatchOutput>,
}

/// Process every audio file under the configured audio directory.
///
/// `make_composer` runs at most once, before the first file, so an empty directory never touches
/// the background or the font. The first error aborts the batch; outputs of earlier files stay on
/// disk while the failing file's image and any partial video are removed.
#[tracing::instrument(skip_all, fields(audio_dir = %cfg.audio_dir().display()))]
pub fn run_batch<C, E>(
    cfg: &Config,
    make_composer: impl FnOnce() -> StillframeResult<C>,
    encoder: &mut E,
    progress: &mut dyn ProgressSink,
) -> StillframeResult<BatchReport>
where
    C: FrameComposer,
    E: Encoder + ?Sized,
{
    let audio_dir = cfg.audio_dir();
    for dir in [cfg.video_dir(), cfg.image_dir(), audio_dir.clone()] {
        ensure_dir(&dir)?;
    }

    let files = list_audio_files(&audio_dir)?;
    tracing::info!(count = files.len(), "audio files found");

    let mut report = BatchReport::default();
    if files.is_empty() {
        return Ok(report);
    }

    let mut composer = make_composer()?;
    for audio in files {
        let stem = file_stem(&audio)?;
        let image = cfg.image_path(&stem);
        let video = cfg.video_path(&stem);
        tracing::info!(file = %audio.display(), "processing");

        let frame = composer.compose(&stem)?;
        frame.save(&image)?;
        tracing::debug!(image = %image.display(), "frame written");

        let job = EncodeJob {
            audio: audio.clone(),
            image: image.clone(),
            output: video.clone(),
            width: frame.width,
            height: frame.height,
        };
        if let Err(e) = encoder.encode(&job, progress) {
            remove_partial_outputs(&[image.as_path(), video.as_path()]);
            return Err(e);
        }

        report.outputs.push(BatchOutput {
            audio,
            image,
            video,
        });
    }

    Ok(report)
}

/// Regular files directly under `dir`, sorted by file name.
pub fn list_audio_files(dir: &Path) -> StillframeResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| StillframeError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StillframeError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn remove_partial_outputs(paths: &[&Path]) {
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed partial output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not remove partial output"
                )
            }
        }
    }
}

fn ensure_dir(dir: &Path) -> StillframeResult<()> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| StillframeError::io(dir, e))?;
    tracing::info!(dir = %dir.display(), "created directory");
    Ok(())
}

fn file_stem(path: &Path) -> StillframeResult<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            StillframeError::validation(format!("'{}' has no file stem", path.display()))
        })
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
