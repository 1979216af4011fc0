use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::encode::profile::EncodeProfile;
use crate::encode::progress::{ProgressParser, ProgressSink};
use crate::encode::{EncodeJob, Encoder};
use crate::foundation::error::{StillframeError, StillframeResult};

/// Spawns the system `ffmpeg` once per job.
///
/// The audio is input 0 and the still image input 1; the image is mapped as the only video
/// stream and scaled to the job size. Progress is read from `-progress pipe:1` on stdout while
/// stderr is drained on a helper thread.
#[derive(Clone, Debug)]
pub struct FfmpegEncoder {
    program: PathBuf,
    profile: EncodeProfile,
}

impl FfmpegEncoder {
    /// Encoder invoking `program` (a path, or a bare name looked up on `PATH`).
    pub fn new(program: impl Into<PathBuf>, profile: EncodeProfile) -> Self {
        Self {
            program: program.into(),
            profile,
        }
    }

    /// Executable this encoder runs.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Active encoding profile.
    pub fn profile(&self) -> &EncodeProfile {
        &self.profile
    }

    /// Return `true` when the executable answers `-version`.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Full argument list for `job`, excluding the program itself.
    pub fn args(&self, job: &EncodeJob) -> Vec<OsString> {
        let p = &self.profile;
        let mut args: Vec<OsString> = [
            "-hide_banner",
            "-nostdin",
            "-y",
            "-loglevel",
            "error",
            "-progress",
            "pipe:1",
            "-nostats",
            "-i",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(job.audio.clone().into_os_string());
        args.push("-i".into());
        args.push(job.image.clone().into_os_string());

        let mut push = |k: &str, v: String| {
            args.push(k.into());
            args.push(v.into());
        };
        push("-map", "1:v:0".to_owned());
        push("-map", "0:a:0".to_owned());
        push("-c:v", p.video_codec.clone());
        push("-pix_fmt", p.pixel_format.clone());
        push("-crf", p.crf.to_string());
        push("-preset", p.preset.clone());
        push("-r", p.frame_rate.to_string());
        push("-b:v", p.video_bitrate.clone());
        if let Some(x264) = &p.x264_params {
            push("-x264-params", x264.clone());
        }
        push("-vf", p.scale_filter(job.width, job.height));
        push("-c:a", p.audio_codec.clone());

        args.push(job.output.clone().into_os_string());
        args
    }

    fn run(
        &self,
        job: &EncodeJob,
        total: Option<Duration>,
        progress: &mut dyn ProgressSink,
    ) -> StillframeResult<()> {
        let mut parser = ProgressParser::new(total);

        let mut child = Command::new(&self.program)
            .args(self.args(job))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                StillframeError::encode(format!(
                    "failed to spawn '{}' (is ffmpeg installed?): {e}",
                    self.program.display()
                ))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| StillframeError::encode("failed to open ffmpeg stdout (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| StillframeError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok::<_, std::io::Error>(stderr_bytes)
        });

        for line in BufReader::new(stdout).lines() {
            let Ok(line) = line else {
                break;
            };
            if let Some(ev) = parser.feed(&line) {
                progress.progress(&ev);
            }
        }

        let status = child.wait().map_err(|e| {
            StillframeError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = stderr_drain
            .join()
            .map_err(|_| StillframeError::encode("ffmpeg stderr drain thread panicked"))?
            .map_err(|e| StillframeError::encode(format!("ffmpeg stderr read failed: {e}")))?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(StillframeError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl Encoder for FfmpegEncoder {
    #[tracing::instrument(skip_all, fields(output = %job.output.display()))]
    fn encode(&mut self, job: &EncodeJob, progress: &mut dyn ProgressSink) -> StillframeResult<()> {
        self.profile.validate()?;
        job.validate()?;
        ensure_parent_dir(&job.output)?;

        let total = probe_duration(&job.audio);
        tracing::debug!(?total, "audio duration");
        progress.begin(job, total);
        let res = self.run(job, total, progress);
        progress.finish(job, res.is_ok());

        match &res {
            Ok(()) => tracing::info!("encoded"),
            Err(e) => tracing::warn!(error = %e, "encode failed"),
        }
        res
    }
}

/// Duration of the audio at `path` from its container metadata.
pub fn probe_duration(path: &Path) -> Option<Duration> {
    use lofty::file::AudioFile as _;

    match lofty::read_from_path(path) {
        Ok(file) => Some(file.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "audio duration probe failed");
            None
        }
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> StillframeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StillframeError::io(parent, e))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
