use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::encode::stream::RawFrameStream;
use crate::foundation::error::{SpacebattleError, SpacebattleResult};

/// Frame rate of recorded matches.
pub const VIDEO_FPS: u32 = 50;

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> SpacebattleResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SpacebattleError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(SpacebattleError::validation("encode fps must be non-zero"));
        }
        Ok(())
    }

    /// Whether ffmpeg has to pad the frame to reach even yuv420p dimensions.
    pub fn needs_padding(&self) -> bool {
        !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2)
    }
}

pub fn match_video_config(out_path: impl Into<PathBuf>, width: u32, height: u32) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps: VIDEO_FPS,
        out_path: out_path.into(),
        overwrite: true,
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> SpacebattleResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Raw `rgb24` frames piped into the system `ffmpeg`, encoded as h264.
pub struct FfmpegStream {
    cfg: EncodeConfig,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
}

impl FfmpegStream {
    pub fn new(cfg: EncodeConfig) -> SpacebattleResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(SpacebattleError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(SpacebattleError::resource(
                "ffmpeg is required for video output, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.arg(if cfg.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
        ]);
        if cfg.needs_padding() {
            // yuv420p needs even dimensions; pad with one black row/column.
            cmd.args(["-vf", "pad=ceil(iw/2)*2:ceil(ih/2)*2"]);
        }
        cmd.args([
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            SpacebattleError::resource(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SpacebattleError::resource("failed to open ffmpeg stdin"))?;

        tracing::info!(
            path = %cfg.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps,
            "ffmpeg stream opened"
        );

        Ok(Self {
            cfg,
            child: Some(child),
            stdin: Some(stdin),
        })
    }
}

impl RawFrameStream for FfmpegStream {
    fn write_frame(&mut self, rgb: &[u8]) -> SpacebattleResult<()> {
        let expected = self.cfg.width as usize * self.cfg.height as usize * 3;
        if rgb.len() != expected {
            return Err(SpacebattleError::validation(format!(
                "frame data is {} bytes, expected {expected}",
                rgb.len()
            )));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SpacebattleError::encode("ffmpeg stream is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(rgb).map_err(|e| {
            SpacebattleError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        Ok(())
    }

    fn finish(&mut self) -> SpacebattleResult<()> {
        drop(self.stdin.take());
        let Some(child) = self.child.take() else {
            return Ok(());
        };

        let output = child.wait_with_output().map_err(|e| {
            SpacebattleError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpacebattleError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::info!(path = %self.cfg.out_path.display(), "video finalized");
        Ok(())
    }
}

impl Drop for FfmpegStream {
    fn drop(&mut self) {
        if self.child.is_some()
            && let Err(err) = self.finish()
        {
            tracing::warn!(%err, "ffmpeg stream finalized on drop with an error");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
