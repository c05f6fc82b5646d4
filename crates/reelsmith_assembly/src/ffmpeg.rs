//! Renderer backed by the system `ffmpeg` and `ffprobe` binaries.

use crate::{ClipRenderer, RenderSpec, SceneClip};
use image::imageops::FilterType;
use reelsmith_core::AssetPath;
use reelsmith_error::{
    AssemblyError, AssemblyErrorKind, AssemblyResult, CompositionError, CompositionErrorKind,
    CompositionResult,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, instrument};

/// Whether both `ffmpeg` and `ffprobe` can be executed from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    ["ffmpeg", "ffprobe"].iter().all(|binary| {
        Command::new(binary)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    })
}

/// Composes Ken Burns clips and encodes the timeline with ffmpeg.
///
/// Each image is cover-fitted to twice the canvas size first, which keeps
/// zoompan's integer cropping from visibly stepping.
#[derive(Debug, Clone)]
pub struct FfmpegRenderer {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl Default for FfmpegRenderer {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

impl FfmpegRenderer {
    /// Use `ffmpeg` and `ffprobe` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use explicit binaries.
    pub fn with_binaries(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Read the duration of an audio file in seconds.
    fn probe_duration(&self, scene_id: u32, audio: &Path) -> CompositionResult<f64> {
        #[derive(serde::Deserialize)]
        struct ProbeFormat {
            duration: Option<String>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeOut {
            format: ProbeFormat,
        }

        let probe_error =
            |msg: String| CompositionError::new(scene_id, CompositionErrorKind::AudioProbe(msg));

        let out = Command::new(&self.ffprobe)
            .args(["-v", "error", "-print_format", "json", "-show_format"])
            .arg(audio)
            .output()
            .map_err(|e| probe_error(format!("failed to run ffprobe: {e}")))?;
        if !out.status.success() {
            return Err(probe_error(format!(
                "ffprobe failed for '{}': {}",
                audio.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
            .map_err(|e| probe_error(format!("ffprobe json parse failed: {e}")))?;
        let seconds = parsed
            .format
            .duration
            .and_then(|d| d.parse::<f64>().ok())
            .filter(|d| *d > 0.0)
            .ok_or_else(|| probe_error(format!("no duration for '{}'", audio.display())))?;
        Ok(seconds)
    }

    /// Decode the image and cover-fit it to twice the canvas.
    fn prepare_frame(
        &self,
        asset: &AssetPath,
        spec: &RenderSpec,
        frame_path: &Path,
    ) -> CompositionResult<()> {
        let scene_id = *asset.scene_id();
        let decode_error =
            |msg: String| CompositionError::new(scene_id, CompositionErrorKind::ImageDecode(msg));

        let source = image::open(asset.image_path())
            .map_err(|e| decode_error(format!("{}: {}", asset.image_path().display(), e)))?;
        let frame = source
            .resize_to_fill(spec.width() * 2, spec.height() * 2, FilterType::Triangle)
            .to_rgb8();
        frame
            .save_with_format(frame_path, image::ImageFormat::Png)
            .map_err(|e| decode_error(format!("failed to write frame: {}", e)))
    }

    fn zoompan_filter(spec: &RenderSpec, frames: u32) -> String {
        let zoom_step = spec.zoom_end() - 1.0;
        format!(
            "[0:v]zoompan=z='1+{zoom_step:.6}*on/{frames}':\
             x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':\
             d={frames}:s={w}x{h}:fps={fps},format=yuv420p[v]",
            w = spec.width(),
            h = spec.height(),
            fps = spec.fps(),
        )
    }

    fn run(&self, mut command: Command) -> Result<(), String> {
        let out = command
            .stdin(Stdio::null())
            .output()
            .map_err(|e| format!("failed to run ffmpeg: {e}"))?;
        if out.status.success() {
            Ok(())
        } else {
            Err(String::from_utf8_lossy(&out.stderr).trim().to_string())
        }
    }
}

fn concat_list_entry(path: &Path) -> String {
    // concat demuxer quoting: close the quote, escape, reopen.
    format!("file '{}'\n", path.display().to_string().replace('\'', "'\\''"))
}

impl ClipRenderer for FfmpegRenderer {
    #[instrument(skip(self, asset, spec), fields(scene_id = asset.scene_id(), clip = %clip_path.display()))]
    fn render_clip(
        &self,
        asset: &AssetPath,
        spec: &RenderSpec,
        clip_path: &Path,
    ) -> CompositionResult<SceneClip> {
        let scene_id = *asset.scene_id();
        let audio_seconds = self.probe_duration(scene_id, asset.audio_path())?;

        let frame_path = clip_path.with_extension("frame.png");
        self.prepare_frame(asset, spec, &frame_path)?;

        let frames = spec.frames_for(audio_seconds);
        let mut command = Command::new(&self.ffmpeg);
        command
            .args(["-y", "-v", "error", "-i"])
            .arg(&frame_path)
            .arg("-i")
            .arg(asset.audio_path())
            .args(["-filter_complex", Self::zoompan_filter(spec, frames).as_str()])
            .args(["-map", "[v]", "-map", "1:a:0"])
            .args(["-c:v", spec.video_codec().as_str(), "-preset", spec.preset().as_str()])
            .args(["-r", spec.fps().to_string().as_str()])
            .args(["-c:a", spec.audio_codec().as_str(), "-ar", "44100", "-ac", "2"])
            .args(["-t", format!("{audio_seconds:.3}").as_str()])
            .arg(clip_path);

        let result = self.run(command);
        let _ = std::fs::remove_file(&frame_path);
        result.map_err(|msg| CompositionError::new(scene_id, CompositionErrorKind::Render(msg)))?;

        debug!(audio_seconds, frames, "Rendered clip");
        Ok(SceneClip::new(scene_id, clip_path, *asset.duration()))
    }

    #[instrument(skip(self, clips, spec), fields(clips = clips.len(), output = %output.display()))]
    fn concat_and_encode(
        &self,
        clips: &[SceneClip],
        spec: &RenderSpec,
        output: &Path,
    ) -> AssemblyResult<()> {
        let encode_error = |msg: String| AssemblyError::new(AssemblyErrorKind::Encode(msg));
        let first = clips
            .first()
            .ok_or_else(|| encode_error("no clips to concatenate".to_string()))?;
        let list_path = first.path().with_file_name("concat.txt");

        let mut list = std::fs::File::create(&list_path).map_err(|e| {
            AssemblyError::new(AssemblyErrorKind::Io(format!(
                "{}: {}",
                list_path.display(),
                e
            )))
        })?;
        for clip in clips {
            list.write_all(concat_list_entry(clip.path()).as_bytes())
                .map_err(|e| AssemblyError::new(AssemblyErrorKind::Io(e.to_string())))?;
        }
        drop(list);

        let mut command = Command::new(&self.ffmpeg);
        command
            .args(["-y", "-v", "error", "-f", "concat", "-safe", "0", "-i"])
            .arg(&list_path)
            .args(["-c:v", spec.video_codec().as_str(), "-preset", spec.preset().as_str()])
            .args(["-pix_fmt", "yuv420p", "-r", spec.fps().to_string().as_str()])
            .args(["-c:a", spec.audio_codec().as_str()])
            .args(["-movflags", "+faststart"])
            .arg(output);

        let result = self.run(command).map_err(encode_error);
        let _ = std::fs::remove_file(&list_path);
        result
    }

    fn name(&self) -> &'static str {
        "ffmpeg"
    }
}
