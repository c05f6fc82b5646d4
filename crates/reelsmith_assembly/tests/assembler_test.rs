use reelsmith_assembly::{Assembler, ClipRenderer, RenderSpec, RenderWorker, SceneClip};
use reelsmith_core::{AssetPath, ProductionManifest, TraceContext};
use reelsmith_error::{
    AssemblyError, AssemblyErrorKind, AssemblyResult, BuilderErrorKind, CompositionError,
    CompositionErrorKind, CompositionResult, ReelsmithError, ReelsmithErrorKind,
};
use reelsmith_storage::OutputLayout;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Renderer that writes placeholder files and records call order.
#[derive(Default)]
struct FakeRenderer {
    broken: HashSet<u32>,
    rendered: Mutex<Vec<u32>>,
    concatenated: Mutex<Vec<u32>>,
}

impl FakeRenderer {
    fn breaking(scene_ids: &[u32]) -> Self {
        Self {
            broken: scene_ids.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn rendered(&self) -> Vec<u32> {
        self.rendered.lock().unwrap().clone()
    }

    fn concatenated(&self) -> Vec<u32> {
        self.concatenated.lock().unwrap().clone()
    }
}

impl ClipRenderer for FakeRenderer {
    fn render_clip(
        &self,
        asset: &AssetPath,
        _spec: &RenderSpec,
        clip_path: &Path,
    ) -> CompositionResult<SceneClip> {
        let scene_id = *asset.scene_id();
        self.rendered.lock().unwrap().push(scene_id);
        if self.broken.contains(&scene_id) {
            return Err(CompositionError::new(
                scene_id,
                CompositionErrorKind::ImageDecode("corrupt header".into()),
            ));
        }
        std::fs::write(clip_path, format!("clip {scene_id}")).unwrap();
        Ok(SceneClip::new(scene_id, clip_path, *asset.duration()))
    }

    fn concat_and_encode(
        &self,
        clips: &[SceneClip],
        _spec: &RenderSpec,
        output: &Path,
    ) -> AssemblyResult<()> {
        self.concatenated
            .lock()
            .unwrap()
            .extend(clips.iter().map(|clip| *clip.scene_id()));
        std::fs::write(output, vec![0u8; 2048])
            .map_err(|e| AssemblyError::new(AssemblyErrorKind::Io(e.to_string())))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

fn manifest(base: &Path, durations: &[(u32, f64)]) -> ProductionManifest {
    let assets = durations
        .iter()
        .map(|(id, duration)| {
            AssetPath::new(
                *id,
                base.join(format!("images/{id:03}.png")),
                base.join(format!("audio/{id:03}.wav")),
                *duration,
            )
        })
        .collect();
    ProductionManifest::new("demo", base, assets)
}

fn assembler(renderer: Arc<FakeRenderer>, output: &Path, spec: RenderSpec) -> Assembler {
    Assembler::builder()
        .renderer(renderer)
        .output(OutputLayout::new(output))
        .spec(spec)
        .worker(RenderWorker::new())
        .build()
        .unwrap()
}

fn assembly_kind(err: ReelsmithError) -> AssemblyErrorKind {
    match err.into_kind() {
        ReelsmithErrorKind::Assembly(e) => e.kind,
        other => panic!("expected assembly error, got {other}"),
    }
}

#[tokio::test]
async fn test_duration_is_sum_of_assets() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("demo");
    let output_dir = temp.path().join("output");
    let renderer = Arc::new(FakeRenderer::default());
    let assembler = assembler(renderer.clone(), &output_dir, RenderSpec::default());

    let manifest = manifest(&base, &[(1, 3.0), (2, 4.5), (3, 2.0)]);
    let output = assembler
        .assemble(manifest, &TraceContext::new())
        .await
        .unwrap();

    assert!((output.duration() - 9.5).abs() < 1e-9);
    assert_eq!(output.topic_id(), "demo");
    assert_eq!(output.file_path(), &output_dir.join("demo_final.mp4"));
    assert_eq!(*output.file_size_bytes(), 2048);
    assert!(output.file_path().exists());
    assert_eq!(renderer.concatenated(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_clips_rendered_in_ascending_order() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("demo");
    let renderer = Arc::new(FakeRenderer::default());
    let assembler = assembler(
        renderer.clone(),
        &temp.path().join("output"),
        RenderSpec::default(),
    );

    let manifest = manifest(&base, &[(4, 1.0), (1, 1.0), (3, 1.0), (2, 1.0)]);
    assembler
        .assemble(manifest, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(renderer.rendered(), vec![1, 2, 3, 4]);
    assert_eq!(renderer.concatenated(), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_empty_manifest_fails_before_touching_disk() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("demo");
    let output_dir = temp.path().join("output");
    let renderer = Arc::new(FakeRenderer::default());
    let assembler = assembler(renderer.clone(), &output_dir, RenderSpec::default());

    let err = assembler
        .assemble(manifest(&base, &[]), &TraceContext::new())
        .await
        .unwrap_err();

    assert_eq!(assembly_kind(err), AssemblyErrorKind::EmptyManifest);
    assert!(!output_dir.exists());
    assert!(!base.exists());
    assert!(renderer.rendered().is_empty());
}

#[tokio::test]
async fn test_failed_clip_is_skipped() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("demo");
    let renderer = Arc::new(FakeRenderer::breaking(&[2]));
    let assembler = assembler(
        renderer.clone(),
        &temp.path().join("output"),
        RenderSpec::default(),
    );

    let manifest = manifest(&base, &[(1, 3.0), (2, 4.5), (3, 2.0)]);
    let input_duration = manifest.total_duration();
    let output = assembler
        .assemble(manifest, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(renderer.rendered(), vec![1, 2, 3]);
    assert_eq!(renderer.concatenated(), vec![1, 3]);
    // Skipped clips still count toward the reported duration.
    assert_eq!(*output.duration(), input_duration);
    assert!((output.duration() - 9.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_all_clips_failing_writes_no_output() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("demo");
    let output_dir = temp.path().join("output");
    let renderer = Arc::new(FakeRenderer::breaking(&[1, 2]));
    let assembler = assembler(renderer.clone(), &output_dir, RenderSpec::default());

    let err = assembler
        .assemble(manifest(&base, &[(1, 1.0), (2, 1.0)]), &TraceContext::new())
        .await
        .unwrap_err();

    assert_eq!(
        assembly_kind(err),
        AssemblyErrorKind::NoComposableClips { attempted: 2 }
    );
    assert!(!output_dir.join("demo_final.mp4").exists());
    assert!(renderer.concatenated().is_empty());
}

#[tokio::test]
async fn test_intermediate_clips_removed_by_default() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("demo");
    let assembler = assembler(
        Arc::new(FakeRenderer::default()),
        &temp.path().join("output"),
        RenderSpec::default(),
    );

    assembler
        .assemble(manifest(&base, &[(1, 1.0)]), &TraceContext::new())
        .await
        .unwrap();

    assert!(!base.join("clips").exists());
}

#[tokio::test]
async fn test_intermediate_clips_kept_on_request() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("demo");
    let assembler = assembler(
        Arc::new(FakeRenderer::default()),
        &temp.path().join("output"),
        RenderSpec::default().with_keep_intermediates(true),
    );

    assembler
        .assemble(manifest(&base, &[(1, 1.0), (2, 1.0)]), &TraceContext::new())
        .await
        .unwrap();

    assert!(base.join("clips/001.mp4").exists());
    assert!(base.join("clips/002.mp4").exists());
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_skipped_clip_is_logged_with_scene_id() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let temp = TempDir::new().unwrap();
    let base = temp.path().join("demo");
    let assembler = assembler(
        Arc::new(FakeRenderer::breaking(&[2])),
        &temp.path().join("output"),
        RenderSpec::default(),
    );

    assembler
        .assemble(
            manifest(&base, &[(1, 1.0), (2, 1.0)]),
            &TraceContext::with_id("trace-xyz"),
        )
        .await
        .unwrap();

    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    let line = text
        .lines()
        .find(|line| line.contains("Skipping clip"))
        .expect("skip was not logged");
    assert!(line.contains("WARN"));
    assert!(line.contains("scene_id=2"));
    assert!(line.contains("trace_id=trace-xyz"));
    assert!(line.contains("corrupt header"));
}

#[test]
fn test_builder_requires_renderer() {
    let err = Assembler::builder()
        .output(OutputLayout::new("output"))
        .build()
        .unwrap_err();
    assert!(matches!(err.kind(), BuilderErrorKind::MissingField(msg) if msg.contains("renderer")));
}

#[test]
fn test_builder_rejects_invalid_spec() {
    let err = Assembler::builder()
        .renderer(Arc::new(FakeRenderer::default()))
        .output(OutputLayout::new("output"))
        .spec(RenderSpec::default().with_fps(0))
        .build()
        .unwrap_err();
    assert!(matches!(err.kind(), BuilderErrorKind::ValidationFailed(_)));
}
