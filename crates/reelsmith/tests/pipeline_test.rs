use async_trait::async_trait;
use reelsmith::{
    Assembler, AssemblyError, AssemblyErrorKind, AssemblyResult, AssetLayout, AssetPath,
    Blueprint, ClipRenderer, CompositionResult, ContentProducer, GenerationError,
    GenerationErrorKind, GenerationResult, ImageGenerator, MockImageGenerator,
    MockVoiceSynthesizer, NarrationConfig, OutputLayout, PathsConfig, Pipeline,
    ProductionErrorKind, ReelsmithConfig, ReelsmithErrorKind, RenderSpec, RenderWorker,
    RetryPolicy, Scene, SceneClip, TraceContext,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Mock image backend that always fails one scene.
struct RefusesScene {
    inner: MockImageGenerator,
    scene_id: u32,
    refusals: AtomicU32,
}

impl RefusesScene {
    fn new(scene_id: u32) -> Self {
        Self {
            inner: MockImageGenerator::new().with_size(64, 36),
            scene_id,
            refusals: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl ImageGenerator for RefusesScene {
    async fn generate(&self, prompt: &str, destination: &Path) -> GenerationResult<PathBuf> {
        let refused = format!("{:03}", self.scene_id);
        if destination.file_stem().and_then(|s| s.to_str()) == Some(refused.as_str()) {
            self.refusals.fetch_add(1, Ordering::SeqCst);
            return Err(GenerationError::new(GenerationErrorKind::Provider {
                status: 400,
                message: "content policy".to_string(),
            }));
        }
        self.inner.generate(prompt, destination).await
    }

    fn file_extension(&self) -> &'static str {
        self.inner.file_extension()
    }

    fn provider_name(&self) -> &'static str {
        "refuses-scene"
    }
}

/// Renderer that records which scenes reached the timeline.
#[derive(Default)]
struct RecordingRenderer {
    timeline: Mutex<Vec<u32>>,
}

impl ClipRenderer for RecordingRenderer {
    fn render_clip(
        &self,
        asset: &AssetPath,
        _spec: &RenderSpec,
        clip_path: &Path,
    ) -> CompositionResult<SceneClip> {
        assert!(asset.image_path().exists());
        assert!(asset.audio_path().exists());
        std::fs::write(clip_path, b"clip").unwrap();
        Ok(SceneClip::new(*asset.scene_id(), clip_path, *asset.duration()))
    }

    fn concat_and_encode(
        &self,
        clips: &[SceneClip],
        _spec: &RenderSpec,
        output: &Path,
    ) -> AssemblyResult<()> {
        self.timeline
            .lock()
            .unwrap()
            .extend(clips.iter().map(|clip| *clip.scene_id()));
        std::fs::write(output, b"video")
            .map_err(|e| AssemblyError::new(AssemblyErrorKind::Io(e.to_string())))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn blueprint() -> Blueprint {
    let narrations = [
        "one two three four five six",
        "this scene never gets an image",
        "a b c d e f g h",
    ];
    let scenes = narrations
        .iter()
        .zip(1u32..)
        .map(|(narration, id)| {
            Scene::builder()
                .id(id)
                .narration(*narration)
                .visual_prompt(format!("visual {id}"))
                .build()
                .unwrap()
        })
        .collect();
    Blueprint::new("octopus", "Octopus facts", scenes)
}

fn pipeline(
    temp: &TempDir,
    image: Arc<RefusesScene>,
    renderer: Arc<RecordingRenderer>,
) -> Pipeline {
    let producer = ContentProducer::builder()
        .image(image)
        .voice(Arc::new(MockVoiceSynthesizer::new()))
        .layout(AssetLayout::new(temp.path().join("assets")))
        .retry(RetryPolicy::new(3, Duration::ZERO))
        .build()
        .unwrap();
    let assembler = Assembler::builder()
        .renderer(renderer)
        .output(OutputLayout::new(temp.path().join("output")))
        .worker(RenderWorker::new())
        .build()
        .unwrap();
    Pipeline::new(producer, assembler)
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
async fn test_failed_scene_is_left_out_of_video() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let temp = TempDir::new().unwrap();
    let image = Arc::new(RefusesScene::new(2));
    let renderer = Arc::new(RecordingRenderer::default());
    let pipeline = pipeline(&temp, image.clone(), renderer.clone());

    let output = pipeline
        .run(
            &blueprint(),
            &NarrationConfig::default(),
            &TraceContext::with_id("job-42"),
        )
        .await
        .unwrap();

    // 6 words and 8 words at half a second each
    assert!((output.duration() - 7.0).abs() < 1e-9);
    assert_eq!(*renderer.timeline.lock().unwrap(), vec![1, 3]);
    assert_eq!(image.refusals.load(Ordering::SeqCst), 3);
    assert_eq!(
        output.file_path(),
        &temp.path().join("output/octopus_final.mp4")
    );

    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    let failure = text
        .lines()
        .find(|line| line.contains("Scene production failed"))
        .expect("scene failure was not logged");
    assert!(failure.contains("ERROR"));
    assert!(failure.contains("scene_id=2"));
    assert!(failure.contains("job-42"));
}

#[tokio::test]
async fn test_every_scene_failing_stops_before_assembly() {
    let temp = TempDir::new().unwrap();
    let renderer = Arc::new(RecordingRenderer::default());
    let producer = ContentProducer::builder()
        .image(Arc::new(RefusesScene::new(1)))
        .voice(Arc::new(MockVoiceSynthesizer::new()))
        .layout(AssetLayout::new(temp.path().join("assets")))
        .retry(RetryPolicy::no_retry())
        .build()
        .unwrap();
    let assembler = Assembler::builder()
        .renderer(renderer.clone())
        .output(OutputLayout::new(temp.path().join("output")))
        .worker(RenderWorker::new())
        .build()
        .unwrap();
    let pipeline = Pipeline::new(producer, assembler);

    let single = Blueprint::new(
        "solo",
        "Solo",
        vec![
            Scene::builder()
                .id(1u32)
                .narration("only scene")
                .visual_prompt("nothing")
                .build()
                .unwrap(),
        ],
    );
    let err = pipeline
        .run(&single, &NarrationConfig::default(), &TraceContext::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        ReelsmithErrorKind::Production(e)
            if e.kind == ProductionErrorKind::NoScenesProduced { attempted: 1 }
    ));
    assert!(renderer.timeline.lock().unwrap().is_empty());
    assert!(!temp.path().join("output").exists());
}

#[tokio::test]
async fn test_from_config_produces_with_mock_backends() {
    let temp = TempDir::new().unwrap();
    let config = ReelsmithConfig::default()
        .with_paths(PathsConfig::new(
            temp.path().join("assets"),
            temp.path().join("output"),
        ))
        .with_render(RenderSpec::default().with_canvas(320, 180));
    let pipeline = Pipeline::from_config(&config).unwrap();

    let report = pipeline
        .produce(&blueprint(), config.narration(), &TraceContext::new())
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.manifest().scene_ids(), vec![1, 2, 3]);
    let images = temp.path().join("assets/octopus/images");
    let audio = temp.path().join("assets/octopus/audio");
    for id in 1..=3 {
        assert!(images.join(format!("{id:03}.png")).exists());
        assert!(audio.join(format!("{id:03}.wav")).exists());
    }
    assert_eq!(pipeline.assembler().spec().width(), &320);
}
