use reelsmith_core::{AssetPath, NarrationConfig, ProductionManifest, TraceContext, VideoOutput};

#[test]
fn test_manifest_sorts_assets_ascending() {
    let manifest = ProductionManifest::new(
        "topic",
        "/assets/topic",
        vec![
            AssetPath::new(5, "5.png", "5.wav", 1.0),
            AssetPath::new(2, "2.png", "2.wav", 1.0),
            AssetPath::new(4, "4.png", "4.wav", 1.0),
        ],
    );

    assert_eq!(manifest.scene_ids(), vec![2, 4, 5]);
    assert_eq!(manifest.len(), 3);
}

#[test]
fn test_manifest_total_duration_sums_assets() {
    let manifest = ProductionManifest::new(
        "topic",
        "/assets/topic",
        vec![
            AssetPath::new(2, "2.png", "2.wav", 4.5),
            AssetPath::new(1, "1.png", "1.wav", 3.0),
            AssetPath::new(3, "3.png", "3.wav", 2.0),
        ],
    );

    assert_eq!(manifest.total_duration(), 9.5);
}

#[test]
fn test_empty_manifest_reports_empty() {
    let manifest = ProductionManifest::new("topic", "/assets/topic", vec![]);
    assert!(manifest.is_empty());
    assert_eq!(manifest.total_duration(), 0.0);
}

#[test]
fn test_narration_defaults_match_builder_defaults() {
    let built = NarrationConfig::builder().build().unwrap();
    assert_eq!(built, NarrationConfig::default());
    assert_eq!(*built.speed(), 1.0);
    assert!(built.tone().is_none());
}

#[test]
fn test_narration_partial_json_fills_defaults() {
    let narration: NarrationConfig =
        serde_json::from_str(r#"{"voice_id": "nova", "tone": "calm"}"#).unwrap();
    assert_eq!(narration.voice_id(), "nova");
    assert_eq!(narration.tone().as_deref(), Some("calm"));
    assert_eq!(*narration.speed(), 1.0);
}

#[test]
fn test_output_reports_size_in_mebibytes() {
    let output = VideoOutput::new("topic", "/out/topic_final.mp4", 9.5, 3 * 1024 * 1024);
    assert_eq!(output.file_size_mb(), 3.0);
    assert_eq!(*output.duration(), 9.5);
}

#[test]
fn test_trace_context_displays_its_id() {
    let ctx = TraceContext::with_id("run-7");
    assert_eq!(ctx.to_string(), "run-7");
    assert_eq!(TraceContext::default().trace_id().len(), 36);
}

#[test]
fn test_deserialized_manifest_is_normalized() {
    let json = r#"{
        "topic_id": "topic",
        "base_dir": "/assets/topic",
        "assets": [
            {"scene_id": 3, "image_path": "3.png", "audio_path": "3.wav", "duration": 2.0},
            {"scene_id": 1, "image_path": "1.png", "audio_path": "1.wav", "duration": 3.0},
            {"scene_id": 3, "image_path": "3b.png", "audio_path": "3b.wav", "duration": 9.0},
            {"scene_id": 2, "image_path": "2.png", "audio_path": "2.wav", "duration": 4.5}
        ],
        "created_at": "2026-01-02T03:04:05Z"
    }"#;

    let manifest: ProductionManifest = serde_json::from_str(json).unwrap();
    assert_eq!(manifest.scene_ids(), vec![1, 2, 3]);
    assert_eq!(manifest.created_at().to_rfc3339(), "2026-01-02T03:04:05+00:00");

    let round_trip: ProductionManifest =
        serde_json::from_str(&serde_json::to_string(&manifest).unwrap()).unwrap();
    assert_eq!(round_trip, manifest);
}
