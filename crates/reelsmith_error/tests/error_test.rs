use reelsmith_error::{
    AssemblyError, AssemblyErrorKind, BuilderError, BuilderErrorKind, CompositionError,
    CompositionErrorKind, ConfigError, GenerationError, GenerationErrorKind, ProductionError,
    ProductionErrorKind, ReelsmithError, ReelsmithErrorKind, ReelsmithResult, StorageError,
    StorageErrorKind,
};

#[test]
fn test_error_records_caller_location() {
    let err = GenerationError::new(GenerationErrorKind::Http("connection reset".into()));
    assert_eq!(err.file, file!());
    assert!(err.line > 0);
    assert!(err.to_string().contains("connection reset"));
}

#[test]
fn test_domain_errors_convert_with_question_mark() {
    fn produce() -> ReelsmithResult<()> {
        let failed: Result<(), ProductionError> = Err(ProductionError::new(
            ProductionErrorKind::NoScenesProduced { attempted: 4 },
        ));
        failed?;
        Ok(())
    }

    let err = produce().unwrap_err();
    match err.kind() {
        ReelsmithErrorKind::Production(e) => {
            assert_eq!(e.kind, ProductionErrorKind::NoScenesProduced { attempted: 4 });
        }
        other => panic!("unexpected kind: {other}"),
    }
    assert!(err.to_string().contains("4"));
}

#[test]
fn test_every_domain_maps_to_its_kind() {
    let composition: ReelsmithError =
        CompositionError::new(3, CompositionErrorKind::Render("exit 1".into())).into();
    assert!(matches!(composition.kind(), ReelsmithErrorKind::Composition(e) if e.scene_id == 3));

    let assembly: ReelsmithError = AssemblyError::new(AssemblyErrorKind::EmptyManifest).into();
    assert!(matches!(assembly.into_kind(), ReelsmithErrorKind::Assembly(_)));

    let storage: ReelsmithError =
        StorageError::new(StorageErrorKind::Removal("clips".into())).into();
    assert!(matches!(storage.kind(), ReelsmithErrorKind::Storage(_)));
}

#[test]
fn test_builder_error_from_derive_builder_message() {
    let err = BuilderError::from("Field not initialized: image".to_string());
    assert!(matches!(err.kind(), BuilderErrorKind::ValidationFailed(msg) if msg.contains("image")));
}

#[test]
fn test_generation_errors_are_comparable() {
    let a = GenerationError::new(GenerationErrorKind::Provider {
        status: 429,
        message: "slow down".into(),
    });
    let b = a.clone();
    assert_eq!(a, b);
}

#[test]
fn test_config_error_names_the_offending_setting() {
    let err = ConfigError::invalid("render.fps", "must be greater than zero");
    assert_eq!(err.key.as_deref(), Some("render.fps"));
    assert!(err.to_string().starts_with("Invalid setting 'render.fps'"));

    let unreadable = ConfigError::new("Failed to read configuration");
    assert!(unreadable.key.is_none());
    assert!(unreadable.to_string().starts_with("Configuration Error: Failed to read"));
}
