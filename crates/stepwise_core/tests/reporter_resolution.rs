use std::sync::Arc;
use stepwise_core::{
    CapturedOutput, Configuration, Format, NullStoryReporter, PrintSink, PrintStreamOutput,
    Story, StoryReporter, StoryReporterBuilder, StoryReporters,
};

fn null_reporter() -> Arc<dyn StoryReporter> {
    Arc::new(NullStoryReporter)
}

#[test]
fn unknown_paths_fall_back_to_the_default_at_read_time() {
    let mut configuration = Configuration::new();
    let original = configuration.story_reporter();
    assert!(Arc::ptr_eq(&configuration.story_reporter_for("a/b.story"), &original));

    let replacement = null_reporter();
    configuration.use_story_reporter(replacement.clone());
    assert!(Arc::ptr_eq(
        &configuration.story_reporter_for("a/b.story"),
        &replacement
    ));
}

#[test]
fn single_and_batch_overrides_share_one_map() {
    let mut configuration = Configuration::new();
    let (first, second, third) = (null_reporter(), null_reporter(), null_reporter());

    configuration
        .use_story_reporter_for("x.story", first.clone())
        .use_story_reporters(StoryReporters::from([
            ("y.story".to_string(), second.clone()),
            ("x.story".to_string(), third.clone()),
        ]));

    assert!(Arc::ptr_eq(&configuration.story_reporter_for("x.story"), &third));
    assert!(Arc::ptr_eq(&configuration.story_reporter_for("y.story"), &second));
    assert!(!Arc::ptr_eq(&configuration.story_reporter_for("x.story"), &first));
}

#[test]
fn builder_reporters_merge_with_manual_overrides() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut configuration = Configuration::new();
    let manual = null_reporter();
    configuration
        .use_story_reporter_for("manual.story", manual.clone())
        .use_story_reporter_builder(Arc::new(
            StoryReporterBuilder::new()
                .with_output_directory(dir.path())
                .with_formats(&[Format::Txt]),
        ))
        .build_reporters(vec!["org/a.story".to_string(), "org/b.story".to_string()])
        .build_reporter("org/c.story");

    assert_eq!(configuration.story_reporters().len(), 4);
    assert!(Arc::ptr_eq(
        &configuration.story_reporter_for("manual.story"),
        &manual
    ));

    let reporter = configuration.story_reporter_for("org/c.story");
    reporter.before_story(&Story::default(), false);
    reporter.successful("Given a built reporter");
    reporter.after_story(false);

    let text = std::fs::read_to_string(dir.path().join("org.c.txt")).expect("txt report");
    assert!(text.contains("Given a built reporter"));
    assert!(!dir.path().join("org.a.txt").exists());
}

#[test]
fn default_reporter_replacement_keeps_built_reporters() {
    let mut configuration = Configuration::new();
    configuration.build_reporter("kept.story");
    let built = configuration.story_reporter_for("kept.story");

    let output = CapturedOutput::new();
    configuration.use_story_reporter(Arc::new(PrintStreamOutput::new(PrintSink::writer(
        output.clone(),
    ))));

    assert!(Arc::ptr_eq(&configuration.story_reporter_for("kept.story"), &built));
    configuration.story_reporter_for("other.story").pending("When I wait");
    assert_eq!(output.contents(), "When I wait (PENDING)\n");
}
