use std::sync::Arc;
use stepwise_core::{
    CandidateSteps, CapturedOutput, Configuration, Format, LoadFromMemory, PendingStepFound,
    PrintSink, PrintStreamStepMonitor, PrintStreamStepdocReporter, Step, StepDefinitions,
    StepFailure, StoryReporterBuilder, StoryStatistics,
};

const CAR_STORY: &str = "\
Buying cars

Narrative:
In order to travel
As a driver
I want to buy a car

Scenario: buying a car
Given a red car
When I pay 300 dollars
Then I own the car
And the dealer waves

Scenario: selling a car
Given a blue car
!-- When the market is closed
Then nobody buys it
";

fn car_steps(configuration: &Configuration) -> StepDefinitions {
    let mut steps = StepDefinitions::new("cars", configuration.step_pattern_parser());
    steps
        .given("a $colour car", "fn a_car(colour: String)")
        .expect("given pattern")
        .when("I pay $amount dollars", "fn pay(amount: u32)")
        .expect("when pattern")
        .then("I own the car", "fn own()")
        .expect("then pattern");
    steps
}

/// Runs one story through the configured collaborators the way a driver
/// would, without executing step bodies.
fn run_story(configuration: &Configuration, story_name: &str, candidates: &dyn CandidateSteps) {
    let story_path = configuration.story_path_resolver().resolve(story_name);
    let text = configuration
        .story_loader()
        .load_story_as_text(&story_path)
        .expect("story text");
    let story = configuration.story_parser().parse_story(&text, &story_path);
    let reporter = configuration.story_reporter_for(&story_path);
    let candidates = candidates.list_candidates();

    reporter.before_story(&story, false);
    if configuration.dry_run() {
        reporter.dry_run();
    }
    for scenario in &story.scenarios {
        reporter.before_scenario(&scenario.title);
        let steps = configuration
            .step_collector()
            .collect_steps(configuration, &candidates, scenario);
        for step in &steps {
            match step {
                Step::Matched { text, .. } => reporter.successful(text),
                Step::Ignorable { text } => reporter.ignorable(text),
                Step::Pending { text } => match configuration
                    .pending_step_strategy()
                    .handle_failure(PendingStepFound::new(text.as_str()))
                {
                    Ok(()) => reporter.pending(text),
                    Err(pending) => {
                        let failure = StepFailure::new(text.as_str(), pending.to_string());
                        reporter.failed(text, &failure);
                    }
                },
            }
        }
        reporter.after_scenario();
    }
    reporter.after_story(false);
}

#[test]
fn story_flows_from_name_to_rendered_view() {
    let output = tempfile::tempdir().expect("temp dir");
    let mut configuration = Configuration::new();
    configuration
        .use_story_loader(Arc::new(
            LoadFromMemory::new().with_story("shop/buying_cars.story", CAR_STORY),
        ))
        .use_story_reporter_builder(Arc::new(
            StoryReporterBuilder::new()
                .with_output_directory(output.path())
                .with_formats(&[Format::Txt, Format::Stats]),
        ))
        .build_reporter("shop/buying_cars.story");

    let steps = car_steps(&configuration);
    run_story(&configuration, "shop::BuyingCars", &steps);

    let txt = std::fs::read_to_string(output.path().join("shop.buying_cars.txt"))
        .expect("txt report");
    assert!(txt.contains("Scenario: buying a car"));
    assert!(txt.contains("I want to buy a car"));
    assert!(txt.contains("Then nobody buys it (PENDING)"));

    let stats = StoryStatistics::from_properties(
        &std::fs::read_to_string(output.path().join("shop.buying_cars.stats"))
            .expect("stats report"),
    );
    assert_eq!(stats.scenarios, 2);
    assert_eq!(stats.steps, 7);
    assert_eq!(stats.steps_successful, 4);
    assert_eq!(stats.steps_ignorable, 1);
    assert_eq!(stats.steps_pending, 2);
    assert_eq!(stats.scenarios_failed, 0);

    let view = configuration
        .report_renderer()
        .render(output.path(), configuration.story_reporter_builder().formats())
        .expect("view");
    assert_eq!(view.stories, 1);
    assert_eq!(view.totals, stats);
}

#[test]
fn strict_pending_strategy_reports_failures() {
    let output = tempfile::tempdir().expect("temp dir");
    let mut configuration = Configuration::new();
    configuration
        .use_story_loader(Arc::new(
            LoadFromMemory::new().with_story("buying_cars.story", CAR_STORY),
        ))
        .use_pending_step_strategy(Arc::new(stepwise_core::FailingUponPendingStep))
        .use_story_reporter_builder(Arc::new(
            StoryReporterBuilder::new()
                .with_output_directory(output.path())
                .with_formats(&[Format::Stats]),
        ))
        .build_reporter("buying_cars.story");

    let steps = car_steps(&configuration);
    run_story(&configuration, "BuyingCars", &steps);

    let stats = StoryStatistics::from_properties(
        &std::fs::read_to_string(output.path().join("buying_cars.stats")).expect("stats"),
    );
    assert_eq!(stats.steps, 7);
    assert_eq!(stats.steps_failed, 2);
    assert_eq!(stats.steps_pending, 0);
    assert_eq!(stats.scenarios_failed, 2);
}

#[test]
fn dry_run_is_announced_to_the_default_reporter() {
    let output = CapturedOutput::new();
    let mut configuration = Configuration::new();
    configuration
        .use_story_loader(Arc::new(
            LoadFromMemory::new().with_story("buying_cars.story", CAR_STORY),
        ))
        .use_story_reporter(Arc::new(stepwise_core::PrintStreamOutput::new(
            PrintSink::writer(output.clone()),
        )))
        .do_dry_run(true);

    let steps = car_steps(&configuration);
    run_story(&configuration, "BuyingCars", &steps);

    let text = output.contents();
    assert!(text.contains("DRY RUN"));
    assert!(text.contains("When I pay 300 dollars"));
}

#[test]
fn stepdocs_list_the_registered_patterns() {
    let mut configuration = Configuration::new();
    let output = CapturedOutput::new();
    configuration.use_stepdoc_reporter(Arc::new(PrintStreamStepdocReporter::new(
        PrintSink::writer(output.clone()),
    )));

    let steps: Vec<Arc<dyn CandidateSteps>> = vec![Arc::new(car_steps(&configuration))];
    let stepdocs = configuration.stepdoc_generator().generate(&steps);
    assert_eq!(stepdocs.len(), 3);
    configuration.stepdoc_reporter().stepdocs(&stepdocs);

    let text = output.contents();
    assert!(text.starts_with("Given a $colour car\n"));
    assert!(text.contains("When I pay $amount dollars\n    fn pay(amount: u32)"));
}

#[test]
fn matched_parameters_convert_with_configured_converters() {
    let output = CapturedOutput::new();
    let mut configuration = Configuration::new();
    configuration.use_step_monitor(Arc::new(PrintStreamStepMonitor::new(PrintSink::writer(
        output.clone(),
    ))));
    let steps = car_steps(&configuration);
    let story = configuration.story_parser().parse_story(CAR_STORY, "cars.story");

    let collected = configuration.step_collector().collect_steps(
        &configuration,
        &steps.list_candidates(),
        &story.scenarios[0],
    );
    let Step::Matched { parameters, .. } = &collected[1] else {
        panic!("pay step should match");
    };
    assert_eq!(parameters, &vec![("amount".to_string(), "300".to_string())]);
    let amount: u32 = configuration
        .parameter_converters()
        .convert_monitored(&parameters[0].1, configuration.step_monitor().as_ref())
        .expect("u32 amount");
    assert_eq!(amount, 300);
    assert!(output
        .contents()
        .contains("Converted value '300' of type 'u32' to '300'"));
}
