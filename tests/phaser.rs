//! End-to-end runs through the factories and the runner.

use std::fs;
use std::path::Path;

use u_phaser::factory::{
    Algorithm, AlgorithmFactoryOptions, FitnessMetricFactory, GeneticAlgorithmFactory,
    MetricFactoryOptions, PopulationFactory, PopulationFactoryOptions, ProgramFactory,
    ProgramFactoryOptions,
};
use u_phaser::population::file::read_chromosomes;
use u_phaser::population::Population;
use u_phaser::rng::create_rng;
use u_phaser::runner::{AlgorithmRunner, RunnerOptions};
use u_phaser::PhaserError;

const PROGRAM: &str = "{ a { b { c } { } } { d { } e } { { { f } } } g }";

struct Setup {
    population: Population,
    algorithm: u_phaser::algorithm::Strategy,
}

fn setup(dir: &Path, algorithm: Algorithm, seed: u32) -> Result<(Setup, u_phaser::rng::PhaserRng), PhaserError> {
    let input_file = dir.join("program.yul");
    fs::write(&input_file, PROGRAM).unwrap();

    let mut rng = create_rng(seed);
    let program = ProgramFactory::build(&ProgramFactoryOptions { input_file })?;
    let metric = FitnessMetricFactory::build(&MetricFactoryOptions::default(), program)?;
    let population = PopulationFactory::build(
        &PopulationFactoryOptions {
            min_chromosome_length: 4,
            max_chromosome_length: 10,
            population: vec!["fu".into(), "fu".into(), "".into()],
            random_population: vec![20],
            population_from_file: Vec::new(),
        },
        metric,
        &mut rng,
    )?;
    let algorithm = GeneticAlgorithmFactory::build(
        &AlgorithmFactoryOptions {
            algorithm,
            min_chromosome_length: 4,
            max_chromosome_length: 10,
            ..AlgorithmFactoryOptions::default()
        },
        population.len(),
    )?;
    Ok((Setup { population, algorithm }, rng))
}

#[test]
fn test_gewep_run_with_autosave() {
    let dir = tempfile::tempdir().unwrap();
    let autosave = dir.path().join("autosave.txt");
    let (fixture, mut rng) = setup(dir.path(), Algorithm::Gewep, 42).unwrap();

    let mut runner = AlgorithmRunner::new(
        fixture.population,
        RunnerOptions::default()
            .with_max_rounds(10)
            .with_population_autosave_file(&autosave)
            .with_randomise_duplicates(4, 10),
    );
    let mut out = Vec::new();
    let result = runner.run(&fixture.algorithm, &mut rng, &mut out).unwrap();

    assert_eq!(result.rounds, 10);
    assert_eq!(runner.population().len(), 23);

    // Flattening leaves only the seven tokens, and elitism keeps "fu".
    assert_eq!(runner.population().best().unwrap().fitness(), 7);

    let saved = read_chromosomes(&autosave).unwrap();
    assert_eq!(saved.len(), 23);
    let current: Vec<_> = runner.population().chromosomes().cloned().collect();
    assert_eq!(saved, current);

    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("---------- ROUND 10 ----------"));
}

#[test]
fn test_random_run_is_reproducible() {
    let first_dir = tempfile::tempdir().unwrap();
    let second_dir = tempfile::tempdir().unwrap();
    let (first, mut first_rng) = setup(first_dir.path(), Algorithm::Random, 7).unwrap();
    let (second, mut second_rng) = setup(second_dir.path(), Algorithm::Random, 7).unwrap();

    let options = RunnerOptions::default()
        .with_max_rounds(5)
        .with_randomise_duplicates(4, 10);
    let mut first_runner = AlgorithmRunner::new(first.population, options.clone());
    let mut second_runner = AlgorithmRunner::new(second.population, options);
    let mut first_out = Vec::new();
    let mut second_out = Vec::new();

    first_runner.run(&first.algorithm, &mut first_rng, &mut first_out).unwrap();
    second_runner.run(&second.algorithm, &mut second_rng, &mut second_out).unwrap();

    assert_eq!(first_out, second_out);
    assert_eq!(
        first_runner.population().individuals(),
        second_runner.population().individuals()
    );
}

#[test]
fn test_autosave_can_seed_the_next_run() {
    let dir = tempfile::tempdir().unwrap();
    let autosave = dir.path().join("autosave.txt");
    let (setup_result, mut rng) = setup(dir.path(), Algorithm::Gewep, 3).unwrap();

    let mut runner = AlgorithmRunner::new(
        setup_result.population,
        RunnerOptions::default()
            .with_max_rounds(2)
            .with_population_autosave_file(&autosave),
    );
    runner.run(&setup_result.algorithm, &mut rng, &mut Vec::new()).unwrap();

    let metric = runner.population().fitness_metric().clone();
    let resumed = PopulationFactory::build(
        &PopulationFactoryOptions {
            min_chromosome_length: 4,
            max_chromosome_length: 10,
            population_from_file: vec![autosave],
            ..PopulationFactoryOptions::default()
        },
        metric,
        &mut rng,
    )
    .unwrap();
    assert_eq!(&resumed, runner.population());
}

#[test]
fn test_broken_program_aborts_before_the_first_round() {
    let dir = tempfile::tempdir().unwrap();
    let input_file = dir.path().join("broken.yul");
    fs::write(&input_file, "{ a } }").unwrap();

    let err = ProgramFactory::build(&ProgramFactoryOptions { input_file }).unwrap_err();
    match err {
        PhaserError::ProgramLoad { errors, .. } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].offset, 6);
        }
        other => panic!("expected a program load error, got {other:?}"),
    }
}
