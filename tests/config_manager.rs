use cpugen::config::{AppConfig, BoundsPolicy, ConfigManager, SeedingMode};
use cpugen::error::CpuGenError;
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_defaults_match_reference_run() {
    let config = ConfigManager::new().get();
    assert_eq!(config.evolution.population_size, 10);
    assert_eq!(config.evolution.generations, 5);
    assert_eq!(config.evolution.num_best, 3);
    assert_eq!(config.sampling.clock_speed_range, (1.0, 3.0));
    assert_eq!(config.sampling.memory_size_range, (2048, 65536));
    assert_eq!(config.mutation.clock_factor_range, (0.9, 1.1));
    assert_eq!(config.mutation.memory_offset_range, (-1024, 1024));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_file_layers_over_defaults() {
    let file = write_config(
        r#"
[evolution]
population_size = 40
num_best = 8
seed = 1234
seeding = "RuleBased"

[mutation]
bounds_policy = "Unbounded"
memory_offset_range = [-256, 256]
"#,
    );

    let manager = ConfigManager::new();
    manager.load_from_file(file.path()).unwrap();
    let config = manager.get();

    assert_eq!(config.evolution.population_size, 40);
    assert_eq!(config.evolution.num_best, 8);
    assert_eq!(config.evolution.seed, Some(1234));
    assert_eq!(config.evolution.seeding, SeedingMode::RuleBased);
    assert_eq!(config.evolution.generations, 5);
    assert_eq!(config.mutation.bounds_policy, BoundsPolicy::Unbounded);
    assert_eq!(config.mutation.memory_offset_range, (-256, 256));
    assert_eq!(config.sampling.clock_speed_range, (1.0, 3.0));
}

#[test]
fn test_invalid_file_is_rejected_and_previous_config_kept() {
    let file = write_config(
        r#"
[evolution]
population_size = 2
num_best = 3
"#,
    );

    let manager = ConfigManager::new();
    let result = manager.load_from_file(file.path());
    assert!(matches!(result, Err(CpuGenError::Configuration(_))));
    assert_eq!(manager.get().evolution.population_size, 10);
}

#[test]
fn test_missing_file_is_an_error() {
    let manager = ConfigManager::new();
    assert!(manager.load_from_file("/definitely/not/here/cpugen.toml").is_err());
}

#[test]
fn test_save_and_reload_round_trip() {
    let manager = ConfigManager::new();
    manager
        .update(|config| {
            config.evolution.generations = 12;
            config.evolution.seed = Some(77);
            config.sampling.memory_size_range = (4096, 32768);
        })
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cpugen.toml");
    manager.save_to_file(&path).unwrap();

    let reloaded = ConfigManager::new();
    reloaded.load_from_file(&path).unwrap();
    let config = reloaded.get();
    assert_eq!(config.evolution.generations, 12);
    assert_eq!(config.evolution.seed, Some(77));
    assert_eq!(config.sampling.memory_size_range, (4096, 32768));
}

#[test]
fn test_update_rejects_invalid_change() {
    let manager = ConfigManager::new();
    let result = manager.update(|config| config.evolution.num_best = 0);
    assert!(result.is_err());
    assert_eq!(manager.get().evolution.num_best, 3);
}

#[test]
fn test_manifests_cover_every_section() {
    let sections: Vec<String> = AppConfig::default()
        .manifests()
        .into_iter()
        .map(|m| m.section)
        .collect();
    assert_eq!(sections, vec!["Evolution", "Sampling", "Mutation", "Rules"]);
}
