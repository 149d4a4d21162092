use std::fs;

use super::die;

pub fn settings_export() {
    print!("{}", lookup_engine::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        lookup_engine::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    let enabled: Vec<&str> = lookup_engine::metric::MetricRegistry::from_settings(&s.metrics)
        .enabled()
        .map(|kind| kind.name())
        .collect();
    println!(
        "OK: metrics.default={}, enabled=[{}], suggest.max_results={}",
        s.metrics.default,
        enabled.join(", "),
        s.suggest.max_results
    );
}

/// Installs `file` as the process-wide settings before any engine is built.
pub fn settings_load(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        lookup_engine::settings::init_custom(content),
        "Error loading settings: {}"
    );
}
