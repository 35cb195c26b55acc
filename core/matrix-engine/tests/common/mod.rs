//! FILENAME: tests/common/mod.rs
//! Shared fixtures for matrix-engine integration tests.

#![allow(dead_code)]

use matrix_engine::Dataset;

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// A small catalogue of PC builds: one configuration per row.
pub struct BuildsFixture;

impl BuildsFixture {
    pub fn headers() -> Vec<&'static str> {
        vec!["Config", "CPU", "Motherboard", "GPU", "Case", "PSU"]
    }

    /// (config, cpu, motherboard, gpu, case, psu)
    pub fn data() -> Vec<(&'static str, &'static str, &'static str, &'static str, &'static str, &'static str)> {
        vec![
            ("PC-001", "Ryzen 5", "B650", "RTX4060", "MidTower", "650W"),
            ("PC-002", "Ryzen 7", "X670", "RTX4070", "MidTower", "750W"),
            ("PC-003", "Core i5", "B760", "RTX4060", "MiniITX", "550W"),
            ("PC-004", "Core i7", "Z790", "RTX4080", "FullTower", "850W"),
            ("PC-005", "Ryzen 5", "X670", "RTX4070", " MidTower", "750W "),
            ("PC-006", "Core i7", "B760", "RTX4090", "MiniITX", "1000W"),
            ("PC-007", "Core i5", "Z790", "", "MidTower", "550W"),
        ]
    }

    pub fn dataset() -> Dataset {
        let rows = Self::data()
            .into_iter()
            .map(|(config, cpu, board, gpu, case, psu)| strings(&[config, cpu, board, gpu, case, psu]))
            .collect();
        Dataset::new(strings(&Self::headers()), rows).unwrap()
    }
}

/// Configuration ids of every row in `dataset`.
pub fn config_ids(dataset: &Dataset) -> Vec<String> {
    dataset.rows().iter().map(|row| row[0].clone()).collect()
}
