//! Tests for the once-initialised ride repository

use super::{SCENARIO_CSV, scenario_dataset, write_csv};
use crate::app::services::ride_loader::RideRepository;
use std::fs;
use std::sync::Arc;
use std::thread;

#[test]
fn test_dataset_is_loaded_lazily() {
    let (_temp_dir, path) = write_csv(SCENARIO_CSV);
    let repository = RideRepository::new(&path);

    assert!(!repository.is_loaded());
    assert_eq!(repository.source(), path.as_path());

    let dataset = repository.dataset().unwrap();
    assert_eq!(dataset.len(), 3);
    assert!(repository.is_loaded());
}

#[test]
fn test_dataset_is_loaded_once() {
    let (_temp_dir, path) = write_csv(SCENARIO_CSV);
    let repository = RideRepository::new(&path);

    let first = repository.dataset().unwrap();

    // Later accesses must not touch the file again
    fs::remove_file(&path).unwrap();
    let second = repository.dataset().unwrap();

    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_failed_load_is_reported() {
    let repository = RideRepository::new("/nonexistent/ola_rides.csv");

    let error = repository.dataset().unwrap_err();
    assert!(error.is_load_failure());
    assert!(!repository.is_loaded());
}

#[test]
fn test_from_dataset_skips_loading() {
    let repository = RideRepository::from_dataset(scenario_dataset());

    assert!(repository.is_loaded());
    assert_eq!(repository.dataset().unwrap(), &scenario_dataset());
}

#[test]
fn test_concurrent_first_access_shares_one_dataset() {
    let (_temp_dir, path) = write_csv(SCENARIO_CSV);
    let repository = Arc::new(RideRepository::new(&path));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repository = Arc::clone(&repository);
            thread::spawn(move || {
                let dataset = repository.dataset().unwrap();
                dataset as *const _ as usize
            })
        })
        .collect();

    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
}
