//! Merge and classification behaviour over small generated record sets

use chrono::NaiveDate;
use inspekt_domain::model::{UrgencyTier, VehicleRecord};
use inspekt_domain::service::{classify, merge_records};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `count` distinct vehicles; every `gap`th one has no due date
fn fleet(prefix: &str, count: usize, gap: usize) -> Vec<VehicleRecord> {
    (0..count)
        .map(|i| {
            let record = VehicleRecord::new()
                .with("rnr", format!("{}-{}", prefix, i))
                .with("gruppe", (i % 4) as i64);
            if gap > 0 && i % gap == 0 {
                record
            } else {
                record.with("hu", format!("2024-{:02}-01", i % 12 + 1))
            }
        })
        .collect()
}

#[test]
fn merged_length_is_inputs_minus_undated() {
    for (local_n, remote_n, gap) in [(0, 0, 0), (5, 0, 2), (0, 7, 3), (10, 10, 4), (13, 6, 0)] {
        let local = fleet("L", local_n, gap);
        let remote = fleet("R", remote_n, gap);
        let undated = local
            .iter()
            .chain(remote.iter())
            .filter(|r| !r.contains("hu"))
            .count();

        let merged = merge_records(local, remote);
        assert_eq!(merged.len(), local_n + remote_n - undated);
        assert!(merged.records().iter().all(|r| r.contains("hu")));
    }
}

#[test]
fn remerge_with_empty_remote_is_stable() {
    let mut local = fleet("L", 9, 3);
    local.extend(fleet("L", 4, 3));
    let first = merge_records(local, fleet("R", 8, 5));
    let second = merge_records(first.records().to_vec(), Vec::new());
    assert_eq!(first.records(), second.records());
}

#[test]
fn merged_groups_are_ascending() {
    let merged = merge_records(fleet("L", 11, 0), fleet("R", 9, 0));
    let groups: Vec<i64> = merged
        .records()
        .iter()
        .filter_map(|r| r.get("gruppe").and_then(|v| v.as_i64()))
        .collect();
    assert!(groups.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn classification_ignores_day_of_month() {
    let target = date(2024, 6, 1);
    assert_eq!(classify(date(2024, 6, 15), target), UrgencyTier::Critical);
    assert_eq!(
        classify(date(2024, 6, 15), target),
        classify(date(2024, 6, 30), target)
    );
}

#[test]
fn reference_tiers_for_february_2024() {
    let now = date(2024, 2, 1);
    let tiers: Vec<UrgencyTier> = [
        date(2024, 1, 1),
        date(2023, 2, 1),
        date(2023, 1, 1),
        date(2020, 1, 1),
    ]
    .into_iter()
    .map(|hu| classify(now, hu))
    .collect();
    assert_eq!(
        tiers,
        vec![
            UrgencyTier::Critical,
            UrgencyTier::Warning,
            UrgencyTier::Normal,
            UrgencyTier::Normal
        ]
    );
}
