use super::*;

#[test]
fn test_empty_statistic_reports_zero() {
    let stat = Statistic::new();
    assert_eq!(stat.min(), 0.0);
    assert_eq!(stat.max(), 0.0);
    assert_eq!(stat.avg(), 0.0);
    assert_eq!(stat.samples(), 0);
}

#[test]
fn test_accumulate_tracks_min_max_avg() {
    let mut stat = Statistic::default();
    stat.accumulate(2.0);
    stat.accumulate(4.0);
    stat.accumulate(6.0);

    assert_eq!(stat.min(), 2.0);
    assert_eq!(stat.max(), 6.0);
    assert!((stat.avg() - 4.0).abs() < 1e-6);
    assert_eq!(stat.samples(), 3);
}

#[test]
fn test_constant_value_across_block_boundary() {
    let mut stat = Statistic::new();
    for _ in 0..31 {
        stat.accumulate(0.25);
    }

    // 31st call restarted the block
    assert_eq!(stat.samples(), 1);
    assert_eq!(stat.avg(), 0.25);
    assert_eq!(stat.min(), 0.25);
    assert_eq!(stat.max(), 0.25);
}

#[test]
fn test_new_block_forgets_previous_extremes() {
    let mut stat = Statistic::new();
    stat.accumulate(100.0);
    for _ in 1..SAMPLES_PER_BLOCK {
        stat.accumulate(1.0);
    }
    assert_eq!(stat.max(), 100.0);
    assert_eq!(stat.samples(), SAMPLES_PER_BLOCK);

    stat.accumulate(3.0);
    assert_eq!(stat.max(), 3.0);
    assert_eq!(stat.min(), 3.0);
    assert_eq!(stat.avg(), 3.0);
}
