/// Native call tracing - per-entry call counters with a colored report
///
/// Only compiled with the `native-call-trace` feature. Counters are global
/// so every `FfiNativeRenderer` in the process feeds the same report.

use colored::*;
use rustc_hash::FxHashMap;
use std::sync::Mutex;

/// Global call counters, keyed by table entry name
static CALL_STATS: Mutex<Option<FxHashMap<&'static str, u64>>> = Mutex::new(None);

pub(crate) fn record_call(name: &'static str) {
    if let Ok(mut guard) = CALL_STATS.lock() {
        *guard.get_or_insert_with(FxHashMap::default).entry(name).or_insert(0) += 1;
    }
}

/// Call counts sorted by count (descending), then name
pub fn get_call_stats() -> Vec<(&'static str, u64)> {
    let Ok(guard) = CALL_STATS.lock() else {
        return Vec::new();
    };

    let mut stats: Vec<(&'static str, u64)> = guard
        .as_ref()
        .map(|map| map.iter().map(|(name, count)| (*name, *count)).collect())
        .unwrap_or_default();
    stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    stats
}

pub fn reset_call_stats() {
    if let Ok(mut guard) = CALL_STATS.lock() {
        *guard = None;
    }
}

/// Print native call statistics report
pub fn print_call_stats_report() {
    let stats = get_call_stats();

    if stats.is_empty() {
        println!("\n{}", "✓ No native calls recorded".green().bold());
        return;
    }

    println!("\n{}", "=== Native Call Report ===".bright_blue().bold());

    for (name, count) in &stats {
        println!("  {:<28} {}", name.cyan(), count);
    }

    let total: u64 = stats.iter().map(|(_, count)| count).sum();
    println!("  {:<28} {}", "Total:".white().bold(), total);

    println!("{}\n", "==========================".bright_blue().bold());
}
