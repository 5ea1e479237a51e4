use super::*;

unsafe extern "C" fn initialise_ok() -> bool {
    true
}

#[test]
fn test_empty_table_reports_every_entry() {
    let table = HvrFunctionTable::empty();
    let missing = table.missing_entries();

    assert_eq!(table.abi_version, HVR_ABI_VERSION);
    assert_eq!(missing.first(), Some(&"initialise"));
    assert_eq!(missing.last(), Some(&"stats_per_call"));
    assert_eq!(missing.len(), 43);
}

#[test]
fn test_filled_entry_is_not_missing() {
    let table = HvrFunctionTable {
        initialise: Some(initialise_ok),
        ..HvrFunctionTable::empty()
    };

    assert!(!table.missing_entries().contains(&"initialise"));
    assert_eq!(table.missing_entries().len(), 42);
}

#[test]
fn test_table_is_pointer_sized_entries() {
    // abi_version plus padding, then one pointer per entry
    let pointer = std::mem::size_of::<usize>();
    let header = std::mem::size_of::<u32>().max(std::mem::align_of::<usize>());
    assert_eq!(std::mem::size_of::<HvrFunctionTable>(), header + 43 * pointer);
}
