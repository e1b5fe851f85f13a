#![no_main]

use libfuzzer_sys::fuzz_target;
use outcrop_polyline_mapper::{parse_polyline_summary, write_polyline_summary, PolylineStore};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(records) = parse_polyline_summary(text) else {
        return;
    };

    // Geparste Records sind nie degeneriert und müssen vom Store angenommen werden
    let mut store = PolylineStore::new();
    let ids = store
        .replace_all_records(records)
        .expect("Parser liefert nur Folgen mit mindestens zwei Punkten");
    assert_eq!(ids.len(), store.len());

    // Was der Store ausgibt, muss wieder lesbar sein
    let exported = store.records();
    let json = write_polyline_summary(&exported).expect("Serialisierung sollte klappen");
    let reparsed = parse_polyline_summary(&json).expect("Eigene Ausgabe sollte parsebar sein");
    assert_eq!(reparsed.len(), exported.len());
});
