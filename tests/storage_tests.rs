use bytes::Bytes;
use geotrie::{DB, Geohash, GeotrieError, MemoryBackend, StorageBackend};

const PLACES: [(&str, &str); 5] = [
    ("3e4mbr3q2w39", "Chile - Easter Island, Anakena Beach"),
    ("sr2y7kh9bbfk", "Italy - Vatican, Saint Peter's Basilica"),
    ("ucfv0j9vp0xz", "Moscow - Red Square, Lenin's Mausoleum"),
    ("r3gx2ux9dg0p", "Sydney - Opera House"),
    ("9g3w81t7mqpx", "Mexico - CDMX Zocalo"),
];

const REGION: [&str; 9] = [
    "9", "9e", "9ew", "9ewm", "9ewmq", "9b", "9bn", "9bnr", "9bnrt",
];

fn hash(s: &str) -> Geohash {
    Geohash::parse(s).unwrap()
}

fn exercise_backend<B: StorageBackend>(backend: &mut B) {
    for (geohash, place) in PLACES {
        backend
            .set(&hash(geohash), Bytes::copy_from_slice(place.as_bytes()))
            .unwrap();
    }
    for (geohash, place) in PLACES {
        assert_eq!(backend.get(&hash(geohash)).unwrap().unwrap(), place);
    }
    assert!(backend.get(&hash("9g3w81t7mqpz")).unwrap().is_none());

    for geohash in REGION {
        backend
            .set(&hash(geohash), Bytes::copy_from_slice(geohash.as_bytes()))
            .unwrap();
    }

    let scan = backend.scan_prefix(&hash("9")).unwrap();
    // The region plus the Mexico City landmark.
    assert_eq!(scan.len(), REGION.len() + 1);
    for (key, value) in &scan {
        assert!(key.starts_with('9'));
        if key.len() < 12 {
            assert_eq!(value, key.as_str());
        }
    }

    let keys: Vec<_> = backend
        .scan_prefix(&hash("9b"))
        .unwrap()
        .into_keys()
        .collect();
    assert_eq!(keys, vec!["9b", "9bn", "9bnr", "9bnrt"]);

    assert!(backend.scan_prefix(&hash("9q")).unwrap().is_empty());
    assert_eq!(backend.len().unwrap(), PLACES.len() + REGION.len());
}

#[test]
fn test_memory_backend_conformance() {
    let mut backend = MemoryBackend::new();
    exercise_backend(&mut backend);
    backend.close().unwrap();
    assert!(matches!(backend.len(), Err(GeotrieError::BackendClosed)));
}

#[cfg(feature = "snapshot")]
#[test]
fn test_file_backend_conformance_and_reopen() {
    use geotrie::FileBackend;

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("places.db");

    let mut backend = FileBackend::new(&path);
    assert!(matches!(
        backend.get(&hash("9")),
        Err(GeotrieError::BackendClosed)
    ));
    backend.open().unwrap();
    exercise_backend(&mut backend);
    backend.close().unwrap();

    let mut reopened = FileBackend::new(&path);
    reopened.open().unwrap();
    assert_eq!(reopened.len().unwrap(), PLACES.len() + REGION.len());
    assert_eq!(
        reopened.get(&hash("r3gx2ux9dg0p")).unwrap().unwrap(),
        "Sydney - Opera House"
    );
    reopened.close().unwrap();
}

#[cfg(feature = "snapshot")]
#[test]
fn test_file_backend_open_fails_for_missing_directory() {
    use geotrie::FileBackend;

    let dir = tempfile::TempDir::new().unwrap();
    let mut backend = FileBackend::new(dir.path().join("no_such_dir").join("x.db"));
    assert!(matches!(backend.open(), Err(GeotrieError::Io(_))));
}

/// The trie store and an ordered backend agree on prefix enumeration.
#[test]
fn test_trie_matches_ordered_backend() {
    let db = DB::memory().unwrap();
    let mut backend = MemoryBackend::new();

    for (geohash, place) in PLACES {
        db.set(geohash, "place", place).unwrap();
        backend
            .set(&hash(geohash), Bytes::copy_from_slice(place.as_bytes()))
            .unwrap();
    }
    for geohash in REGION {
        db.set(geohash, "place", geohash).unwrap();
        backend
            .set(&hash(geohash), Bytes::copy_from_slice(geohash.as_bytes()))
            .unwrap();
    }

    for prefix in ["9", "9e", "9bn", "s", "r3g"] {
        let from_trie = db.get_all_children(prefix).unwrap();
        let from_backend: Vec<String> = backend.scan_prefix(&hash(prefix)).unwrap().into_keys().collect();
        // Pre-order by alphabet index is lexicographic order.
        assert_eq!(from_trie, from_backend, "prefix {}", prefix);
    }
}
