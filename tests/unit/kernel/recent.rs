use super::*;

fn dir(n: usize) -> ResourceUri {
    ResourceUri::new(format!("file:///dir{}", n))
}

#[test]
fn open_puts_directory_first() {
    let mut recent = RecentDirectories::default();
    recent.open(dir(1));
    recent.open(dir(2));

    assert_eq!(recent.to_vec(), vec![dir(2), dir(1)]);
    assert_eq!(recent.capacity(), 20);
}

#[test]
fn reopening_moves_entry_and_reports_it() {
    let mut recent = RecentDirectories::default();
    let mut rx = recent.subscribe();
    recent.open(dir(1));
    recent.open(dir(2));

    let event = recent.open(dir(1)).unwrap();

    assert_eq!(event.replaced, Some(dir(1)));
    assert_eq!(recent.to_vec(), vec![dir(1), dir(2)]);
    assert_eq!(rx.drain().len(), 3);
}

#[test]
fn reopening_first_entry_is_silent() {
    let mut recent = RecentDirectories::default();
    recent.open(dir(1));
    let mut rx = recent.subscribe();

    assert_eq!(recent.open(dir(1)), None);
    assert!(rx.drain().is_empty());
}

#[test]
fn overflow_evicts_oldest() {
    let mut recent = RecentDirectories::new(3);
    for n in 0..3 {
        assert_eq!(recent.open(dir(n)).unwrap().replaced, None);
    }

    let event = recent.open(dir(3)).unwrap();

    assert_eq!(event.replaced, Some(dir(0)));
    assert_eq!(recent.to_vec(), vec![dir(3), dir(2), dir(1)]);
}

#[test]
fn remove_and_clear() {
    let mut recent = RecentDirectories::default();
    recent.open(dir(1));
    recent.open(dir(2));

    assert!(recent.remove(&dir(1)));
    assert!(!recent.remove(&dir(1)));
    assert!(!recent.contains(&dir(1)));

    recent.clear();
    assert!(recent.is_empty());
}

#[test]
fn from_entries_drops_duplicates_and_overflow() {
    let recent = RecentDirectories::from_entries(2, vec![dir(1), dir(1), dir(2), dir(3)]);
    assert_eq!(recent.iter().cloned().collect::<Vec<_>>(), vec![dir(1), dir(2)]);
}
