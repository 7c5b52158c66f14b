use std::fs;

use alarm_clock::{
    alarm::{Alarm, ALARMS_KEY},
    alert::Silent,
    store::{FileStore, Store},
    AppState,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 15)
        .expect("valid date")
        .and_time(NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time"))
}

fn on_disk(store: &FileStore) -> Vec<Alarm> {
    let json = store.read(ALARMS_KEY).expect("read").expect("alarms written");
    serde_json::from_str(&json).expect("valid json")
}

#[test]
fn alarms_survive_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(dir.path());

    let mut state = AppState::new(store.clone(), Silent);
    let wake = state.add("06:30 AM").expect("add").expect("an id");
    let nap = state.add("14:00").expect("add").expect("an id");
    state.toggle(nap).expect("toggle");
    assert_eq!(on_disk(&store), state.alarms());

    state.tick(at(6, 30));
    let snoozed = state.snooze(at(6, 30)).expect("snooze").expect("an id");
    assert_eq!(on_disk(&store), state.alarms());
    let expected = state.alarms().to_vec();
    drop(state);

    let restarted = AppState::new(FileStore::new(dir.path()), Silent);
    assert_eq!(restarted.alarms(), expected);
    let times: Vec<(u64, &str, bool)> = restarted
        .alarms()
        .iter()
        .map(|a| (a.id, a.time.as_str(), a.enabled))
        .collect();
    assert_eq!(
        times,
        [
            (wake, "06:30 AM", true),
            (nap, "02:00 PM", false),
            (snoozed, "06:35 AM", true),
        ]
    );
}

#[test]
fn corrupt_file_starts_empty_and_is_replaced_on_next_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(dir.path());
    fs::write(store.path_for(ALARMS_KEY), "[{\"id\":").expect("write");

    let mut state = AppState::new(store.clone(), Silent);
    assert!(state.alarms().is_empty());
    state.add("07:00 AM").expect("add");
    assert_eq!(on_disk(&store), state.alarms());
}

#[test]
fn stored_format_is_a_plain_json_array() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(dir.path());
    let mut state = AppState::new(store.clone(), Silent);
    let id = state.add("07:00 AM").expect("add").expect("an id");

    let raw = fs::read_to_string(store.path_for(ALARMS_KEY)).expect("read");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(
        value,
        serde_json::json!([{ "id": id, "time": "07:00 AM", "enabled": true }])
    );
}

#[test]
fn window_and_command_line_share_one_list() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut window = AppState::new(FileStore::new(dir.path()), Silent);
    let mut cli = AppState::new(FileStore::new(dir.path()), Silent);

    let early = window.add("06:00 AM").expect("add").expect("an id");
    let late = cli.add("07:30 AM").expect("add").expect("an id");
    window.toggle(early).expect("toggle");

    let reloaded = AppState::new(FileStore::new(dir.path()), Silent);
    let times: Vec<(u64, &str, bool)> = reloaded
        .alarms()
        .iter()
        .map(|a| (a.id, a.time.as_str(), a.enabled))
        .collect();
    assert_eq!(times, [(early, "06:00 AM", false), (late, "07:30 AM", true)]);

    assert_eq!(window.tick(at(7, 30)), Some(late));
}
