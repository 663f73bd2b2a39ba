use chrono::{NaiveDate, Utc};
use federwi_core::{
    CalendarService, Event, LocalStore, Note, NoteService, ServiceError,
};

fn note_service() -> (tempfile::TempDir, NoteService<LocalStore<Note>>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = LocalStore::new(dir.path());
    (dir, NoteService::new(store))
}

fn calendar_service() -> (tempfile::TempDir, CalendarService<LocalStore<Event>>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = LocalStore::new(dir.path());
    (dir, CalendarService::new(store))
}

fn at(date: NaiveDate, hour: u32) -> chrono::DateTime<Utc> {
    date.and_hms_opt(hour, 0, 0).expect("valid time").and_utc()
}

#[test]
fn note_search_is_case_insensitive_over_title_and_content() {
    let (_dir, notes) = note_service();
    notes.create_note(Note::new("Groceries", "milk, eggs")).unwrap();
    notes.create_note(Note::new("gym", "Leg day + EGGS benedict recipe")).unwrap();
    notes.create_note(Note::new("misc", "nothing relevant")).unwrap();

    let hits = notes.search_notes("EgGs").unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn notes_for_task_match_the_related_id_only() {
    let (_dir, notes) = note_service();
    let task_id = uuid::Uuid::new_v4();

    notes
        .create_note(Note::for_task(task_id, "attached", "details"))
        .unwrap();
    notes.create_note(Note::new("floating", "daily journal")).unwrap();

    let related = notes.notes_for_task(task_id).unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].title, "attached");
}

#[test]
fn empty_note_content_is_rejected() {
    let (_dir, notes) = note_service();
    let err = notes
        .create_note(Note::new("hollow", "  "))
        .expect_err("empty content must be rejected");
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(notes.all_notes().unwrap().is_empty());
}

#[test]
fn event_range_query_uses_overlap_semantics() {
    let (_dir, calendar) = calendar_service();
    let day = NaiveDate::from_ymd_opt(2024, 5, 10).expect("valid date");

    // Starts inside the range.
    calendar
        .create_event(Event::new("starts inside", at(day, 22), at(day, 23) + chrono::Duration::hours(2)))
        .unwrap();
    // Ends inside the range.
    calendar
        .create_event(Event::new("ends inside", at(day, 0) - chrono::Duration::hours(3), at(day, 1)))
        .unwrap();
    // Spans the range entirely.
    calendar
        .create_event(Event::new(
            "spans",
            at(day, 0) - chrono::Duration::days(1),
            at(day, 23) + chrono::Duration::days(1),
        ))
        .unwrap();
    // Entirely outside.
    calendar
        .create_event(Event::new(
            "outside",
            at(day, 0) + chrono::Duration::days(3),
            at(day, 1) + chrono::Duration::days(3),
        ))
        .unwrap();

    let hits = calendar.events_for_day(day).unwrap();
    let titles: Vec<&str> = hits.iter().map(|event| event.title.as_str()).collect();
    assert_eq!(titles, vec!["starts inside", "ends inside", "spans"]);
}

#[test]
fn event_with_end_before_start_is_rejected() {
    let (_dir, calendar) = calendar_service();
    let day = NaiveDate::from_ymd_opt(2024, 5, 10).expect("valid date");

    let err = calendar
        .create_event(Event::new("backwards", at(day, 10), at(day, 9)))
        .expect_err("end before start must be rejected");
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(calendar.all_events().unwrap().is_empty());
}
