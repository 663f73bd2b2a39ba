use chrono::NaiveDate;
use federwi_core::{
    AppContext, Category, CompletionStatus, Event, LocalStore, Note, Task,
};
use tempfile::TempDir;

type LocalContext =
    AppContext<LocalStore<Task>, LocalStore<Note>, LocalStore<Event>>;

fn context() -> (TempDir, LocalContext) {
    let dir = tempfile::tempdir().expect("temp dir");
    let context = AppContext::new(
        LocalStore::new(dir.path()),
        LocalStore::new(dir.path()),
        LocalStore::new(dir.path()),
    );
    (dir, context)
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn task_on(title: &str, date: NaiveDate, category: Category) -> Task {
    let mut task = Task::new(title, category);
    let bucket = date.and_hms_opt(8, 0, 0).expect("valid time").and_utc();
    task.original_date = bucket;
    task.current_date = bucket;
    task
}

#[test]
fn view_partitions_tasks_into_category_buckets() {
    let (_dir, ctx) = context();
    let saturday = day(2024, 1, 6);

    ctx.todos
        .create_todo(task_on("errand", saturday, Category::ShortTerm))
        .unwrap();
    ctx.todos
        .create_todo(task_on("project", saturday, Category::MediumTerm))
        .unwrap();
    ctx.todos
        .create_todo(task_on("vision", saturday, Category::LongTerm))
        .unwrap();
    // Different day, must not appear.
    ctx.todos
        .create_todo(task_on("later", day(2024, 1, 7), Category::ShortTerm))
        .unwrap();

    let view = ctx.daily_view(saturday).unwrap();
    assert_eq!(view.tasks.short_term.len(), 1);
    assert_eq!(view.tasks.medium_term.len(), 1);
    assert_eq!(view.tasks.long_term.len(), 1);
    assert!(view.completed_tasks.is_empty());
}

#[test]
fn completed_tasks_are_the_complete_subset() {
    let (_dir, ctx) = context();
    let monday = day(2024, 1, 8);

    let open = ctx
        .todos
        .create_todo(task_on("open", monday, Category::ShortTerm))
        .unwrap();
    let done = ctx
        .todos
        .create_todo(task_on("done", monday, Category::ShortTerm))
        .unwrap();
    ctx.todos
        .update_task_status(done.id, CompletionStatus::Complete)
        .unwrap();

    let view = ctx.daily_view(monday).unwrap();
    assert_eq!(view.tasks.short_term.len(), 2);
    assert_eq!(view.completed_tasks.len(), 1);
    assert_eq!(view.completed_tasks[0].id, done.id);
    assert_ne!(view.completed_tasks[0].id, open.id);
}

#[test]
fn weekend_flag_follows_the_weekday() {
    let (_dir, ctx) = context();

    assert!(ctx.daily_view(day(2024, 1, 6)).unwrap().is_weekend); // Saturday
    assert!(ctx.daily_view(day(2024, 1, 7)).unwrap().is_weekend); // Sunday
    assert!(!ctx.daily_view(day(2024, 1, 8)).unwrap().is_weekend); // Monday
}

#[test]
fn view_includes_notes_and_events_for_the_day() {
    let (_dir, ctx) = context();
    let target = day(2024, 2, 14);

    let mut note = Note::new("reminder", "buy flowers");
    note.date = target.and_hms_opt(7, 0, 0).expect("valid time").and_utc();
    ctx.notes.create_note(note).unwrap();

    let mut other_note = Note::new("unrelated", "next week");
    other_note.date = day(2024, 2, 21).and_hms_opt(7, 0, 0).unwrap().and_utc();
    ctx.notes.create_note(other_note).unwrap();

    let start = target.and_hms_opt(18, 0, 0).unwrap().and_utc();
    let end = target.and_hms_opt(20, 0, 0).unwrap().and_utc();
    ctx.calendar
        .create_event(Event::new("dinner", start, end))
        .unwrap();

    // Spans the whole day, still counts.
    let spanning_start = day(2024, 2, 13).and_hms_opt(12, 0, 0).unwrap().and_utc();
    let spanning_end = day(2024, 2, 15).and_hms_opt(12, 0, 0).unwrap().and_utc();
    ctx.calendar
        .create_event(Event::new("conference", spanning_start, spanning_end))
        .unwrap();

    let view = ctx.daily_view(target).unwrap();
    assert_eq!(view.notes.len(), 1);
    assert_eq!(view.notes[0].title, "reminder");
    assert_eq!(view.calendar_events.len(), 2);
}

#[test]
fn rollover_to_next_day_returns_the_updated_next_view() {
    let (_dir, ctx) = context();
    let today = day(2024, 3, 1);

    ctx.todos
        .create_todo(task_on("unfinished", today, Category::ShortTerm))
        .unwrap();

    let next_view = ctx.daily_views().rollover_to_next_day(today).unwrap();
    assert_eq!(next_view.date, day(2024, 3, 2));
    assert_eq!(next_view.tasks.short_term.len(), 1);
    assert_eq!(next_view.tasks.short_term[0].title, "unfinished");
    assert!(!next_view.tasks.short_term[0].is_rolled_over);

    // Today's original is still there, flagged.
    let today_view = ctx.daily_view(today).unwrap();
    assert_eq!(today_view.tasks.short_term.len(), 1);
    assert!(today_view.tasks.short_term[0].is_rolled_over);
}
