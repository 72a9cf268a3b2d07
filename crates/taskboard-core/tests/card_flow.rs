use std::io;
use std::sync::{
  Arc,
  Mutex
};

use chrono::{
  Duration,
  NaiveDate
};
use taskboard_core::datetime::format_due_date;
use taskboard_core::display::{
  rank_color,
  status_text
};
use taskboard_core::{
  DueTone,
  SaveOutcome,
  TaskCardState
};
use taskboard_shared::{
  TaskDto,
  TaskId,
  TaskRank,
  TaskStatus
};

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
  fn text(&self) -> String {
    let bytes = self
      .0
      .lock()
      .expect("log buffer lock")
      .clone();
    String::from_utf8(bytes)
      .expect("utf8 logs")
  }
}

impl io::Write for CapturedLogs {
  fn write(
    &mut self,
    buf: &[u8]
  ) -> io::Result<usize> {
    self
      .0
      .lock()
      .expect("log buffer lock")
      .extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

fn with_captured_logs<T>(
  f: impl FnOnce() -> T
) -> (T, String) {
  let logs = CapturedLogs::default();
  let writer = logs.clone();
  let subscriber =
    tracing_subscriber::fmt()
      .with_ansi(false)
      .with_max_level(
        tracing::Level::DEBUG
      )
      .with_writer(move || writer.clone())
      .finish();
  let out = tracing::subscriber::with_default(
    subscriber, f
  );
  (out, logs.text())
}

fn today() -> NaiveDate {
  NaiveDate::from_ymd_opt(2026, 10, 16)
    .expect("valid date")
}

fn iso(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

fn task(
  id: u64,
  status: TaskStatus,
  due: NaiveDate
) -> TaskDto {
  TaskDto {
    id: TaskId::Number(id),
    name: format!("task {id}"),
    description: "something to do"
      .to_string(),
    due_date: iso(due),
    rank: TaskRank::High,
    status
  }
}

#[test]
fn todo_due_tomorrow_shows_warning_chip() {
  let card = TaskCardState::new(task(
    1,
    TaskStatus::Todo,
    today() + Duration::days(1)
  ));
  let label = card
    .due_label(today())
    .expect("label for tomorrow");
  assert_eq!(label.text, "Tomorrow");
  assert_eq!(label.tone, DueTone::Warning);
}

#[test]
fn done_task_overdue_shows_no_chip() {
  let card = TaskCardState::new(task(
    2,
    TaskStatus::Done,
    today() - Duration::days(5)
  ));
  assert_eq!(card.due_label(today()), None);
}

#[test]
fn save_success_hands_server_copy_to_board()
{
  let original = task(
    3,
    TaskStatus::Todo,
    today()
  );
  let mut card =
    TaskCardState::new(original.clone());
  card.toggle_expand();
  card.toggle_edit();
  card.set_name("X".to_string());

  let request = card
    .begin_save()
    .expect("save request");
  assert_eq!(request.task_id, TaskId::Number(3));
  assert_eq!(request.patch.name, "X");
  assert_eq!(
    request.patch.due_date,
    original.due_date
  );

  let mut server = original.clone();
  server.name = "X".to_string();
  server.description =
    "normalised by server".to_string();

  let outcome = card.finish_save(
    request.ticket,
    Ok(server.clone())
  );
  assert_eq!(
    outcome,
    SaveOutcome::Updated(server.clone())
  );
  assert!(!card.is_editing());
  assert_eq!(card.task(), &server);
  assert_eq!(
    card.draft().description,
    "normalised by server"
  );
  assert_eq!(card.save_error(), None);
}

#[test]
fn save_failure_is_logged_and_reverts_draft()
{
  let original = task(
    4,
    TaskStatus::InProgress,
    today()
  );
  let mut card =
    TaskCardState::new(original.clone());
  card.toggle_edit();
  card.set_name("X".to_string());
  card.set_rank(TaskRank::Low);

  let (outcome, logs) =
    with_captured_logs(|| {
      let request = card
        .begin_save()
        .expect("save request");
      card.finish_save(
        request.ticket,
        Err(
          "HTTP 503 Service Unavailable"
            .to_string()
        )
      )
    });

  assert!(matches!(
    outcome,
    SaveOutcome::Failed(_)
  ));
  assert!(!card.is_editing());
  assert_eq!(card.task(), &original);
  assert_eq!(card.draft().name, "task 4");
  assert_eq!(card.draft().rank, TaskRank::High);
  assert_eq!(
    card.save_error(),
    Some("HTTP 503 Service Unavailable")
  );
  assert!(logs.contains("ERROR"));
  assert!(logs.contains("error updating task"));
  assert!(logs.contains("HTTP 503"));

  assert!(card.dismiss_error());
  assert_eq!(card.save_error(), None);
}

#[test]
fn toggling_edit_twice_never_requests_a_save()
{
  let original = task(
    5,
    TaskStatus::Todo,
    today()
  );
  let mut card =
    TaskCardState::new(original.clone());
  let (_, logs) = with_captured_logs(|| {
    card.toggle_edit();
    card.set_description(
      "scratch".to_string()
    );
    card.toggle_edit();
  });
  assert!(!card.is_editing());
  assert!(!card.is_saving());
  assert_eq!(card.task(), &original);
  assert!(!logs.contains("saving task"));
  assert!(card.begin_save().is_none());
}

#[test]
fn confirm_delete_yields_id_once() {
  let mut card = TaskCardState::new(task(
    6,
    TaskStatus::Todo,
    today()
  ));
  assert!(card.open_delete());
  assert!(card.is_delete_modal_open());
  assert_eq!(
    card.confirm_delete(),
    Some(TaskId::Number(6))
  );
  assert!(!card.is_delete_modal_open());
  assert_eq!(card.confirm_delete(), None);
}

#[test]
fn cancel_delete_has_no_effect() {
  let original = task(
    7,
    TaskStatus::Todo,
    today()
  );
  let mut card =
    TaskCardState::new(original.clone());
  card.open_delete();
  assert!(card.cancel_delete());
  assert!(!card.is_delete_modal_open());
  assert_eq!(card.confirm_delete(), None);
  assert_eq!(card.task(), &original);
}

#[test]
fn unknown_rank_and_status_fall_back() {
  let mut raw = task(
    8,
    TaskStatus::from("blocked"),
    today()
  );
  raw.rank = TaskRank::from("urgent");
  let card = TaskCardState::new(raw);
  assert_eq!(
    rank_color(&card.task().rank),
    "black"
  );
  assert_eq!(
    status_text(&card.task().status),
    "blocked"
  );
}

#[test]
fn read_mode_date_is_day_and_month() {
  let card = TaskCardState::new(task(
    9,
    TaskStatus::Todo,
    NaiveDate::from_ymd_opt(2026, 1, 5)
      .expect("valid date")
  ));
  assert_eq!(
    format_due_date(&card.task().due_date),
    "05 January"
  );
  assert_eq!(card.task().due_date, "2026-01-05");
}
