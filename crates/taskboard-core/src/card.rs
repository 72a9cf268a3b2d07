use std::fmt;

use chrono::NaiveDate;
use taskboard_shared::{
  DragPayload,
  TaskDto,
  TaskId,
  TaskPatch,
  TaskRank,
  TaskStatus
};
use tracing::{
  debug,
  error,
  info,
  warn
};
use uuid::Uuid;

use crate::datetime::{
  DueLabel,
  due_label
};

/// Identifies one save request so a late
/// completion can be told apart from the
/// one currently awaited.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash,
)]
pub struct SaveTicket(Uuid);

impl SaveTicket {
  fn new() -> Self {
    Self(Uuid::new_v4())
  }
}

impl fmt::Display for SaveTicket {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
  pub ticket:  SaveTicket,
  pub task_id: TaskId,
  pub patch:   TaskPatch
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
  /// Server copy, to hand to the board.
  Updated(TaskDto),
  Failed(String),
  /// Completion for a ticket that is no
  /// longer awaited; nothing changed.
  Stale
}

/// Unsaved copy of the editable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
  pub name:        String,
  pub description: String,
  pub due_date:    String,
  pub rank:        TaskRank,
  pub status:      TaskStatus
}

impl Draft {
  pub fn from_task(task: &TaskDto) -> Self {
    Self {
      name:        task.name.clone(),
      description: task.description.clone(),
      due_date:    task.due_date.clone(),
      rank:        task.rank.clone(),
      status:      task.status.clone()
    }
  }

  pub fn to_patch(&self) -> TaskPatch {
    TaskPatch {
      name:        self.name.clone(),
      description: self.description.clone(),
      due_date:    self.due_date.clone(),
      rank:        self.rank.clone(),
      status:      self.status.clone()
    }
  }
}

/// Everything one card remembers between
/// renders. Mutators return whether
/// anything changed so the view knows
/// when to re-render.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCardState {
  task:              TaskDto,
  draft:             Draft,
  expanded:          bool,
  editing:           bool,
  delete_modal_open: bool,
  saving:            Option<SaveTicket>,
  save_error:        Option<String>
}

impl TaskCardState {
  pub fn new(task: TaskDto) -> Self {
    let draft = Draft::from_task(&task);
    Self {
      task,
      draft,
      expanded: false,
      editing: false,
      delete_modal_open: false,
      saving: None,
      save_error: None
    }
  }

  pub fn task(&self) -> &TaskDto {
    &self.task
  }

  pub fn draft(&self) -> &Draft {
    &self.draft
  }

  pub fn is_expanded(&self) -> bool {
    self.expanded
  }

  pub fn is_editing(&self) -> bool {
    self.editing
  }

  pub fn is_saving(&self) -> bool {
    self.saving.is_some()
  }

  pub fn is_delete_modal_open(
    &self
  ) -> bool {
    self.delete_modal_open
  }

  pub fn save_error(&self) -> Option<&str> {
    self.save_error.as_deref()
  }

  /// Collapse is refused while editing so
  /// the action bar stays reachable.
  pub fn toggle_expand(&mut self) -> bool {
    if self.editing {
      debug!(task = %self.task.id, "ignoring expand toggle while editing");
      return false;
    }
    self.expanded = !self.expanded;
    debug!(task = %self.task.id, expanded = self.expanded, "toggled expand");
    true
  }

  /// Enters edit mode, or leaves it
  /// discarding the draft. Never saves.
  pub fn toggle_edit(&mut self) -> bool {
    if self.editing {
      self.cancel_edit()
    } else {
      self.start_edit()
    }
  }

  pub fn start_edit(&mut self) -> bool {
    if self.editing {
      return false;
    }
    self.draft = Draft::from_task(&self.task);
    self.editing = true;
    self.expanded = true;
    self.save_error = None;
    debug!(task = %self.task.id, "started editing");
    true
  }

  pub fn cancel_edit(&mut self) -> bool {
    if !self.editing {
      return false;
    }
    if self.saving.is_some() {
      warn!(task = %self.task.id, "cannot cancel while a save is in flight");
      return false;
    }
    self.draft = Draft::from_task(&self.task);
    self.editing = false;
    debug!(task = %self.task.id, "discarded draft");
    true
  }

  fn edit_draft(
    &mut self,
    field: &str,
    apply: impl FnOnce(&mut Draft)
  ) -> bool {
    if !self.editing {
      warn!(task = %self.task.id, field, "ignoring draft change outside edit mode");
      return false;
    }
    apply(&mut self.draft);
    true
  }

  pub fn set_name(
    &mut self,
    name: String
  ) -> bool {
    self.edit_draft("name", |d| d.name = name)
  }

  pub fn set_description(
    &mut self,
    description: String
  ) -> bool {
    self.edit_draft("description", |d| {
      d.description = description
    })
  }

  pub fn set_due_date(
    &mut self,
    due_date: String
  ) -> bool {
    self.edit_draft("due_date", |d| {
      d.due_date = due_date
    })
  }

  pub fn set_rank(
    &mut self,
    rank: TaskRank
  ) -> bool {
    self.edit_draft("rank", |d| d.rank = rank)
  }

  pub fn set_status(
    &mut self,
    status: TaskStatus
  ) -> bool {
    self.edit_draft("status", |d| {
      d.status = status
    })
  }

  /// Issues a request for the current
  /// draft. `None` outside edit mode or
  /// while another save is awaited.
  pub fn begin_save(
    &mut self
  ) -> Option<SaveRequest> {
    if !self.editing {
      debug!(task = %self.task.id, "save requested outside edit mode");
      return None;
    }
    if let Some(ticket) = self.saving {
      warn!(task = %self.task.id, %ticket, "save already in flight");
      return None;
    }
    let ticket = SaveTicket::new();
    self.saving = Some(ticket);
    self.save_error = None;
    info!(task = %self.task.id, %ticket, "saving task");
    Some(SaveRequest {
      ticket,
      task_id: self.task.id.clone(),
      patch: self.draft.to_patch()
    })
  }

  /// Applies the result of `update_task`.
  /// Edit mode ends either way; on failure
  /// the draft returns to the last known
  /// task and the error is kept for the
  /// view.
  pub fn finish_save(
    &mut self,
    ticket: SaveTicket,
    result: Result<TaskDto, String>
  ) -> SaveOutcome {
    if self.saving != Some(ticket) {
      warn!(task = %self.task.id, %ticket, "dropping stale save completion");
      return SaveOutcome::Stale;
    }
    self.saving = None;
    self.editing = false;

    match result {
      | Ok(updated) => {
        info!(task = %updated.id, %ticket, "task saved");
        self.draft = Draft::from_task(&updated);
        self.task = updated.clone();
        self.save_error = None;
        SaveOutcome::Updated(updated)
      }
      | Err(err) => {
        error!(task = %self.task.id, %ticket, error = %err, "error updating task");
        self.draft = Draft::from_task(&self.task);
        self.save_error = Some(err.clone());
        SaveOutcome::Failed(err)
      }
    }
  }

  pub fn dismiss_error(&mut self) -> bool {
    self.save_error.take().is_some()
  }

  pub fn open_delete(&mut self) -> bool {
    if self.delete_modal_open {
      return false;
    }
    self.delete_modal_open = true;
    true
  }

  /// Closes the modal and yields the id to
  /// delete, once per opening.
  pub fn confirm_delete(
    &mut self
  ) -> Option<TaskId> {
    if !self.delete_modal_open {
      warn!(task = %self.task.id, "delete confirmed without an open modal");
      return None;
    }
    self.delete_modal_open = false;
    info!(task = %self.task.id, "delete confirmed");
    Some(self.task.id.clone())
  }

  pub fn cancel_delete(&mut self) -> bool {
    let was_open = self.delete_modal_open;
    self.delete_modal_open = false;
    was_open
  }

  /// Takes a fresh copy of the task from
  /// the board. The draft follows unless
  /// the user is mid-edit.
  pub fn sync_task(
    &mut self,
    task: TaskDto
  ) -> bool {
    if self.task == task {
      return false;
    }
    if !self.editing {
      self.draft = Draft::from_task(&task);
    } else {
      debug!(task = %task.id, "task changed upstream while editing; keeping draft");
    }
    self.task = task;
    true
  }

  /// Label for the draft due date, hidden
  /// when the draft status is done.
  pub fn due_label(
    &self,
    today: NaiveDate
  ) -> Option<DueLabel> {
    due_label(
      &self.draft.due_date,
      &self.draft.status,
      today
    )
  }

  /// Edit mode turns dragging off so the
  /// inputs keep normal text selection.
  pub fn is_draggable(&self) -> bool {
    !self.editing
  }

  pub fn drag_payload(&self) -> DragPayload {
    DragPayload::from(&self.task)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> TaskDto {
    TaskDto {
      id:          TaskId::Number(1),
      name:        "Plan sprint".into(),
      description: "backlog grooming".into(),
      due_date:    "2026-10-17".into(),
      rank:        TaskRank::Medium,
      status:      TaskStatus::Todo
    }
  }

  #[test]
  fn expand_is_locked_while_editing() {
    let mut card = TaskCardState::new(sample());
    assert!(card.toggle_expand());
    assert!(card.is_expanded());
    assert!(card.toggle_edit());
    assert!(!card.toggle_expand());
    assert!(card.is_expanded());
  }

  #[test]
  fn editing_forces_expanded() {
    let mut card = TaskCardState::new(sample());
    assert!(!card.is_expanded());
    card.start_edit();
    assert!(card.is_expanded());
  }

  #[test]
  fn toggling_edit_off_discards_the_draft() {
    let mut card = TaskCardState::new(sample());
    card.toggle_edit();
    card.set_name("Renamed".into());
    card.toggle_edit();
    assert!(!card.is_editing());
    assert_eq!(card.draft().name, "Plan sprint");
    assert_eq!(card.task(), &sample());
  }

  #[test]
  fn draft_changes_need_edit_mode() {
    let mut card = TaskCardState::new(sample());
    assert!(!card.set_rank(TaskRank::High));
    assert!(!card.set_status(TaskStatus::Done));
    assert_eq!(card.draft().rank, TaskRank::Medium);

    card.start_edit();
    assert!(card.set_rank(TaskRank::High));
    assert!(card.set_status(TaskStatus::Done));
    assert_eq!(card.draft().rank, TaskRank::High);
    assert_eq!(card.task().rank, TaskRank::Medium);
  }

  #[test]
  fn second_save_is_ignored_while_in_flight() {
    let mut card = TaskCardState::new(sample());
    card.start_edit();
    let first = card.begin_save().expect("request");
    assert!(card.begin_save().is_none());
    assert!(card.is_saving());
    assert!(!card.cancel_edit());

    assert!(matches!(
      card.finish_save(first.ticket, Ok(sample())),
      SaveOutcome::Updated(_)
    ));
    assert!(!card.is_saving());
  }

  #[test]
  fn stale_completion_changes_nothing() {
    let mut card = TaskCardState::new(sample());
    card.start_edit();
    let request = card.begin_save().expect("request");
    let before = card.clone();
    assert_eq!(
      card.finish_save(
        SaveTicket::new(),
        Err("late".into())
      ),
      SaveOutcome::Stale
    );
    assert_eq!(card, before);
    assert!(matches!(
      card.finish_save(
        request.ticket,
        Ok(sample())
      ),
      SaveOutcome::Updated(_)
    ));
  }

  #[test]
  fn sync_keeps_draft_while_editing() {
    let mut card = TaskCardState::new(sample());
    let mut upstream = sample();
    upstream.description = "changed".into();

    assert!(card.sync_task(upstream.clone()));
    assert_eq!(card.draft().description, "changed");

    card.start_edit();
    card.set_description("mine".into());
    let mut again = upstream.clone();
    again.description = "changed twice".into();
    assert!(card.sync_task(again));
    assert_eq!(card.draft().description, "mine");
    assert!(!card.sync_task(card.task().clone()));
  }

  #[test]
  fn label_follows_the_draft() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 16)
      .expect("date");
    let mut card = TaskCardState::new(sample());
    assert_eq!(
      card
        .due_label(today)
        .map(|l| l.text)
        .as_deref(),
      Some("Tomorrow")
    );
    card.start_edit();
    card.set_status(TaskStatus::Done);
    assert_eq!(card.due_label(today), None);
  }

  #[test]
  fn drag_payload_uses_saved_status() {
    let mut card = TaskCardState::new(sample());
    card.start_edit();
    card.set_status(TaskStatus::Done);
    let payload = card.drag_payload();
    assert_eq!(payload.id, TaskId::Number(1));
    assert_eq!(payload.status, TaskStatus::Todo);
  }

  #[test]
  fn drag_is_off_while_editing() {
    let mut card = TaskCardState::new(sample());
    assert!(card.is_draggable());
    card.start_edit();
    assert!(!card.is_draggable());
    card.cancel_edit();
    assert!(card.is_draggable());
  }
}
