use taskboard_shared::{
  TaskDto,
  TaskId
};
use tracing::{
  debug,
  warn
};

/// Changes to the board's task list. Each
/// one is applied to the list as it is at
/// the time it arrives, so overlapping
/// requests never undo each other.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
  Loaded(Vec<TaskDto>),
  LoadFailed(String),
  Replaced(TaskDto),
  Removed(TaskId),
  /// Ask for a fresh `GET /tasks`.
  Refresh,
  Failed(String),
  DismissBanner
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
  tasks:        Vec<TaskDto>,
  loading:      bool,
  banner:       Option<String>,
  refresh_tick: u64
}

impl Default for BoardState {
  fn default() -> Self {
    Self {
      tasks:        Vec::new(),
      loading:      true,
      banner:       None,
      refresh_tick: 0
    }
  }
}

impl BoardState {
  pub fn tasks(&self) -> &[TaskDto] {
    &self.tasks
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn banner(&self) -> Option<&str> {
    self.banner.as_deref()
  }

  /// Bumped by every `Refresh`; the view
  /// reloads the list when it changes.
  pub fn refresh_tick(&self) -> u64 {
    self.refresh_tick
  }

  pub fn find(
    &self,
    id: &TaskId
  ) -> Option<&TaskDto> {
    self.tasks.iter().find(|task| task.id == *id)
  }

  pub fn apply(
    &mut self,
    action: BoardAction
  ) {
    match action {
      | BoardAction::Loaded(tasks) => {
        debug!(count = tasks.len(), "loaded tasks");
        self.tasks = tasks;
        self.loading = false;
      }
      | BoardAction::LoadFailed(err) => {
        self.loading = false;
        self.banner = Some(format!(
          "Could not load tasks: {err}"
        ));
      }
      | BoardAction::Replaced(task) => {
        replace_task(&mut self.tasks, task)
      }
      | BoardAction::Removed(id) => {
        remove_task(&mut self.tasks, &id);
      }
      | BoardAction::Refresh => {
        self.refresh_tick =
          self.refresh_tick.wrapping_add(1);
      }
      | BoardAction::Failed(message) => {
        self.banner = Some(message)
      }
      | BoardAction::DismissBanner => {
        self.banner = None
      }
    }
  }
}

/// Swaps in the server copy of a task,
/// appending it when the list does not
/// know it yet.
pub fn replace_task(
  tasks: &mut Vec<TaskDto>,
  updated: TaskDto
) {
  match tasks
    .iter_mut()
    .find(|task| task.id == updated.id)
  {
    | Some(slot) => *slot = updated,
    | None => {
      warn!(
        task = %updated.id,
        "updated task is not on the board"
      );
      tasks.push(updated);
    }
  }
}

pub fn remove_task(
  tasks: &mut Vec<TaskDto>,
  id: &TaskId
) -> bool {
  let before = tasks.len();
  tasks.retain(|task| task.id != *id);
  before != tasks.len()
}
