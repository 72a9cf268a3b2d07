use chrono_tz::Tz;
use taskboard_shared::{
  TaskDto,
  TaskId,
  TaskStatus
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::BoardColumn;
use crate::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct TaskBoardProps {
  pub tasks:           Vec<TaskDto>,
  pub api:             ApiClient,
  pub timezone:        Option<Tz>,
  pub compact:         bool,
  pub on_task_deleted: Callback<TaskId>,
  pub on_task_updated: Callback<TaskDto>,
  pub move_task:
    Callback<(TaskId, TaskStatus)>
}

/// Known lanes first, then one lane per
/// unrecognised status in order of first
/// appearance.
fn board_lanes(
  tasks: &[TaskDto]
) -> Vec<TaskStatus> {
  let mut lanes = TaskStatus::all();
  for task in tasks {
    if !lanes.contains(&task.status) {
      lanes.push(task.status.clone());
    }
  }
  lanes
}

#[function_component(TaskBoard)]
pub fn task_board(
  props: &TaskBoardProps
) -> Html {
  let lanes = board_lanes(&props.tasks);

  html! {
      <div class="task-board">
          {
              for lanes.into_iter().map(|status| {
                  let cards: Vec<TaskDto> = props
                      .tasks
                      .iter()
                      .filter(|task| task.status == status)
                      .cloned()
                      .collect();
                  let key = status.as_str().to_string();
                  html! {
                      <BoardColumn
                          key={key}
                          status={status}
                          cards={cards}
                          api={props.api.clone()}
                          timezone={props.timezone}
                          compact={props.compact}
                          on_task_deleted={props.on_task_deleted.clone()}
                          on_task_updated={props.on_task_updated.clone()}
                          move_task={props.move_task.clone()}
                      />
                  }
              })
          }
      </div>
  }
}
