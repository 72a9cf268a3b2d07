use chrono_tz::Tz;
use taskboard_core::display::status_text;
use taskboard_shared::{
  DRAG_PAYLOAD_TYPE,
  DragPayload,
  TaskDto,
  TaskId,
  TaskStatus
};
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_state
};

use super::TaskCard;
use crate::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct BoardColumnProps {
  pub status:          TaskStatus,
  pub cards:           Vec<TaskDto>,
  pub api:             ApiClient,
  pub timezone:        Option<Tz>,
  pub compact:         bool,
  pub on_task_deleted: Callback<TaskId>,
  pub on_task_updated: Callback<TaskDto>,
  pub move_task:
    Callback<(TaskId, TaskStatus)>
}

/// One status lane. Dropping a card from
/// another lane moves it here.
#[function_component(BoardColumn)]
pub fn board_column(
  props: &BoardColumnProps
) -> Html {
  let drop_hint = use_state(|| false);

  let ondragover = {
    let drop_hint = drop_hint.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        if !*drop_hint {
          drop_hint.set(true);
        }
      }
    )
  };

  let ondragleave = {
    let drop_hint = drop_hint.clone();
    Callback::from(move |_: DragEvent| {
      drop_hint.set(false);
    })
  };

  let ondrop = {
    let drop_hint = drop_hint.clone();
    let move_task =
      props.move_task.clone();
    let lane = props.status.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        event.stop_propagation();
        drop_hint.set(false);
        let Some(data_transfer) =
          event.data_transfer()
        else {
          return;
        };
        match data_transfer
          .get_data(DRAG_PAYLOAD_TYPE)
        {
          | Ok(raw) if !raw.is_empty() => {
            match serde_json::from_str::<
              DragPayload
            >(&raw)
            {
              | Ok(payload) => {
                if payload.status == lane {
                  tracing::debug!(
                    task = %payload.id,
                    "dropped into its own lane"
                  );
                } else {
                  move_task.emit((
                    payload.id,
                    lane.clone()
                  ));
                }
              }
              | Err(error) => {
                tracing::warn!(
                  %error,
                  raw,
                  "failed to parse \
                   dragged task payload"
                );
              }
            }
          }
          | Ok(_) => {
            tracing::warn!(
              "drop carried no task \
               payload"
            );
          }
          | Err(error) => {
            tracing::warn!(
              ?error,
              "failed reading drag data"
            )
          }
        }
      }
    )
  };

  html! {
      <div class={classes!("board-column", (*drop_hint).then_some("drop-hint"))} {ondragover} {ondragleave} {ondrop}>
          <div class="board-column-header">
              <span>{ status_text(&props.status).to_string() }</span>
              <span class="badge">{ props.cards.len() }</span>
          </div>
          <div class="board-column-body">
              {
                  if props.cards.is_empty() {
                      html! { <div class="board-empty">{ "No tasks" }</div> }
                  } else {
                      html! {
                          <>
                              {
                                  for props.cards.iter().cloned().map(|task| {
                                      let key = task.id.to_string();
                                      html! {
                                          <TaskCard
                                              key={key}
                                              task={task}
                                              api={props.api.clone()}
                                              timezone={props.timezone}
                                              compact={props.compact}
                                              on_task_deleted={props.on_task_deleted.clone()}
                                              on_task_updated={props.on_task_updated.clone()}
                                          />
                                      }
                                  })
                              }
                          </>
                      }
                  }
              }
          </div>
      </div>
  }
}
