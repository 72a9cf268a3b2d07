use std::rc::Rc;

use taskboard_core::{
  BoardAction,
  BoardConfig,
  BoardState
};
use taskboard_shared::{
  TaskDto,
  TaskId,
  TaskPatch,
  TaskStatus
};
use web_sys::MouseEvent;
use yew::{
  Callback,
  Html,
  Reducible,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_reducer
};

use crate::api::ApiClient;
use crate::components::TaskBoard;

const BOARD_CONFIG_TOML: &str =
  include_str!("../assets/board.toml");

/// Board state behind `use_reducer`, so
/// async completions fold into whatever
/// the list is when they land.
#[derive(Default, PartialEq)]
struct Board(BoardState);

impl Reducible for Board {
  type Action = BoardAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = self.0.clone();
    next.apply(action);
    Rc::new(Self(next))
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let loaded = use_memo((), |_| {
    let config =
      BoardConfig::load_or_default(
        BOARD_CONFIG_TOML,
        "board.toml"
      );
    let timezone = config.timezone();
    (config, timezone)
  });
  let (config, timezone) = &*loaded;
  let timezone = *timezone;
  let api = ApiClient::new(config.clone());

  let board = use_reducer(Board::default);

  {
    let api = api.clone();
    let dispatch = board.dispatcher();
    use_effect_with(
      board.0.refresh_tick(),
      move |tick| {
        let tick = *tick;
        wasm_bindgen_futures::spawn_local(async move {
                    tracing::info!(tick, "refreshing task list");
                    match api.list_tasks().await {
                        Ok(list) => dispatch.dispatch(BoardAction::Loaded(list)),
                        Err(err) => {
                            tracing::error!(error = %err, "tasks_list failed");
                            dispatch.dispatch(BoardAction::LoadFailed(err));
                        }
                    }
                });
        || ()
      }
    );
  }

  let on_task_updated = {
    let dispatch = board.dispatcher();
    Callback::from(
      move |updated: TaskDto| {
        dispatch.dispatch(
          BoardAction::Replaced(updated)
        )
      }
    )
  };

  let on_task_deleted = {
    let api = api.clone();
    let dispatch = board.dispatcher();
    Callback::from(move |id: TaskId| {
      let api = api.clone();
      let dispatch = dispatch.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match api.delete_task(&id).await
          {
            | Ok(()) => {
              tracing::info!(task = %id, "task deleted");
              dispatch.dispatch(
                BoardAction::Removed(id)
              );
              dispatch
                .dispatch(BoardAction::Refresh);
            }
            | Err(err) => {
              tracing::error!(error = %err, task = %id, "task_delete failed");
              dispatch.dispatch(
                BoardAction::Failed(format!(
                  "Could not delete task: \
                   {err}"
                ))
              );
            }
          }
        }
      );
    })
  };

  let move_task = {
    let api = api.clone();
    let board = board.clone();
    Callback::from(
      move |(id, status): (
        TaskId,
        TaskStatus
      )| {
        let Some(task) =
          board.0.find(&id).cloned()
        else {
          tracing::warn!(task = %id, "dropped task is not on the board");
          return;
        };
        tracing::info!(task = %id, to = %status.as_str(), "moving task");
        let patch = TaskPatch {
          name: task.name,
          description: task.description,
          due_date: task.due_date,
          rank: task.rank,
          status
        };
        let api = api.clone();
        let dispatch = board.dispatcher();
        wasm_bindgen_futures::spawn_local(
          async move {
            match api
              .update_task(&id, &patch)
              .await
            {
              | Ok(moved) => {
                dispatch.dispatch(
                  BoardAction::Replaced(moved)
                )
              }
              | Err(err) => {
                tracing::error!(error = %err, task = %id, "move task_update failed");
                dispatch.dispatch(
                  BoardAction::Failed(format!(
                    "Could not move task: \
                     {err}"
                  ))
                );
              }
            }
          }
        );
      }
    )
  };

  let on_dismiss_banner = {
    let dispatch = board.dispatcher();
    Callback::from(move |_: MouseEvent| {
      dispatch
        .dispatch(BoardAction::DismissBanner)
    })
  };

  html! {
      <div class="app">
          <div class="header">{ "Task board" }</div>
          {
              match board.0.banner() {
                  | Some(message) => html! {
                      <div class="banner error" role="alert">
                          <span>{ message.to_string() }</span>
                          <button class="icon-btn" title="Dismiss" onclick={on_dismiss_banner}>{ "×" }</button>
                      </div>
                  },
                  | None => html! {}
              }
          }
          {
              if board.0.is_loading() {
                  html! { <div class="board-loading">{ "Loading tasks…" }</div> }
              } else {
                  html! {
                      <TaskBoard
                          tasks={board.0.tasks().to_vec()}
                          api={api.clone()}
                          timezone={timezone}
                          compact={config.display.compact}
                          on_task_deleted={on_task_deleted}
                          on_task_updated={on_task_updated}
                          move_task={move_task}
                      />
                  }
              }
          }
      </div>
  }
}
