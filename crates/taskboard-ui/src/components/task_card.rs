use std::cell::RefCell;
use std::rc::Rc;

use chrono_tz::Tz;
use taskboard_core::datetime::{
  due_label,
  format_due_date,
  today
};
use taskboard_core::display::{
  rank_badge,
  rank_color,
  rank_label,
  status_text
};
use taskboard_core::{
  DueLabel,
  SaveOutcome,
  TaskCardState
};
use taskboard_shared::{
  DRAG_PAYLOAD_TYPE,
  TaskDto,
  TaskId,
  TaskRank,
  TaskStatus
};
use web_sys::{
  DragEvent,
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  InputEvent,
  MouseEvent
};
use yew::functional::UseForceUpdateHandle;
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_memo,
  use_mut_ref,
  use_state
};

use super::DeleteModal;
use crate::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub task:            TaskDto,
  pub api:             ApiClient,
  #[prop_or_default]
  pub timezone:        Option<Tz>,
  #[prop_or_default]
  pub compact:         bool,
  pub on_task_deleted: Callback<TaskId>,
  pub on_task_updated: Callback<TaskDto>
}

type CardRef = Rc<RefCell<TaskCardState>>;

/// Wraps a state mutation into a DOM
/// callback that re-renders only when the
/// mutation reports a change.
fn card_action<E: 'static>(
  card: &CardRef,
  redraw: &UseForceUpdateHandle,
  apply: impl Fn(&mut TaskCardState, E) -> bool
  + 'static
) -> Callback<E> {
  let card = card.clone();
  let redraw = redraw.clone();
  Callback::from(move |event: E| {
    let changed =
      apply(&mut *card.borrow_mut(), event);
    if changed {
      redraw.force_update();
    }
  })
}

#[function_component(TaskCard)]
pub fn task_card(
  props: &TaskCardProps
) -> Html {
  let card: CardRef = use_mut_ref(|| {
    TaskCardState::new(props.task.clone())
  });
  let redraw = use_force_update();
  let is_dragging = use_state(|| false);

  {
    let card = card.clone();
    let redraw = redraw.clone();
    use_effect_with(
      props.task.clone(),
      move |task| {
        if card
          .borrow_mut()
          .sync_task(task.clone())
        {
          redraw.force_update();
        }
        || ()
      }
    );
  }

  let snapshot = card.borrow().clone();
  let draft = snapshot.draft().clone();
  let editing = snapshot.is_editing();
  let expanded = snapshot.is_expanded();

  let proximity = use_memo(
    (
      draft.due_date.clone(),
      draft.status.clone(),
      props.timezone
    ),
    |(due, status, zone)| {
      due_label(due, status, today(*zone))
    }
  );
  let proximity: Option<DueLabel> =
    (*proximity).clone();

  let on_expand = card_action(
    &card,
    &redraw,
    |card, event: MouseEvent| {
      event.stop_propagation();
      card.toggle_expand()
    }
  );
  let on_edit = card_action(
    &card,
    &redraw,
    |card, _: MouseEvent| card.toggle_edit()
  );
  let on_cancel = card_action(
    &card,
    &redraw,
    |card, _: MouseEvent| card.cancel_edit()
  );
  let on_delete = card_action(
    &card,
    &redraw,
    |card, _: MouseEvent| card.open_delete()
  );
  let on_dismiss_error = card_action(
    &card,
    &redraw,
    |card, _: MouseEvent| {
      card.dismiss_error()
    }
  );
  let on_close_delete = card_action(
    &card,
    &redraw,
    |card, _: ()| card.cancel_delete()
  );
  let on_confirm_delete = {
    let card = card.clone();
    let redraw = redraw.clone();
    let on_task_deleted =
      props.on_task_deleted.clone();
    Callback::from(move |_: ()| {
      let confirmed =
        card.borrow_mut().confirm_delete();
      redraw.force_update();
      if let Some(id) = confirmed {
        on_task_deleted.emit(id);
      }
    })
  };

  let on_name = card_action(
    &card,
    &redraw,
    |card, event: InputEvent| {
      let input: HtmlInputElement =
        event.target_unchecked_into();
      card.set_name(input.value())
    }
  );
  let on_description = card_action(
    &card,
    &redraw,
    |card, event: InputEvent| {
      let input: HtmlTextAreaElement =
        event.target_unchecked_into();
      card.set_description(input.value())
    }
  );
  let on_due_date = card_action(
    &card,
    &redraw,
    |card, event: InputEvent| {
      let input: HtmlInputElement =
        event.target_unchecked_into();
      card.set_due_date(input.value())
    }
  );
  let on_rank = card_action(
    &card,
    &redraw,
    |card, event: Event| {
      let select: HtmlSelectElement =
        event.target_unchecked_into();
      card.set_rank(TaskRank::from(
        select.value()
      ))
    }
  );
  let on_status = card_action(
    &card,
    &redraw,
    |card, event: Event| {
      let select: HtmlSelectElement =
        event.target_unchecked_into();
      card.set_status(TaskStatus::from(
        select.value()
      ))
    }
  );

  let on_save = {
    let card = card.clone();
    let redraw = redraw.clone();
    let api = props.api.clone();
    let on_task_updated =
      props.on_task_updated.clone();
    Callback::from(move |_: MouseEvent| {
      let Some(request) =
        card.borrow_mut().begin_save()
      else {
        return;
      };
      redraw.force_update();

      let card = card.clone();
      let redraw = redraw.clone();
      let api = api.clone();
      let on_task_updated =
        on_task_updated.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          let result = api
            .update_task(
              &request.task_id,
              &request.patch
            )
            .await;
          let outcome = card
            .borrow_mut()
            .finish_save(
              request.ticket,
              result
            );
          if let SaveOutcome::Updated(task) =
            outcome
          {
            on_task_updated.emit(task);
          }
          redraw.force_update();
        }
      );
    })
  };

  let ondragstart = {
    let card = card.clone();
    let is_dragging = is_dragging.clone();
    Callback::from(
      move |event: DragEvent| {
        let payload =
          card.borrow().drag_payload();
        if let Some(data_transfer) =
          event.data_transfer()
        {
          match serde_json::to_string(
            &payload
          ) {
            | Ok(json) => {
              let _ = data_transfer
                .set_data(
                  DRAG_PAYLOAD_TYPE,
                  &json
                );
            }
            | Err(error) => {
              tracing::warn!(
                %error,
                "failed encoding drag \
                 payload"
              )
            }
          }
          let _ = data_transfer.set_data(
            "text/plain",
            &payload.id.to_string()
          );
          data_transfer
            .set_effect_allowed("move");
        }
        is_dragging.set(true);
      }
    )
  };
  let ondragend = {
    let is_dragging = is_dragging.clone();
    Callback::from(move |_: DragEvent| {
      is_dragging.set(false);
    })
  };

  let show_summary =
    editing || expanded || !props.compact;
  let rank_style = format!(
    "font-weight: bold; color: {}",
    rank_color(&draft.rank)
  );
  let rank_options: Vec<TaskRank> = {
    let mut all = TaskRank::all();
    if !all.contains(&draft.rank) {
      all.push(draft.rank.clone());
    }
    all
  };
  let status_options: Vec<TaskStatus> = {
    let mut all = TaskStatus::all();
    if !all.contains(&draft.status) {
      all.push(draft.status.clone());
    }
    all
  };

  html! {
      <div
          class={classes!(
              "task-card",
              (*is_dragging).then_some("dragging"),
              editing.then_some("editing")
          )}
          draggable={if snapshot.is_draggable() { "true" } else { "false" }}
          {ondragstart}
          {ondragend}
      >
          <button class="icon-btn expand-btn" title={if expanded { "Collapse" } else { "Expand" }} onclick={on_expand}>
              { if expanded { "▴" } else { "▾" } }
          </button>

          <div class="task-card-content">
              {
                  if editing {
                      html! {
                          <label class="field">
                              <span>{ "Task Name" }</span>
                              <input type="text" value={draft.name.clone()} oninput={on_name} />
                          </label>
                      }
                  } else {
                      html! { <div class="task-card-title">{ draft.name.clone() }</div> }
                  }
              }
              {
                  if editing {
                      html! {
                          <label class="field">
                              <span>{ "Description" }</span>
                              <textarea rows="3" value={draft.description.clone()} oninput={on_description} />
                          </label>
                      }
                  } else if show_summary {
                      html! {
                          <div class="task-card-due">
                              <span>{ format!("Due date: {}", format_due_date(&draft.due_date)) }</span>
                              {
                                  match proximity {
                                      | Some(label) => html! {
                                          <span class={label.tone.css_class()}>{ label.text }</span>
                                      },
                                      | None => html! {}
                                  }
                              }
                          </div>
                      }
                  } else {
                      html! {}
                  }
              }
              {
                  if editing {
                      html! {
                          <label class="field">
                              <span>{ "Due Date" }</span>
                              <input type="date" value={draft.due_date.clone()} oninput={on_due_date} />
                          </label>
                      }
                  } else if show_summary {
                      html! {
                          <div class="task-card-rank">
                              { "Rank: " }
                              <span style={rank_style}>{ rank_badge(&draft.rank) }</span>
                          </div>
                      }
                  } else {
                      html! {}
                  }
              }
          </div>

          {
              if expanded {
                  html! {
                      <div class="task-card-details">
                          {
                              if editing {
                                  html! {
                                      <label class="field">
                                          <span>{ "Status" }</span>
                                          <select onchange={on_status}>
                                              {
                                                  for status_options.iter().map(|status| html! {
                                                      <option value={status.as_str().to_string()} selected={*status == draft.status}>
                                                          { status_text(status).to_string() }
                                                      </option>
                                                  })
                                              }
                                          </select>
                                      </label>
                                  }
                              } else {
                                  html! { <div>{ format!("Status: {}", status_text(&draft.status)) }</div> }
                              }
                          }
                          {
                              if editing {
                                  html! {
                                      <label class="field">
                                          <span>{ "Rank" }</span>
                                          <select onchange={on_rank}>
                                              {
                                                  for rank_options.iter().map(|rank| html! {
                                                      <option value={rank.as_str().to_string()} selected={*rank == draft.rank}>
                                                          { rank_label(rank).to_string() }
                                                      </option>
                                                  })
                                              }
                                          </select>
                                      </label>
                                  }
                              } else {
                                  html! { <div class="task-subtitle">{ format!("Description: {}", draft.description) }</div> }
                              }
                          }
                      </div>
                  }
              } else {
                  html! {}
              }
          }

          {
              match snapshot.save_error() {
                  | Some(error) => html! {
                      <div class="card-error" role="alert">
                          <span>{ format!("Save failed: {error}") }</span>
                          <button class="icon-btn" title="Dismiss" onclick={on_dismiss_error}>{ "×" }</button>
                      </div>
                  },
                  | None => html! {}
              }
          }

          {
              if expanded {
                  html! {
                      <div class="task-card-actions">
                          {
                              if editing {
                                  html! {
                                      <>
                                          <button class="btn ok" disabled={snapshot.is_saving()} onclick={on_save}>
                                              { if snapshot.is_saving() { "Saving…" } else { "Save" } }
                                          </button>
                                          <button class="btn" disabled={snapshot.is_saving()} onclick={on_cancel}>{ "Cancel" }</button>
                                      </>
                                  }
                              } else {
                                  html! { <button class="btn" onclick={on_edit}>{ "Edit" }</button> }
                              }
                          }
                          <button class="btn danger" onclick={on_delete}>{ "Delete" }</button>
                      </div>
                  }
              } else {
                  html! {}
              }
          }

          <DeleteModal
              open={snapshot.is_delete_modal_open()}
              on_close={on_close_delete}
              on_confirm={on_confirm_delete}
          />
      </div>
  }
}
