use web_sys::MouseEvent;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct DeleteModalProps {
  pub open:       bool,
  pub on_close:   Callback<()>,
  pub on_confirm: Callback<()>
}

/// Confirmation dialog for deleting a
/// task. Each interaction emits exactly one
/// of `on_close` / `on_confirm`.
#[function_component(DeleteModal)]
pub fn delete_modal(
  props: &DeleteModalProps
) -> Html {
  if !props.open {
    return html! {};
  }

  let on_backdrop = {
    let on_close = props.on_close.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        on_close.emit(());
      }
    )
  };
  let keep_open =
    Callback::from(|event: MouseEvent| {
      event.stop_propagation();
    });
  let on_cancel = {
    let on_close = props.on_close.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        on_close.emit(());
      }
    )
  };
  let on_confirm = {
    let on_confirm =
      props.on_confirm.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        on_confirm.emit(());
      }
    )
  };

  html! {
      <div class="modal-backdrop" onclick={on_backdrop}>
          <div class="modal" role="dialog" aria-modal="true" onclick={keep_open}>
              <div class="modal-title">{ "Delete task" }</div>
              <p>{ "Are you sure you want to delete this task? This cannot be undone." }</p>
              <div class="modal-actions">
                  <button class="btn" onclick={on_cancel}>{ "Cancel" }</button>
                  <button class="btn danger" onclick={on_confirm}>{ "Delete" }</button>
              </div>
          </div>
      </div>
  }
}
