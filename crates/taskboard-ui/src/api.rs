use gloo::net::http::{
  Request,
  Response
};
use serde::de::DeserializeOwned;
use taskboard_core::BoardConfig;
use taskboard_shared::{
  TaskDto,
  TaskId,
  TaskPatch
};

/// REST client for the task board API.
/// Errors are flattened to display
/// strings; callers only log or show them.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
  config: BoardConfig
}

impl ApiClient {
  pub fn new(config: BoardConfig) -> Self {
    Self {
      config
    }
  }

  fn task_url(&self, id: &TaskId) -> String {
    let encoded: String =
      js_sys::encode_uri_component(
        &id.to_string()
      )
      .into();
    self
      .config
      .endpoint(&format!("tasks/{encoded}"))
  }

  fn tasks_url(&self) -> String {
    self.config.endpoint("tasks")
  }

  pub async fn list_tasks(
    &self
  ) -> Result<Vec<TaskDto>, String> {
    let response =
      Request::get(&self.tasks_url())
        .send()
        .await
        .map_err(|e| {
          format!("request error: {e}")
        })?;
    decode(ensure_ok(response)?).await
  }

  pub async fn update_task(
    &self,
    id: &TaskId,
    patch: &TaskPatch
  ) -> Result<TaskDto, String> {
    let response =
      Request::put(&self.task_url(id))
        .json(patch)
        .map_err(|e| {
          format!(
            "failed to encode patch: {e}"
          )
        })?
        .send()
        .await
        .map_err(|e| {
          format!("request error: {e}")
        })?;
    decode(ensure_ok(response)?).await
  }

  pub async fn delete_task(
    &self,
    id: &TaskId
  ) -> Result<(), String> {
    let response =
      Request::delete(&self.task_url(id))
        .send()
        .await
        .map_err(|e| {
          format!("request error: {e}")
        })?;
    ensure_ok(response).map(|_| ())
  }
}

fn ensure_ok(
  response: Response
) -> Result<Response, String> {
  if response.ok() {
    Ok(response)
  } else {
    Err(format!(
      "HTTP {} {}",
      response.status(),
      response.status_text()
    ))
  }
}

async fn decode<R>(
  response: Response
) -> Result<R, String>
where
  R: DeserializeOwned
{
  response
    .json::<R>()
    .await
    .map_err(|e| format!("decode error: {e}"))
}
