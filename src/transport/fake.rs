use crate::{
    error::{PlaygroundError, Result},
    models::{GenerateRequest, GenerateResponse, Task, TaskEnvelope},
    transport::traits::TaskApi,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Clone)]
enum Scripted<T> {
    Ok(T),
    TransportError(String),
}

impl<T: Clone> Scripted<T> {
    fn to_result(&self) -> Result<T> {
        match self {
            Scripted::Ok(value) => Ok(value.clone()),
            Scripted::TransportError(msg) => Err(PlaygroundError::Transport(msg.clone())),
        }
    }
}

/// In-memory backend that replays scripted answers and records every call.
///
/// Once the task script runs out, the last answer is repeated.
#[derive(Default)]
pub(crate) struct FakeTaskApi {
    creates: Mutex<VecDeque<Scripted<GenerateResponse>>>,
    queries: Mutex<VecDeque<Scripted<TaskEnvelope>>>,
    last_query: Mutex<Option<Scripted<TaskEnvelope>>>,
    create_delay: Mutex<Duration>,
    pub create_calls: Mutex<Vec<GenerateRequest>>,
    pub query_calls: Mutex<Vec<(String, Instant)>>,
}

impl FakeTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_created(self, id: &str) -> Self {
        self.push_create(Scripted::Ok(GenerateResponse {
            id: Some(id.to_string()),
            error: None,
        }))
    }

    pub fn with_create_error(self, message: &str) -> Self {
        self.push_create(Scripted::Ok(GenerateResponse {
            id: None,
            error: Some(message.to_string()),
        }))
    }

    pub fn with_create_transport_error(self) -> Self {
        self.push_create(Scripted::TransportError("HTTP 500".into()))
    }

    pub fn with_create_delay(self, delay: Duration) -> Self {
        *self.create_delay.lock().unwrap() = delay;
        self
    }

    pub fn with_task(self, task: Task) -> Self {
        self.push_query(Scripted::Ok(TaskEnvelope { data: Some(task) }))
    }

    pub fn with_empty_envelope(self) -> Self {
        self.push_query(Scripted::Ok(TaskEnvelope::default()))
    }

    pub fn with_query_transport_error(self) -> Self {
        self.push_query(Scripted::TransportError("HTTP 503".into()))
    }

    pub fn create_count(&self) -> usize {
        self.create_calls.lock().unwrap().len()
    }

    pub fn query_count(&self) -> usize {
        self.query_calls.lock().unwrap().len()
    }

    pub fn query_times(&self) -> Vec<Instant> {
        self.query_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, at)| *at)
            .collect()
    }

    fn push_create(self, answer: Scripted<GenerateResponse>) -> Self {
        self.creates.lock().unwrap().push_back(answer);
        self
    }

    fn push_query(self, answer: Scripted<TaskEnvelope>) -> Self {
        self.queries.lock().unwrap().push_back(answer);
        self
    }
}

pub(crate) fn task_with_status(id: &str, status: crate::models::TaskStatus) -> Task {
    let mut task = Task::processing(id);
    task.task_status = status;
    task
}

pub(crate) fn succeeded(id: &str, image_url: &str, aspect_ratio: &str) -> Task {
    let mut task = task_with_status(id, crate::models::TaskStatus::Succeeded);
    task.image_url = Some(image_url.to_string());
    task.aspect_ratio = Some(aspect_ratio.to_string());
    task
}

#[async_trait]
impl TaskApi for FakeTaskApi {
    async fn create_task(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.create_calls.lock().unwrap().push(request.clone());
        let delay = *self.create_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let answer = self.creates.lock().unwrap().pop_front();
        match answer {
            Some(answer) => answer.to_result(),
            None => Err(PlaygroundError::Transport("no scripted create".into())),
        }
    }

    async fn query_task(&self, flux_id: &str) -> Result<TaskEnvelope> {
        self.query_calls
            .lock()
            .unwrap()
            .push((flux_id.to_string(), Instant::now()));
        let next = self.queries.lock().unwrap().pop_front();
        let mut last = self.last_query.lock().unwrap();
        if let Some(next) = next {
            *last = Some(next);
        }
        match last.as_ref() {
            Some(answer) => answer.to_result(),
            None => Err(PlaygroundError::Transport("no scripted task".into())),
        }
    }
}
