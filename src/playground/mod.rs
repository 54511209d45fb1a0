pub mod form;
pub mod view;

use crate::{
    client::{PlaygroundClient, TaskStream},
    error::{Notice, PlaygroundError, Result},
    models::{find_model, AspectRatio, Task, TaskEnvelope},
};
use futures::StreamExt;

pub use form::FormSelection;
pub use view::{display_aspect, render, LoadingIndicator, QueryState, ViewInputs, ViewState};

/// One playground session: the form, the task it produced and what to show.
pub struct Playground {
    client: PlaygroundClient,
    form: FormSelection,
    flux_id: String,
    query: QueryState,
    task: Option<Task>,
}

impl Playground {
    pub fn new(client: PlaygroundClient) -> Self {
        let form = client.default_form();
        Self {
            client,
            form,
            flux_id: String::new(),
            query: QueryState::Idle,
            task: None,
        }
    }

    pub fn form(&self) -> &FormSelection {
        &self.form
    }

    pub fn set_model(&mut self, id: &str) -> Result<()> {
        self.form.model = find_model(self.client.models(), id)?.clone();
        Ok(())
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.form.aspect_ratio = ratio;
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.form.prompt = prompt.into();
    }

    pub fn set_public(&mut self, is_public: bool) {
        self.form.is_public = is_public;
    }

    pub fn flux_id(&self) -> &str {
        &self.flux_id
    }

    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    pub fn query_state(&self) -> QueryState {
        self.query
    }

    pub fn inputs(&self) -> ViewInputs<'_> {
        ViewInputs {
            has_prompt: self.form.has_prompt(),
            submitting: self.client.submitter().is_in_flight(),
            query: self.query,
            flux_id: &self.flux_id,
            task: self.task.as_ref(),
        }
    }

    pub fn view(&self) -> ViewState {
        ViewState::derive(&self.inputs())
    }

    pub fn can_submit(&self) -> bool {
        self.inputs().can_submit()
    }

    /// Handles a click on the submit control. Returns the notification to
    /// show, if any.
    pub async fn submit(&mut self) -> Option<Notice> {
        match self.try_submit().await {
            Ok(_) => None,
            Err(e) => Some(e.notice()),
        }
    }

    async fn try_submit(&mut self) -> Result<String> {
        if self.form.has_prompt() && self.inputs().task_in_flight() {
            return Err(PlaygroundError::Busy);
        }

        let flux_id = self
            .client
            .submitter()
            .submit(&self.form, self.client.locale())
            .await?;

        self.flux_id = flux_id.clone();
        self.query = QueryState::Pending;
        self.task = None;
        Ok(flux_id)
    }

    /// Status stream for the held task id; empty when none is held.
    pub fn watch(&self) -> TaskStream {
        self.client.poller().watch(&self.flux_id)
    }

    /// Applies one poll observation. Any completed request settles the
    /// query; the task is only replaced when the response carries the held
    /// one.
    pub fn observe(&mut self, observation: Result<TaskEnvelope>) {
        match observation {
            Ok(envelope) => {
                self.query = QueryState::Success;
                match envelope.into_task() {
                    Some(task) if task.id == self.flux_id => self.task = Some(task),
                    Some(task) => log::debug!("Ignoring status for stale task {}", task.id),
                    None => log::debug!("No task data returned for {}", self.flux_id),
                }
            }
            Err(e) => {
                log::warn!("Status query failed: {}", e);
                self.query = QueryState::Error;
            }
        }
    }

    /// Submits the form and follows the task until it settles, calling
    /// `on_change` whenever the view changes.
    pub async fn run_to_completion<F>(&mut self, mut on_change: F) -> Result<Task>
    where
        F: FnMut(&ViewState),
    {
        self.try_submit().await?;

        let mut shown = self.view();
        on_change(&shown);

        let mut stream = self.watch();
        let mut last_error = None;
        while let Some(observation) = stream.next().await {
            if let Err(e) = &observation {
                last_error = Some(e.to_string());
            }
            self.observe(observation);

            let view = self.view();
            if view != shown {
                on_change(&view);
                shown = view;
            }
        }

        match &self.task {
            Some(task) if task.task_status.is_terminal() => Ok(task.clone()),
            _ => Err(match last_error {
                Some(msg) => PlaygroundError::Transport(msg),
                None => PlaygroundError::ResponseError(format!(
                    "polling for {} ended before the task settled",
                    self.flux_id
                )),
            }),
        }
    }
}
