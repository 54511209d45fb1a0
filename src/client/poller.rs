use crate::{
    config::DEFAULT_POLL_INTERVAL,
    error::{PlaygroundError, Result},
    models::{Task, TaskEnvelope, TaskStatus},
    transport::TaskApi,
};
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// One item per completed status request, in completion order.
pub type TaskStream = Pin<Box<dyn Stream<Item = Result<TaskEnvelope>> + Send>>;

/// How long to wait before the next status request, or `None` to stop.
///
/// Only a task that is still `Processing` keeps the poll alive; a terminal
/// status or an absent payload ends it.
pub fn next_interval(status: Option<TaskStatus>) -> Option<Duration> {
    interval_for(status, DEFAULT_POLL_INTERVAL)
}

fn interval_for(status: Option<TaskStatus>, interval: Duration) -> Option<Duration> {
    match status {
        Some(TaskStatus::Processing) => Some(interval),
        _ => None,
    }
}

#[derive(Clone)]
pub struct TaskPoller {
    api: Arc<dyn TaskApi>,
    interval: Duration,
}

impl TaskPoller {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self::with_interval(api, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(api: Arc<dyn TaskApi>, interval: Duration) -> Self {
        Self { api, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_interval(&self, status: Option<TaskStatus>) -> Option<Duration> {
        interval_for(status, self.interval)
    }

    /// One status request.
    pub async fn fetch(&self, flux_id: &str) -> Result<TaskEnvelope> {
        self.api.query_task(flux_id).await
    }

    /// Polls `flux_id` until the task settles.
    ///
    /// The first request goes out immediately. Every completed request is
    /// yielded, including envelopes without task data. A failed request is
    /// yielded as an error and the next tick is still chosen from the last
    /// status that was actually observed, so a transient failure while
    /// `Processing` does not stop the poll. Dropping the stream stops the
    /// background task.
    pub fn watch(&self, flux_id: &str) -> TaskStream {
        let (tx, rx) = mpsc::channel(16);

        if flux_id.is_empty() {
            log::debug!("No task id held, poller disabled");
            return Box::pin(ReceiverStream::new(rx));
        }

        let api = self.api.clone();
        let interval = self.interval;
        let flux_id = flux_id.to_string();

        tokio::spawn(async move {
            let mut last_status: Option<TaskStatus> = None;
            loop {
                let observation = api.query_task(&flux_id).await;
                match &observation {
                    Ok(envelope) => last_status = envelope.status(),
                    Err(e) => log::warn!("Status request for {} failed: {}", flux_id, e),
                }

                if tx.send(observation).await.is_err() {
                    break;
                }

                let Some(delay) = interval_for(last_status, interval) else {
                    log::debug!("Polling for {} stopped at {:?}", flux_id, last_status);
                    break;
                };

                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = tx.closed() => break,
                }
            }
        });

        Box::pin(ReceiverStream::new(rx))
    }

    /// Drives [`watch`](Self::watch) to the settled task.
    pub async fn wait(&self, flux_id: &str) -> Result<Task> {
        let mut stream = self.watch(flux_id);
        let mut latest: Option<Task> = None;

        while let Some(observation) = stream.next().await {
            let Some(task) = observation?.into_task() else {
                continue;
            };
            if task.task_status.is_terminal() {
                return Ok(task);
            }
            latest = Some(task);
        }

        Err(PlaygroundError::ResponseError(match latest {
            Some(task) => format!("polling for {} ended at {}", task.id, task.task_status),
            None => format!("no task data returned for {:?}", flux_id),
        }))
    }
}
