use crate::{
    error::{PlaygroundError, Result},
    playground::form::FormSelection,
    transport::TaskApi,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Issues the create request for a new generation task.
///
/// Only one submission may be in flight at a time; a second call while the
/// first is outstanding fails with `PlaygroundError::Busy` and sends nothing.
#[derive(Clone)]
pub struct TaskSubmitter {
    api: Arc<dyn TaskApi>,
    in_flight: Arc<AtomicBool>,
}

struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TaskSubmitter {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Returns the new task's identifier.
    pub async fn submit(&self, form: &FormSelection, locale: &str) -> Result<String> {
        let request = form.to_request(locale)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("Submit ignored, a task is already being created");
            return Err(PlaygroundError::Busy);
        }
        let _guard = InFlightGuard(self.in_flight.clone());

        let response = self.api.create_task(&request).await.map_err(|e| {
            log::error!("Create task failed: {}", e);
            e
        })?;

        match response.into_task_id() {
            Ok(id) => {
                log::info!("Task {} created", id);
                Ok(id)
            }
            Err(e) => {
                log::warn!("Create task rejected: {}", e);
                Err(e)
            }
        }
    }
}
