use crate::models::{Task, TaskStatus};

/// Where the status query stands, as far as the playground can tell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryState {
    /// No task id held, the query is disabled.
    #[default]
    Idle,
    /// Enabled but no answer yet.
    Pending,
    Success,
    Error,
}

/// Everything the presentation switch looks at.
#[derive(Debug, Clone, Copy)]
pub struct ViewInputs<'a> {
    pub has_prompt: bool,
    pub submitting: bool,
    pub query: QueryState,
    pub flux_id: &'a str,
    pub task: Option<&'a Task>,
}

impl ViewInputs<'_> {
    /// A task is being created or is still being generated.
    pub fn task_in_flight(&self) -> bool {
        let waiting = self.query == QueryState::Pending
            || self.task.map(|t| t.task_status) == Some(TaskStatus::Processing);
        self.submitting || (waiting && !self.flux_id.is_empty())
    }

    pub fn can_submit(&self) -> bool {
        self.has_prompt && !self.task_in_flight()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Busy,
    Empty,
    Result { image_url: String, aspect: String },
}

impl ViewState {
    pub fn derive(inputs: &ViewInputs<'_>) -> Self {
        if inputs.task_in_flight() {
            return ViewState::Busy;
        }
        if inputs.flux_id.is_empty() {
            return ViewState::Empty;
        }
        match inputs.task.and_then(|task| task.image().map(|url| (task, url))) {
            Some((task, url)) => ViewState::Result {
                image_url: url.to_string(),
                aspect: display_aspect(task.aspect_ratio.as_deref()),
            },
            None => ViewState::Empty,
        }
    }
}

/// `"16:9"` becomes `"16/9"`; a missing ratio displays as `"auto"`.
pub fn display_aspect(ratio: Option<&str>) -> String {
    match ratio.map(str::trim).filter(|r| !r.is_empty()) {
        Some(ratio) => ratio.split(':').collect::<Vec<_>>().join("/"),
        None => "auto".to_string(),
    }
}

/// Five dots, one of them lit per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadingIndicator;

impl LoadingIndicator {
    pub const DOTS: usize = 5;

    pub fn frame(&self, tick: usize) -> String {
        let lit = tick % Self::DOTS;
        (0..Self::DOTS)
            .map(|i| if i == lit { "●" } else { "·" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn render(view: &ViewState, tick: usize) -> String {
    match view {
        ViewState::Busy => LoadingIndicator.frame(tick),
        ViewState::Empty => "[ no image yet ]".to_string(),
        ViewState::Result { image_url, aspect } => format!("{} (aspect {})", image_url, aspect),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::succeeded;

    fn inputs<'a>(flux_id: &'a str, query: QueryState, task: Option<&'a Task>) -> ViewInputs<'a> {
        ViewInputs {
            has_prompt: true,
            submitting: false,
            query,
            flux_id,
            task,
        }
    }

    #[test]
    fn test_idle_form_is_empty_and_submittable() {
        let view = inputs("", QueryState::Idle, None);
        assert_eq!(ViewState::derive(&view), ViewState::Empty);
        assert!(view.can_submit());
    }

    #[test]
    fn test_submitting_is_busy() {
        let view = ViewInputs {
            submitting: true,
            ..inputs("", QueryState::Idle, None)
        };
        assert_eq!(ViewState::derive(&view), ViewState::Busy);
        assert!(!view.can_submit());
    }

    #[test]
    fn test_pending_query_is_busy_only_with_id() {
        let with_id = inputs("t1", QueryState::Pending, None);
        assert_eq!(ViewState::derive(&with_id), ViewState::Busy);
        assert!(!with_id.can_submit());

        let without_id = inputs("", QueryState::Pending, None);
        assert_eq!(ViewState::derive(&without_id), ViewState::Empty);
        assert!(without_id.can_submit());
    }

    #[test]
    fn test_processing_task_is_busy() {
        let task = Task::processing("t1");
        let view = inputs("t1", QueryState::Success, Some(&task));
        assert_eq!(ViewState::derive(&view), ViewState::Busy);
        assert!(!view.can_submit());
    }

    #[test]
    fn test_image_needs_both_id_and_url() {
        let done = succeeded("t1", "https://x/y.png", "16:9");
        assert_eq!(
            ViewState::derive(&inputs("t1", QueryState::Success, Some(&done))),
            ViewState::Result {
                image_url: "https://x/y.png".into(),
                aspect: "16/9".into(),
            }
        );
        assert_eq!(
            ViewState::derive(&inputs("", QueryState::Idle, Some(&done))),
            ViewState::Empty
        );

        let failed = succeeded("t1", "", "1:1");
        assert_eq!(
            ViewState::derive(&inputs("t1", QueryState::Success, Some(&failed))),
            ViewState::Empty
        );
    }

    #[test]
    fn test_empty_prompt_cannot_submit() {
        let view = ViewInputs {
            has_prompt: false,
            ..inputs("", QueryState::Idle, None)
        };
        assert!(!view.can_submit());
    }

    #[test]
    fn test_display_aspect() {
        assert_eq!(display_aspect(Some("9:16")), "9/16");
        assert_eq!(display_aspect(Some("")), "auto");
        assert_eq!(display_aspect(None), "auto");
    }

    #[test]
    fn test_loading_frames_cycle() {
        let indicator = LoadingIndicator;
        assert_eq!(indicator.frame(0), "● · · · ·");
        assert_eq!(indicator.frame(4), "· · · · ●");
        assert_eq!(indicator.frame(5), indicator.frame(0));
        assert_eq!(render(&ViewState::Busy, 1), "· ● · · ·");
    }
}
