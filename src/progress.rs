//! Console progress for pipeline runs.
//!
//! A spinner covers the wait on each step (package operations can take
//! minutes); the finished line replaces it.

use indicatif::{ProgressBar, ProgressStyle};
use provision::{ProgressCallback, Step, StepResult};
use std::time::Duration;

use crate::ui;

pub struct ConsoleProgress {
    spinner: Option<ProgressBar>,
    current: usize,
    total: usize,
    visible: bool,
}

impl ConsoleProgress {
    /// Spinner plus one line per step
    pub fn new() -> Self {
        Self {
            spinner: None,
            current: 0,
            total: 0,
            visible: true,
        }
    }

    /// Print nothing (for `--json`)
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::new()
        }
    }

    fn spinner(message: String) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl ProgressCallback for ConsoleProgress {
    fn on_step_start(&mut self, index: usize, total: usize, step: &dyn Step) {
        self.current = index + 1;
        self.total = total;
        if self.visible {
            self.spinner = Some(Self::spinner(format!(
                "[{}/{}] {}",
                self.current,
                total,
                step.description()
            )));
        }
    }

    fn on_step_complete(&mut self, result: &StepResult) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
        if self.visible {
            ui::step(
                self.current,
                self.total,
                &result.step_name,
                result.status,
                result.detail.as_deref(),
            );
        }
    }
}
