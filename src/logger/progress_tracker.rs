use chrono::Utc;
use crate::enums::step_status::StepStatus;
use crate::structs::analysis_step::AnalysisStep;
use crate::structs::progress_summary::ProgressSummary;

/// Tracks the timed steps of one analysis run. Append-only; summarized at
/// the end for the report.
pub struct ProgressTracker {
    total_steps: usize,
    current_step: usize,
    verbose: bool,
    start_time: chrono::DateTime<Utc>,
    steps: Vec<AnalysisStep>,
}

impl ProgressTracker {
    pub fn new(total_steps: usize, verbose: bool) -> Self {
        Self {
            total_steps,
            current_step: 0,
            verbose,
            start_time: Utc::now(),
            steps: Vec::new(),
        }
    }

    pub fn start_step(&mut self, name: &str, description: &str) {
        self.current_step += 1;
        self.steps.push(AnalysisStep {
            step: self.current_step,
            name: name.to_string(),
            description: description.to_string(),
            start_time: Utc::now(),
            end_time: None,
            duration_secs: None,
            status: StepStatus::InProgress,
            message: None,
        });

        if self.verbose {
            log::info!("[{}/{}] {}: {}", self.current_step, self.total_steps, name, description);
        } else {
            log::info!("[{}/{}] {}", self.current_step, self.total_steps, name);
        }
    }

    pub fn complete_step(&mut self, success: bool, message: &str) {
        if let Some(current) = self.steps.last_mut() {
            let end_time = Utc::now();
            current.end_time = Some(end_time);
            current.duration_secs =
                Some((end_time - current.start_time).num_milliseconds() as f64 / 1000.0);
            current.status = if success { StepStatus::Success } else { StepStatus::Failed };
            current.message = if message.is_empty() { None } else { Some(message.to_string()) };
        }
    }

    pub fn get_summary(&self) -> ProgressSummary {
        let successful_steps = self.steps.iter()
            .filter(|s| s.status == StepStatus::Success)
            .count();
        let failed_steps = self.steps.iter()
            .filter(|s| s.status == StepStatus::Failed)
            .count();

        ProgressSummary {
            total_duration_secs: (Utc::now() - self.start_time).num_milliseconds() as f64 / 1000.0,
            total_steps: self.total_steps,
            completed_steps: self.steps.len(),
            successful_steps,
            failed_steps,
            step_details: self.steps.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_step_outcomes() {
        let mut tracker = ProgressTracker::new(3, false);

        tracker.start_step("one", "first");
        tracker.complete_step(true, "");

        tracker.start_step("two", "second");
        tracker.complete_step(false, "boom");

        tracker.start_step("three", "third");

        let summary = tracker.get_summary();
        assert_eq!(summary.total_steps, 3);
        assert_eq!(summary.completed_steps, 3);
        assert_eq!(summary.successful_steps, 1);
        assert_eq!(summary.failed_steps, 1);
        assert_eq!(summary.step_details[1].message.as_deref(), Some("boom"));
        assert_eq!(summary.step_details[2].status, StepStatus::InProgress);
        assert!(summary.step_details[0].duration_secs.is_some());
    }

    #[test]
    fn completing_with_empty_message_stores_none() {
        let mut tracker = ProgressTracker::new(1, true);
        tracker.start_step("only", "step");
        tracker.complete_step(true, "");
        assert!(tracker.get_summary().step_details[0].message.is_none());
    }
}
