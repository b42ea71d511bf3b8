use std::time::Duration;

use hyperlocal_core::config::LoadingStepConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingStep {
    /// Translation key of the step caption, e.g. `loader.step1`.
    pub text_key: String,
    pub duration: Duration,
}

impl From<&LoadingStepConfig> for LoadingStep {
    fn from(cfg: &LoadingStepConfig) -> Self {
        Self {
            text_key: cfg.text_key.clone(),
            duration: Duration::from_millis(cfg.duration_ms),
        }
    }
}

/// Progress through the simulated generation steps.
#[derive(Debug, Clone)]
pub struct GenerationLoader {
    steps: Vec<LoadingStep>,
    current: usize,
}

impl GenerationLoader {
    pub fn new(steps: Vec<LoadingStep>) -> Self {
        Self { steps, current: 0 }
    }

    pub fn from_config(steps: &[LoadingStepConfig]) -> Self {
        Self::new(steps.iter().map(LoadingStep::from).collect())
    }

    pub fn steps(&self) -> &[LoadingStep] {
        &self.steps
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&LoadingStep> {
        self.steps.get(self.current)
    }

    /// Move to the next step. Stays on the last step; returns whether the
    /// position changed.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 < self.steps.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn is_complete(&self) -> bool {
        self.steps.is_empty() || self.current + 1 == self.steps.len()
    }

    pub fn progress_percent(&self) -> f32 {
        if self.steps.is_empty() {
            return 100.0;
        }
        (self.current + 1) as f32 / self.steps.len() as f32 * 100.0
    }

    /// `Step X of Y`.
    pub fn step_label(&self) -> String {
        format!("Step {} of {}", self.current + 1, self.steps.len())
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperlocal_core::config::FlowConfig;

    #[test]
    fn test_default_steps_progress() {
        let mut loader = GenerationLoader::from_config(&FlowConfig::default().loading_steps);
        assert_eq!(loader.steps().len(), 4);
        assert_eq!(loader.step_label(), "Step 1 of 4");
        assert_eq!(loader.progress_percent(), 25.0);
        assert_eq!(loader.total_duration(), Duration::from_millis(8000));

        assert!(loader.advance());
        assert!(loader.advance());
        assert!(loader.advance());
        assert!(!loader.advance());
        assert!(loader.is_complete());
        assert_eq!(loader.progress_percent(), 100.0);
        assert_eq!(loader.current().unwrap().text_key, "loader.step4");

        loader.reset();
        assert_eq!(loader.current_step(), 0);
    }

    #[test]
    fn test_empty_loader() {
        let mut loader = GenerationLoader::new(vec![]);
        assert!(!loader.advance());
        assert!(loader.is_complete());
        assert!(loader.current().is_none());
    }
}
