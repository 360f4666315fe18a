//! Application state for the interactive session.

use crate::advice::{select_advice, AdviceEntry, AdvicePolicy, TraitSliders};
use crate::pipeline::{Evaluation, RequestContext};

use super::actions::{ActionContext, Focus};

/// Rows in the slider panel: six traits followed by age.
pub const SLIDER_ROWS: usize = 7;
pub const AGE_ROW: usize = 6;

/// Main application state
#[derive(Debug, Clone, Default)]
pub struct App {
    input: String,
    focus: Focus,
    selected: usize,
    /// Present only after a request that produced an evaluation.
    sliders: Option<TraitSliders>,
    last_request: Option<RequestContext>,
    policy: AdvicePolicy,
}

impl App {
    pub fn new(policy: AdvicePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input if self.sliders.is_some() => Focus::Sliders,
            _ => Focus::Input,
        };
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % SLIDER_ROWS;
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + SLIDER_ROWS - 1) % SLIDER_ROWS;
    }

    /// Move the selected slider. Never re-runs the prediction.
    pub fn adjust_selected(&mut self, delta: i32) {
        let selected = self.selected;
        let Some(sliders) = self.sliders.as_mut() else {
            return;
        };
        if selected == AGE_ROW {
            sliders.adjust_age(delta);
        } else if let Some(slider) = sliders.get_mut(selected) {
            slider.adjust(delta);
        }
    }

    /// Replace the state with the outcome of a new request.
    pub fn apply(&mut self, request: RequestContext) {
        self.sliders = request
            .evaluation()
            .map(|evaluation| TraitSliders::from_record(&evaluation.record));
        if self.sliders.is_none() {
            self.focus = Focus::Input;
        }
        self.selected = 0;
        self.last_request = Some(request);
    }

    pub fn last_request(&self) -> Option<&RequestContext> {
        self.last_request.as_ref()
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.last_request.as_ref().and_then(RequestContext::evaluation)
    }

    pub fn sliders(&self) -> Option<&TraitSliders> {
        self.sliders.as_ref()
    }

    /// Advice for the current slider positions, `None` when gated out or
    /// when there is nothing evaluated.
    pub fn advice(&self) -> Option<Vec<AdviceEntry>> {
        let evaluation = self.evaluation()?;
        let sliders = self.sliders.as_ref()?;
        select_advice(evaluation.score, sliders, &self.policy)
    }

    pub fn action_context(&self) -> ActionContext {
        ActionContext {
            focus: self.focus,
            has_input: !self.input.trim().is_empty(),
            has_sliders: self.sliders.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PipelineError;
    use crate::pipeline::Outcome;
    use crate::tui::fixtures::evaluated;

    #[test]
    fn test_apply_seeds_sliders() {
        let mut app = App::new(AdvicePolicy::default());
        app.apply(evaluated(75, 80.0));
        let sliders = app.sliders().unwrap();
        assert_eq!(sliders.sliders[0].value, 80);
        assert_eq!(sliders.age, 16);
        assert!(app.action_context().has_sliders);
    }

    #[test]
    fn test_no_data_clears_sliders_and_focus() {
        let mut app = App::new(AdvicePolicy::default());
        app.apply(evaluated(75, 80.0));
        app.toggle_focus();
        assert_eq!(app.focus(), Focus::Sliders);

        app.apply(RequestContext {
            user_id: "9".into(),
            outcome: Outcome::NoData(PipelineError::not_found("9")),
        });
        assert!(app.sliders().is_none());
        assert!(app.advice().is_none());
        assert_eq!(app.focus(), Focus::Input);
    }

    #[test]
    fn test_adjusting_slider_changes_advice_only() {
        let mut app = App::new(AdvicePolicy::default());
        app.apply(evaluated(75, 50.0));
        assert!(app.advice().unwrap().is_empty());

        app.adjust_selected(1);
        let advice = app.advice().unwrap();
        assert_eq!(advice.len(), 1);
        assert_eq!(app.evaluation().unwrap().score, 75);
    }

    #[test]
    fn test_selection_wraps_through_age_row() {
        let mut app = App::new(AdvicePolicy::default());
        app.select_previous();
        assert_eq!(app.selected(), AGE_ROW);
        app.select_next();
        assert_eq!(app.selected(), 0);
    }
}
