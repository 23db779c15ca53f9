//! Onboarding Category Picker
//!
//! Shows the backend's initial category suggestions and lets the user pick
//! between one and five of them before entering the dashboard.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::api::dto::CategorySuggestionDto;
use crate::api::ApiClient;
use crate::lifetime::Lifetime;
use crate::session::guard::HOME_PATH;

pub const MAX_SELECTION: usize = 5;
pub const MSG_NO_SUGGESTIONS: &str = "Brak propozycji kategorii";
pub const MSG_UNAVAILABLE: &str = "Usługa niedostępna, spróbuj ponownie później.";

/// Suggestion as rendered in the picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionView {
    pub id: String,
    pub name: String,
    pub usage_count: u64,
}

impl From<CategorySuggestionDto> for SuggestionView {
    fn from(dto: CategorySuggestionDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            usage_count: dto.usage_count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickerState {
    pub suggestions: Vec<SuggestionView>,
    pub loading: bool,
    pub error_message: Option<String>,
    /// Selected ids in the order they were picked
    pub selected: Vec<String>,
}

pub struct SuggestionPicker {
    api: Rc<ApiClient>,
    state: RefCell<PickerState>,
    lifetime: Lifetime,
}

impl SuggestionPicker {
    pub fn new(api: Rc<ApiClient>, lifetime: Lifetime) -> Self {
        Self {
            api,
            state: RefCell::new(PickerState::default()),
            lifetime,
        }
    }

    pub fn state(&self) -> PickerState {
        self.state.borrow().clone()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.state.borrow().selected.iter().any(|s| s == id)
    }

    pub async fn fetch_suggestions(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.loading = true;
            state.error_message = None;
        }

        let result = self
            .api
            .get::<Vec<CategorySuggestionDto>>("/categories/initial-suggestions")
            .await;

        if !self.lifetime.is_alive() {
            tracing::debug!("Onboarding view disposed, dropping suggestions");
            return;
        }

        let mut state = self.state.borrow_mut();
        state.loading = false;
        match result {
            Ok(dtos) => {
                state.suggestions = dtos.into_iter().map(SuggestionView::from).collect();
                if state.suggestions.is_empty() {
                    state.error_message = Some(MSG_NO_SUGGESTIONS.to_string());
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch suggestions");
                state.error_message = Some(MSG_UNAVAILABLE.to_string());
            }
        }
    }

    pub async fn retry(&self) {
        self.fetch_suggestions().await;
    }

    /// Select or deselect; a sixth selection is ignored
    pub fn toggle_selection(&self, id: &str) {
        let mut state = self.state.borrow_mut();
        if let Some(pos) = state.selected.iter().position(|s| s == id) {
            state.selected.remove(pos);
        } else if state.selected.len() < MAX_SELECTION {
            state.selected.push(id.to_string());
        }
    }

    pub fn can_continue(&self) -> bool {
        (1..=MAX_SELECTION).contains(&self.state.borrow().selected.len())
    }

    pub fn selection_label(&self) -> String {
        format!("Wybrano: {}/{}", self.state.borrow().selected.len(), MAX_SELECTION)
    }

    pub fn limit_warning(&self) -> Option<String> {
        (self.state.borrow().selected.len() >= MAX_SELECTION).then(|| {
            format!("Osiągnięto maksymalną liczbę wyborów ({})", MAX_SELECTION)
        })
    }

    /// Navigate to the dashboard with the chosen suggestions
    pub fn finish(&self) -> Option<Vec<SuggestionView>> {
        if !self.can_continue() {
            return None;
        }

        let chosen: Vec<SuggestionView> = {
            let state = self.state.borrow();
            state
                .selected
                .iter()
                .filter_map(|id| state.suggestions.iter().find(|s| &s.id == id).cloned())
                .collect()
        };
        tracing::info!(count = chosen.len(), "Onboarding finished");
        self.api.navigator().navigate(HOME_PATH);
        Some(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    const SUGGESTIONS: &str = r#"[
        {"id":"a","name":"Jedzenie","usage_count":120},
        {"id":"b","name":"Transport","usage_count":80},
        {"id":"c","name":"Rachunki","usage_count":75},
        {"id":"d","name":"Zdrowie","usage_count":40},
        {"id":"e","name":"Rozrywka","usage_count":33},
        {"id":"f","name":"Ubrania","usage_count":12}
    ]"#;

    fn picker(h: &Harness) -> SuggestionPicker {
        SuggestionPicker::new(h.api.clone(), Lifetime::new())
    }

    #[tokio::test]
    async fn test_fetch_maps_suggestions() {
        let h = Harness::new();
        let picker = picker(&h);
        h.transport.respond(200, SUGGESTIONS);

        picker.fetch_suggestions().await;

        let state = picker.state();
        assert_eq!(state.suggestions.len(), 6);
        assert_eq!(state.suggestions[0].usage_count, 120);
        assert!(!state.loading);
        assert_eq!(state.error_message, None);
        assert_eq!(
            h.transport.last_request().unwrap().url,
            "http://api.test/categories/initial-suggestions"
        );
    }

    #[tokio::test]
    async fn test_empty_and_failed_fetch_messages() {
        let h = Harness::new();
        let picker = picker(&h);

        h.transport.respond(200, "[]");
        picker.fetch_suggestions().await;
        assert_eq!(picker.state().error_message.as_deref(), Some(MSG_NO_SUGGESTIONS));

        h.transport.respond(503, "");
        picker.retry().await;
        assert_eq!(picker.state().error_message.as_deref(), Some(MSG_UNAVAILABLE));
        assert!(!picker.state().loading);
    }

    #[tokio::test]
    async fn test_disposed_view_ignores_result() {
        let h = Harness::new();
        let lifetime = Lifetime::new();
        let picker = SuggestionPicker::new(h.api.clone(), lifetime.clone());
        h.transport.respond(200, SUGGESTIONS);

        lifetime.dispose();
        picker.fetch_suggestions().await;

        assert!(picker.state().suggestions.is_empty());
    }

    #[test]
    fn test_selection_is_capped_at_five() {
        let h = Harness::new();
        let picker = picker(&h);
        assert!(!picker.can_continue());

        for id in ["a", "b", "c", "d", "e", "f"] {
            picker.toggle_selection(id);
        }

        assert_eq!(picker.state().selected, vec!["a", "b", "c", "d", "e"]);
        assert!(!picker.is_selected("f"));
        assert!(picker.can_continue());
        assert_eq!(picker.selection_label(), "Wybrano: 5/5");
        assert_eq!(
            picker.limit_warning().as_deref(),
            Some("Osiągnięto maksymalną liczbę wyborów (5)")
        );
    }

    #[test]
    fn test_toggle_deselects() {
        let h = Harness::new();
        let picker = picker(&h);
        picker.toggle_selection("a");
        assert!(picker.can_continue());
        picker.toggle_selection("a");
        assert!(!picker.can_continue());
        assert_eq!(picker.selection_label(), "Wybrano: 0/5");
        assert_eq!(picker.limit_warning(), None);
    }

    #[tokio::test]
    async fn test_finish_navigates_with_choice() {
        let h = Harness::new();
        let picker = picker(&h);
        assert_eq!(picker.finish(), None);
        assert!(h.navigator.current().is_none());

        h.transport.respond(200, SUGGESTIONS);
        picker.fetch_suggestions().await;
        picker.toggle_selection("c");
        picker.toggle_selection("a");

        let chosen = picker.finish().unwrap();
        let names: Vec<&str> = chosen.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rachunki", "Jedzenie"]);
        assert_eq!(h.navigator.current().as_deref(), Some("/dashboard"));
    }
}
