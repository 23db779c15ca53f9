//! Category Store
//!
//! Client-side cache of the user's categories. Mutations go to the API
//! first and are applied to the cache only on success. Every operation
//! records its failure as a single localized `error` string.

use std::cell::RefCell;
use std::rc::Rc;

use super::model::{is_duplicate, same_name, validate_name, CategoryError};
use crate::api::dto::{Category, CategoryPayload};
use crate::api::ApiClient;

/// Snapshot of the store state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryState {
    pub categories: Vec<Category>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct CategoryStore {
    api: Rc<ApiClient>,
    state: RefCell<CategoryState>,
}

impl CategoryStore {
    pub fn new(api: Rc<ApiClient>) -> Self {
        Self {
            api,
            state: RefCell::new(CategoryState::default()),
        }
    }

    pub fn state(&self) -> CategoryState {
        self.state.borrow().clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.borrow().categories.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn clear_error(&self) {
        self.state.borrow_mut().error = None;
    }

    pub fn find(&self, id: &str) -> Option<Category> {
        self.state
            .borrow()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Name of a category, if cached
    pub fn name_of(&self, id: &str) -> Option<String> {
        self.find(id).map(|c| c.name)
    }

    /// Replace the cache with the backend's list
    pub async fn fetch_all(&self) -> Result<(), CategoryError> {
        {
            let mut state = self.state.borrow_mut();
            state.loading = true;
            state.error = None;
        }

        let result = self.api.get::<Vec<Category>>("/categories").await;

        let mut state = self.state.borrow_mut();
        state.loading = false;
        match result {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), "Categories fetched");
                state.categories = categories;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch categories");
                let err = CategoryError::Fetch(e);
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Whether `name` is free, ignoring the category `exclude_id`
    ///
    /// A local collision is final. Otherwise the backend is asked; if that
    /// probe fails the name is assumed unique and the backend's own
    /// constraint decides on submit.
    pub async fn check_name_unique(&self, name: &str, exclude_id: Option<&str>) -> bool {
        if self.state.borrow().categories.is_empty() {
            match self.api.get::<Vec<Category>>("/categories").await {
                Ok(categories) => self.state.borrow_mut().categories = categories,
                Err(e) => tracing::warn!(error = %e, "Could not populate category cache"),
            }
        }

        if is_duplicate(&self.state.borrow().categories, name, exclude_id) {
            return false;
        }

        let params = [("name", name.trim().to_string())];
        match self
            .api
            .get_with_query::<Vec<Category>>("/categories", &params)
            .await
        {
            Ok(remote) => !remote
                .iter()
                .any(|c| same_name(&c.name, name) && Some(c.id.as_str()) != exclude_id),
            Err(e) => {
                tracing::warn!(error = %e, "Uniqueness check failed, assuming unique");
                true
            }
        }
    }

    pub async fn create(&self, payload: &CategoryPayload) -> Result<Category, CategoryError> {
        self.clear_error();
        let result = self.try_create(payload).await;
        self.record(result)
    }

    pub async fn update(
        &self,
        id: &str,
        payload: &CategoryPayload,
    ) -> Result<Category, CategoryError> {
        self.clear_error();
        let result = self.try_update(id, payload).await;
        self.record(result)
    }

    /// Delete on the backend, then drop from the cache
    pub async fn remove(&self, id: &str) -> Result<(), CategoryError> {
        self.clear_error();
        if self.find(id).is_some_and(|c| c.is_default) {
            return self.record(Err(CategoryError::DefaultProtected));
        }

        let result = match self.api.delete(&format!("/categories/{}", id)).await {
            Ok(()) => {
                self.state.borrow_mut().categories.retain(|c| c.id != id);
                tracing::info!(id, "Category deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!(id, error = %e, "Failed to delete category");
                Err(CategoryError::Delete(e))
            }
        };
        self.record(result)
    }

    async fn try_create(&self, payload: &CategoryPayload) -> Result<Category, CategoryError> {
        let name = validate_name(&payload.name)?;
        if !self.check_name_unique(name, None).await {
            return Err(CategoryError::Duplicate);
        }

        let created: Category = self
            .api
            .post("/categories", &CategoryPayload::new(name))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create category");
                if e.is_conflict() {
                    CategoryError::Duplicate
                } else {
                    CategoryError::Create(e)
                }
            })?;

        tracing::info!(id = %created.id, name = %created.name, "Category created");
        self.state.borrow_mut().categories.push(created.clone());
        Ok(created)
    }

    async fn try_update(
        &self,
        id: &str,
        payload: &CategoryPayload,
    ) -> Result<Category, CategoryError> {
        let name = validate_name(&payload.name)?;
        if !self.check_name_unique(name, Some(id)).await {
            return Err(CategoryError::Duplicate);
        }

        let updated: Category = self
            .api
            .put(&format!("/categories/{}", id), &CategoryPayload::new(name))
            .await
            .map_err(|e| {
                tracing::error!(id, error = %e, "Failed to update category");
                if e.is_conflict() {
                    CategoryError::Duplicate
                } else {
                    CategoryError::Update(e)
                }
            })?;

        tracing::info!(id, name = %updated.name, "Category updated");
        let mut state = self.state.borrow_mut();
        if let Some(slot) = state.categories.iter_mut().find(|c| c.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    fn record<T>(&self, result: Result<T, CategoryError>) -> Result<T, CategoryError> {
        if let Err(e) = &result {
            self.state.borrow_mut().error = Some(e.to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::testing::Harness;

    const SEED: &str = r#"[
        {"id":"1","name":"Jedzenie","is_default":true},
        {"id":"2","name":"Transport","is_default":false}
    ]"#;

    async fn seeded(h: &Harness) -> CategoryStore {
        let store = CategoryStore::new(h.api.clone());
        h.transport.respond(200, SEED);
        store.fetch_all().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_fetch_all_replaces_list() {
        let h = Harness::new();
        let store = seeded(&h).await;

        let state = store.state();
        assert_eq!(state.categories.len(), 2);
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(h.transport.urls(), vec!["http://api.test/categories"]);
    }

    #[tokio::test]
    async fn test_fetch_all_failure_sets_error() {
        let h = Harness::new();
        let store = CategoryStore::new(h.api.clone());
        h.transport.respond(500, "");

        let err = store.fetch_all().await.unwrap_err();
        assert!(matches!(err, CategoryError::Fetch(_)));
        assert_eq!(store.error().as_deref(), Some("Nie udało się pobrać kategorii"));
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn test_local_duplicate_rejected_without_create_call() {
        let h = Harness::new();
        let store = seeded(&h).await;

        let err = store
            .create(&CategoryPayload::new("  jedzenie "))
            .await
            .unwrap_err();

        assert_eq!(err, CategoryError::Duplicate);
        assert_eq!(store.error().as_deref(), Some("Kategoria o tej nazwie już istnieje"));
        // only the initial fetch went out
        assert_eq!(h.transport.request_count(), 1);
        assert_eq!(store.categories().len(), 2);
    }

    #[tokio::test]
    async fn test_rename_to_own_name_is_allowed() {
        let h = Harness::new();
        let store = seeded(&h).await;
        assert!(!store.check_name_unique("TRANSPORT", None).await);

        h.transport.respond(200, "[]");
        assert!(store.check_name_unique("TRANSPORT", Some("2")).await);
    }

    #[tokio::test]
    async fn test_create_appends_exactly_once() {
        let h = Harness::new();
        let store = seeded(&h).await;
        h.transport.respond(200, "[]");
        h.transport
            .respond(201, r#"{"id":"3","name":"Kino","is_default":false}"#);

        let created = store.create(&CategoryPayload::new(" Kino ")).await.unwrap();

        assert_eq!(created.id, "3");
        let names: Vec<String> = store.categories().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Jedzenie", "Transport", "Kino"]);
        assert_eq!(
            h.transport.urls()[1],
            "http://api.test/categories?name=Kino"
        );
        assert_eq!(
            h.transport.last_request().unwrap().body.as_deref(),
            Some(r#"{"name":"Kino"}"#)
        );
    }

    #[tokio::test]
    async fn test_remote_collision_blocks_create() {
        let h = Harness::new();
        let store = seeded(&h).await;
        h.transport
            .respond(200, r#"[{"id":"9","name":"kino","is_default":false}]"#);

        let err = store.create(&CategoryPayload::new("Kino")).await.unwrap_err();
        assert_eq!(err, CategoryError::Duplicate);
        assert_eq!(h.transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_probe_failure_fails_open() {
        let h = Harness::new();
        let store = seeded(&h).await;
        h.transport.fail("timeout");
        h.transport
            .respond(201, r#"{"id":"3","name":"Kino","is_default":false}"#);

        assert!(store.create(&CategoryPayload::new("Kino")).await.is_ok());
        assert_eq!(store.categories().len(), 3);
    }

    #[tokio::test]
    async fn test_conflict_from_api_maps_to_duplicate() {
        let h = Harness::new();
        let store = seeded(&h).await;
        h.transport.respond(200, "[]");
        h.transport.respond(409, r#"{"error":"exists"}"#);

        let err = store.create(&CategoryPayload::new("Kino")).await.unwrap_err();
        assert_eq!(err, CategoryError::Duplicate);
        assert_eq!(store.error().as_deref(), Some("Kategoria o tej nazwie już istnieje"));
        assert_eq!(store.categories().len(), 2);
    }

    #[tokio::test]
    async fn test_other_create_failure_is_generic() {
        let h = Harness::new();
        let store = seeded(&h).await;
        h.transport.respond(200, "[]");
        h.transport.respond(500, "");

        let err = store.create(&CategoryPayload::new("Kino")).await.unwrap_err();
        assert_eq!(
            err,
            CategoryError::Create(ApiError::Status {
                status: 500,
                message: None,
                field: None
            })
        );
        assert_eq!(store.error().as_deref(), Some("Nie udało się utworzyć kategorii"));
    }

    #[tokio::test]
    async fn test_invalid_name_blocks_everything() {
        let h = Harness::new();
        let store = CategoryStore::new(h.api.clone());

        let err = store.create(&CategoryPayload::new("   ")).await.unwrap_err();
        assert_eq!(err, CategoryError::EmptyName);
        let err = store
            .create(&CategoryPayload::new("x".repeat(31)))
            .await
            .unwrap_err();
        assert_eq!(err, CategoryError::NameTooLong);
        assert_eq!(h.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_cache_is_populated_before_check() {
        let h = Harness::new();
        let store = CategoryStore::new(h.api.clone());
        h.transport.respond(200, SEED);

        assert!(!store.check_name_unique("Jedzenie", None).await);
        assert_eq!(store.categories().len(), 2);
        assert_eq!(h.transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_populate_does_not_set_error() {
        let h = Harness::new();
        let store = CategoryStore::new(h.api.clone());
        h.transport.fail("offline");
        h.transport.respond(200, "[]");

        assert!(store.check_name_unique("Kino", None).await);
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let h = Harness::new();
        let store = seeded(&h).await;
        h.transport.respond(200, "[]");
        h.transport
            .respond(200, r#"{"id":"2","name":"Dojazdy","is_default":false}"#);

        store
            .update("2", &CategoryPayload::new("Dojazdy"))
            .await
            .unwrap();

        assert_eq!(store.name_of("2").as_deref(), Some("Dojazdy"));
        assert_eq!(store.categories().len(), 2);
        let req = h.transport.last_request().unwrap();
        assert_eq!(req.url, "http://api.test/categories/2");
    }

    #[tokio::test]
    async fn test_update_failure_message() {
        let h = Harness::new();
        let store = seeded(&h).await;
        h.transport.respond(200, "[]");
        h.transport.fail("reset");

        assert!(store.update("2", &CategoryPayload::new("Dojazdy")).await.is_err());
        assert_eq!(
            store.error().as_deref(),
            Some("Nie udało się zaktualizować kategorii")
        );
        assert_eq!(store.name_of("2").as_deref(), Some("Transport"));
    }

    #[tokio::test]
    async fn test_remove_drops_category() {
        let h = Harness::new();
        let store = seeded(&h).await;
        h.transport.respond(204, "");

        store.remove("2").await.unwrap();
        assert!(store.find("2").is_none());
        assert_eq!(store.categories().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_failure_leaves_list() {
        let h = Harness::new();
        let store = seeded(&h).await;
        h.transport.respond(500, "");

        assert!(store.remove("2").await.is_err());
        assert_eq!(store.categories().len(), 2);
        assert_eq!(store.error().as_deref(), Some("Nie udało się usunąć kategorii"));
    }

    #[tokio::test]
    async fn test_default_category_cannot_be_removed() {
        let h = Harness::new();
        let store = seeded(&h).await;

        let err = store.remove("1").await.unwrap_err();
        assert_eq!(err, CategoryError::DefaultProtected);
        assert_eq!(h.transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_name_check_against_single_category() {
        let h = Harness::new();
        let store = CategoryStore::new(h.api.clone());
        h.transport
            .respond(200, r#"[{"id":"1","name":"Jedzenie","is_default":true}]"#);
        store.fetch_all().await.unwrap();

        assert!(!store.check_name_unique("jedzenie", None).await);
        assert_eq!(h.transport.request_count(), 1);

        h.transport
            .respond(200, r#"[{"id":"1","name":"Jedzenie","is_default":true}]"#);
        assert!(store.check_name_unique("Transport", None).await);
        assert_eq!(
            h.transport.last_request().unwrap().url,
            "http://api.test/categories?name=Transport"
        );
    }

    #[tokio::test]
    async fn test_jedzenie_transport_scenario() {
        let h = Harness::new();
        let store = seeded(&h).await;

        // duplicate in different case is refused
        assert_eq!(
            store.create(&CategoryPayload::new("TRANSPORT")).await,
            Err(CategoryError::Duplicate)
        );

        // a new name goes through and appears once
        h.transport.respond(200, "[]");
        h.transport
            .respond(201, r#"{"id":"3","name":"Rozrywka","is_default":false}"#);
        store
            .create(&CategoryPayload::new("Rozrywka"))
            .await
            .unwrap();

        // then it is removed
        h.transport.respond(204, "");
        store.remove("3").await.unwrap();

        let names: Vec<String> = store.categories().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Jedzenie", "Transport"]);
        assert_eq!(store.error(), None);
    }
}
