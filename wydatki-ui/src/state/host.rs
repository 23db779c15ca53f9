//! Browser Ports
//!
//! `localStorage`, router navigation and timers behind the core traits.

use std::time::Duration;

use async_trait::async_trait;
use leptos::*;

use wydatki::clock::Clock;
use wydatki::session::{KeyValueStore, Navigator, StoreError};

/// `window.localStorage`
pub struct LocalStorage;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("localStorage is not available".to_string())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        storage()
            .ok_or_else(unavailable)?
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        storage()
            .ok_or_else(unavailable)?
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

/// Queues a route change; [`crate::app::NavigationBridge`] performs it
/// through the router.
pub struct BrowserNavigator {
    pending: RwSignal<Option<String>>,
}

impl BrowserNavigator {
    pub fn new(pending: RwSignal<Option<String>>) -> Self {
        Self { pending }
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        self.pending.set(Some(path.to_string()));
    }
}

/// `Date.now()` and `setTimeout`
pub struct BrowserClock;

#[async_trait(?Send)]
impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
