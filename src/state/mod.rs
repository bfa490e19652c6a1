mod collection;
mod shell;

pub(crate) use collection::{remove_entry, submit_entry};
pub(crate) use shell::{Section, Shell};

use crate::api::{ApiClient, EnvConfig};
use crate::models::SessionUser;
use crate::notify::{Notifier, Toasts};
use crate::storage::load_user_from_storage;
use leptos::prelude::*;

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: EnvConfig,
    pub api_client: RwSignal<ApiClient>,
    pub current_user: RwSignal<Option<SessionUser>>,

    /// Shared notification surface for every view.
    pub toasts: RwSignal<Toasts>,
}

impl AppState {
    pub fn new() -> Self {
        let config = EnvConfig::new();
        let api_client = ApiClient::from_config(&config);

        Self {
            config,
            api_client: RwSignal::new(api_client),
            current_user: RwSignal::new(load_user_from_storage()),
            toasts: RwSignal::new(Toasts::default()),
        }
    }
}

impl AppState {
    pub fn notifier(&self) -> Notifier {
        Notifier {
            toasts: self.toasts,
            toast_ms: self.config.toast_ms,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
