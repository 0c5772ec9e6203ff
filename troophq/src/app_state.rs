use std::sync::Arc;

use tracing::info;

use crate::services::{LoginAttemptGuard, PrivilegeService, SessionService};
use crate::settings::config::Settings;
use crate::stop_flag;

#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub stop_flag: stop_flag::StopFlag,
    pub login_guard: Arc<LoginAttemptGuard>,
    pub privileges: Arc<PrivilegeService>,
    pub sessions: SessionService,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub async fn new() -> anyhow::Result<SharedAppState> {
        let settings = Settings::new()?;
        Self::from_settings(settings).await
    }

    /// Build the state from already loaded settings. Fails fast on invalid
    /// lockout/rate-limit settings or an incomplete privilege matrix.
    pub async fn from_settings(settings: Settings) -> anyhow::Result<SharedAppState> {
        settings.lockout.validate()?;
        settings.rate_limiting.validate()?;

        let stop_flag = stop_flag::StopFlag::new();
        stop_flag::register_signal_handler(&stop_flag);

        let privileges = Arc::new(PrivilegeService::new(&settings.privileges_file).await?);
        let login_guard = Arc::new(LoginAttemptGuard::new(&settings.lockout));
        let sessions = SessionService::new(settings.api.session_ttl_minutes);

        info!(
            "App state initialized with {} configured account(s)",
            settings.api.users.len()
        );

        Ok(Arc::new(AppState {
            settings,
            stop_flag,
            login_guard,
            privileges,
            sessions,
        }))
    }
}
