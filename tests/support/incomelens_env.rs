use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

use incomelens::app_dirs::CONFIG_HOME_ENV;
use incomelens::config::API_BASE_ENV;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the app directory at a temp folder and hides any API base override.
pub struct IncomeLensEnvGuard {
    previous_home: Option<String>,
    previous_api_base: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl IncomeLensEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous_home = std::env::var(CONFIG_HOME_ENV).ok();
        let previous_api_base = std::env::var(API_BASE_ENV).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
            std::env::remove_var(API_BASE_ENV);
        }
        Self {
            previous_home,
            previous_api_base,
            _lock: lock,
        }
    }
}

impl Drop for IncomeLensEnvGuard {
    fn drop(&mut self) {
        restore(CONFIG_HOME_ENV, self.previous_home.take());
        restore(API_BASE_ENV, self.previous_api_base.take());
    }
}

fn restore(key: &str, value: Option<String>) {
    // SAFETY: tests run under a global lock to prevent concurrent env mutations.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}
