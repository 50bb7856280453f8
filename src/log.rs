//! Logger setup shared by the CLI and the browser build.

#[cfg(not(target_arch = "wasm32"))]
use log::LevelFilter;

/// Environment variable that switches the CLI to debug logging.
pub const DEBUG_ENV_VAR: &str = "LETTERS_DEBUG";

/// Initialize logging for letters.
///
/// - **Native:** `env_logger` at `Debug` or `Info`, with `RUST_LOG` taking precedence when set.
/// - **WASM:** `console_log` at `Debug` or `Info`; a failed init is reported to the
///   browser console and logging stays off.
///
/// Calling this twice is harmless: the second initialization is ignored.
pub fn init_logger(debug_enabled: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let level = if debug_enabled { log::Level::Debug } else { log::Level::Info };

        if let Err(e) = console_log::init_with_level(level) {
            let msg = format!("console_log init failed: {e}; letters will not log");
            web_sys::console::error_1(&msg.into());
            return;
        }
        log::info!("letters logging to the console at {level:?}");
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let level = if debug_enabled { LevelFilter::Debug } else { LevelFilter::Info };

        let mut builder = env_logger::Builder::new();
        builder
            .filter(None, level)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false);

        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        if builder.try_init().is_ok() {
            log::debug!("letters logging to stderr at {level:?}");
        }
    }
}

/// `true` when [`DEBUG_ENV_VAR`] is set (to anything).
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn debug_requested() -> bool {
    std::env::var_os(DEBUG_ENV_VAR).is_some()
}
