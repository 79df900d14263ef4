pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Installs logging and the panic hook, starts loading runtime config and
/// mounts the router.
pub fn run() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger was already initialised".into());
    }
    log::info!("Starting DutyDesk frontend");

    wasm_bindgen_futures::spawn_local(async move {
        config::init().await;
        log::debug!("Runtime config initialized");
    });

    router::mount_app();
}
