//! VoucherFinder browser front-end.
//!
//! Client-side rendered with Leptos. Searches, copies and verifications go
//! through the `voucher-search` crate; this crate only renders its state.

mod app;
mod clipboard;

fn main() {
    console_error_panic_hook::set_once();
    // tracing events reach the console through its `log` bridge
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"console logger already installed".into());
    }
    tracing::info!(base_url = %voucher_data::ApiConfig::from_env().base_url, "starting VoucherFinder");

    leptos::mount::mount_to_body(app::App);
}
