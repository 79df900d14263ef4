fn main() {
    #[cfg(target_arch = "wasm32")]
    dutydesk_frontend::run();
}
