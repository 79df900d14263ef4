#[cfg(target_arch = "wasm32")]
use web_sys::{Storage, Window};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const CURRENT_USER_KEY: &str = "current_user";

#[cfg(target_arch = "wasm32")]
pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

#[cfg(target_arch = "wasm32")]
pub fn local_storage() -> Result<Storage, String> {
    window()?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

#[cfg(target_arch = "wasm32")]
pub fn get_item(key: &str) -> Option<String> {
    local_storage().ok()?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn set_item(key: &str, value: &str) -> Result<(), String> {
    local_storage()?
        .set_item(key, value)
        .map_err(|_| format!("Failed to store {}", key))
}

#[cfg(target_arch = "wasm32")]
pub fn remove_item(key: &str) {
    if let Ok(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

// Host builds (tests, SSR) have no browser storage; a per-thread map stands in.
#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static MEMORY: std::cell::RefCell<std::collections::HashMap<String, String>> =
        std::cell::RefCell::new(std::collections::HashMap::new());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_item(key: &str) -> Option<String> {
    MEMORY.with(|map| map.borrow().get(key).cloned())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_item(key: &str, value: &str) -> Result<(), String> {
    MEMORY.with(|map| {
        map.borrow_mut().insert(key.to_string(), value.to_string());
    });
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove_item(key: &str) {
    MEMORY.with(|map| {
        map.borrow_mut().remove(key);
    });
}

pub fn access_token() -> Option<String> {
    get_item(ACCESS_TOKEN_KEY).filter(|token| !token.trim().is_empty())
}

pub fn clear_session() {
    remove_item(ACCESS_TOKEN_KEY);
    remove_item(CURRENT_USER_KEY);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_treated_as_missing() {
        set_item(ACCESS_TOKEN_KEY, "   ").unwrap();
        assert!(access_token().is_none());
        set_item(ACCESS_TOKEN_KEY, "abc").unwrap();
        assert_eq!(access_token().as_deref(), Some("abc"));
        clear_session();
        assert!(access_token().is_none());
    }
}
