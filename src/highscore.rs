//! Best score persisted to LocalStorage
//!
//! A single integer under a fixed key. Anything absent, corrupt or
//! unparseable degrades to 0 - there is no error path the game observes.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "flappy-bird-high-score";

/// Load the stored high score, or 0 if none is stored
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            match raw.trim().parse::<u32>() {
                Ok(score) => {
                    log::info!("Loaded high score: {score}");
                    return score;
                }
                Err(_) => log::warn!("Stored high score is unreadable, starting from 0"),
            }
        }
    }

    0
}

/// Persist a new high score. Storage failures are swallowed; the
/// in-memory score is still authoritative for the session.
#[cfg(target_arch = "wasm32")]
pub fn save(score: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        let _ = storage.set_item(STORAGE_KEY, &score.to_string());
        log::info!("High score saved: {score}");
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_score: u32) {
    // No-op for native
}
