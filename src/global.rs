//! Process-wide default logger.
//!
//! Created on first use with built-in options. Access is serialized by a
//! `parking_lot::Mutex`; hold the guard only for the duration of one call.
//!
//! ```no_run
//! consol::global().lock().info(["service started"]).ok();
//! ```

use std::sync::LazyLock;

use parking_lot::Mutex;

use crate::logger::Consol;

static GLOBAL: LazyLock<Mutex<Consol>> = LazyLock::new(|| Mutex::new(Consol::new()));

pub fn global() -> &'static Mutex<Consol> {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_is_a_single_instance() {
        assert!(std::ptr::eq(global(), global()));
        let guard = global().lock();
        assert!(guard.is_enabled());
    }
}
