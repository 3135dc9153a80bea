use std::sync::{Mutex, OnceLock};

use crate::stream::Endian;

#[derive(Debug, Clone, Copy)]
pub struct IoOptions {
    pub endian: Endian,
}

impl Default for IoOptions {
    // Reads the process-wide default, not a hardcoded one, so
    // `set_default_endian` actually governs newly constructed files.
    fn default() -> Self {
        IoOptions { endian: default_endian() }
    }
}

fn default_endian_lock() -> &'static Mutex<Endian> {
    static LOCK: OnceLock<Mutex<Endian>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(Endian::Big))
}

// Read once at construction; never consulted again afterward.
pub fn default_endian() -> Endian {
    *default_endian_lock().lock().expect("default endian lock poisoned")
}

pub fn set_default_endian(endian: Endian) {
    *default_endian_lock().lock().expect("default endian lock poisoned") = endian;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endian_round_trips_through_setter() {
        set_default_endian(Endian::Little);
        assert_eq!(default_endian(), Endian::Little);
        set_default_endian(Endian::Big);
        assert_eq!(default_endian(), Endian::Big);
    }

    #[test]
    fn io_options_default_follows_the_process_wide_default() {
        set_default_endian(Endian::Little);
        assert_eq!(IoOptions::default().endian, Endian::Little);
        set_default_endian(Endian::Big);
        assert_eq!(IoOptions::default().endian, Endian::Big);
    }
}
