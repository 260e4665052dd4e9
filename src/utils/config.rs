// Centralized configuration for Herald Bot

/// Role required to open the admin panel or press any of its buttons.
/// Compiled in on purpose: the panel has to stay reachable even after the
/// persisted configuration is wiped or mangled by hand.
pub const ADMIN_ROLE_ID: u64 = 1269491541492371588;

/// Default path of the persisted configuration record
pub const CONFIG_FILE: &str = "config.json";

/// Env var overriding [`CONFIG_FILE`]
pub const CONFIG_FILE_ENV: &str = "HERALD_CONFIG_FILE";
