//! Constants used throughout mirrorlist-core.

/// Endpoint publishing the status of every registered Arch Linux mirror.
pub const STATUS_URL: &str = "https://www.archlinux.org/mirrors/status/json/";

/// Pacman mirrorlist overwritten on every successful run.
pub const MIRRORLIST_PATH: &str = "/etc/pacman.d/mirrorlist";

/// User agent sent with the status request.
pub const USER_AGENT: &str = concat!("pkgforge/mirrorlist-updater/", env!("CARGO_PKG_VERSION"));

/// Oldest acceptable sync, in hours. Lower is better.
pub const MAX_LAST_SYNC_HOURS: i64 = 6;

/// Scores at or above this value are rejected. Lower is better.
pub const MAX_SCORE: f64 = 1.0;

/// Minimum fraction of the package set a mirror must carry (1.0 = 100%).
pub const MINIMUM_COMPLETION_PERCENTAGE: f64 = 1.0;

/// The only protocol written to the mirrorlist.
pub const REQUIRED_PROTOCOL: &str = "https";

/// Hostnames known to serve slow or broken content.
pub const URL_DENYLIST: [&str; 2] = ["mirrors.lug.mtu.edu", "mirror.rackspace.com"];

/// Path appended to each mirror URL. `$repo` and `$arch` are expanded by pacman.
pub const SERVER_PATH_SUFFIX: &str = "$repo/os/$arch";

/// Upper bound on the status document size.
pub const MAX_STATUS_BODY_SIZE: u64 = 32 * 1024 * 1024;

/// The only operating system family pacman runs on.
pub const SUPPORTED_OS: &str = "linux";
