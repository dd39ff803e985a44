use clap::Parser;

/// Refresh /etc/pacman.d/mirrorlist from the Arch Linux mirror status.
///
/// Keeps only active https mirrors that are fully synced, score below 1 and
/// synced within the last 6 hours, in the order archlinux.org lists them.
/// The mirrorlist is left untouched when no mirror qualifies.
///
/// Log output is controlled with MIRRORLIST_LOG (error, warn, info, debug,
/// trace), MIRRORLIST_LOG_JSON=1 and NO_COLOR.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {}
