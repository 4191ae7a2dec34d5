pub mod app_loop;
pub mod board_text;
pub mod config_file;
pub mod seed;
pub mod session_record_file;

use breach_core::SessionStatus;

pub const APP_NAME: &str = "NetBreach";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Map a `SessionStatus` to its reason code string.
pub fn reason_code(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Playing => "PLAYING",
        SessionStatus::Won => "WIN_BREACH",
        SessionStatus::Lost => "LOSS_TIMEOUT",
        SessionStatus::Cancelled => "CANCELLED",
    }
}
