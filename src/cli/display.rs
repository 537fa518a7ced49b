//! Display utilities for the focus timer CLI.
//!
//! This module provides formatted output for:
//! - The full timer card (badges, label, countdown, progress, controls)
//! - A one-line status for per-second updates
//! - Event messages and help
//! - Error messages

use crate::timer::TimerEvent;
use crate::types::{Mode, TimerState};

/// Width of the text progress bar, in cells.
const PROGRESS_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Renders the full timer card.
    pub fn screen(state: &TimerState) -> String {
        let rule = "─────────────────────────────";
        let mut out = String::new();

        out.push_str(&format!("{}\n", Self::mode_badges(state.mode())));
        out.push_str(&format!("{}\n", state.mode().label()));
        out.push_str(&format!("  {}\n", state.formatted_time()));
        out.push_str(&format!("{}\n", Self::progress_bar(state.progress())));
        out.push_str(&format!(
            "[s] {}   [r] リセット\n",
            Self::run_button_label(state.is_running())
        ));
        out.push_str(&format!("{}\n", rule));
        out.push_str(&format!("完了セッション数: {}\n", state.sessions()));
        out.push_str("ヒント: 作業に集中して、休憩を忘れずに！\n");
        out
    }

    /// Renders the one-line status used between full renders.
    pub fn status_line(state: &TimerState) -> String {
        let icon = if state.is_running() { ">" } else { "||" };
        format!(
            "{} {} {} {}",
            icon,
            state.mode().label(),
            state.formatted_time(),
            Self::progress_bar(state.progress())
        )
    }

    /// Mode selector with the active mode bracketed.
    pub fn mode_badges(active: Mode) -> String {
        [Mode::Work, Mode::ShortBreak]
            .iter()
            .map(|mode| {
                let key = match mode {
                    Mode::Work => 'w',
                    Mode::ShortBreak => 'b',
                };
                if *mode == active {
                    format!("[{}:{}]", key, mode.badge_label())
                } else {
                    format!(" {}:{} ", key, mode.badge_label())
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Label of the run/pause control.
    pub fn run_button_label(is_running: bool) -> &'static str {
        if is_running {
            "一時停止"
        } else {
            "開始"
        }
    }

    /// Renders `progress` (0 to 100) as a fixed-width bar with a percentage.
    pub fn progress_bar(progress: f64) -> String {
        let clamped = progress.clamp(0.0, 100.0);
        let filled = ((clamped / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
        format!(
            "[{}{}] {:>3.0}%",
            "#".repeat(filled),
            "-".repeat(PROGRESS_WIDTH - filled),
            clamped
        )
    }

    /// Message shown for an event, if it deserves one.
    pub fn event_message(event: &TimerEvent) -> Option<String> {
        match event {
            TimerEvent::WorkCompleted { sessions } => Some(format!(
                "* 作業セッションが完了しました (完了セッション数: {})",
                sessions
            )),
            TimerEvent::BreakCompleted => {
                Some("* 休憩が終わりました。作業に戻りましょう".to_string())
            }
            _ => None,
        }
    }

    /// Key reference for the interactive session.
    pub fn help() -> &'static str {
        "操作: [s/Enter] 開始/一時停止  [r] リセット  [w] 作業  [b] 休憩  [h] ヘルプ  [q] 終了"
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
