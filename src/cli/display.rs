//! Display utilities for the focus dashboard CLI.
//!
//! This module provides formatted output for:
//! - The dashboard overview
//! - Timer command results and status
//! - Task list
//! - Display settings, name and focus
//! - Error messages

use chrono::NaiveTime;

use crate::cycle::format_clock;
use crate::store::{BackgroundType, DashboardSettings, Task};
use crate::types::{CyclePhase, IpcResponse, ResponseData};

/// Number of id characters shown in task listings
const SHORT_ID_LEN: usize = 8;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    // ------------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------------

    /// Shows the dashboard overview.
    pub fn show_dashboard(
        now: NaiveTime,
        name: Option<&str>,
        focus: Option<&str>,
        tasks: &[Task],
        timer: Option<&ResponseData>,
    ) {
        for line in Self::dashboard_lines(now, name, focus, tasks, timer) {
            println!("{}", line);
        }
    }

    /// Builds the dashboard lines for the given wall-clock time.
    ///
    /// `timer` is `None` when the daemon could not be reached.
    pub fn dashboard_lines(
        now: NaiveTime,
        name: Option<&str>,
        focus: Option<&str>,
        tasks: &[Task],
        timer: Option<&ResponseData>,
    ) -> Vec<String> {
        let greeting = match name {
            Some(name) => format!("こんにちは、{}さん！", name),
            None => "こんにちは！ ('focusboard name <名前>' で名前を設定できます)".to_string(),
        };

        let mut lines = vec![
            now.format("%H:%M:%S").to_string(),
            greeting,
            "─────────────────────────────".to_string(),
            format!("今日のフォーカス: {}", focus.unwrap_or("(未設定)")),
        ];

        if tasks.is_empty() {
            lines.push("タスク: なし".to_string());
        } else {
            let done = tasks.iter().filter(|task| task.completed).count();
            lines.push(format!("タスク: {}/{} 完了", done, tasks.len()));
        }

        let timer_line = match timer {
            Some(ResponseData {
                phase: Some(phase),
                remaining_seconds: Some(remaining),
                is_running,
                ..
            }) => {
                let running = if *is_running == Some(true) {
                    "実行中"
                } else {
                    "一時停止中"
                };
                format!(
                    "タイマー: {} {} ({})",
                    Self::phase_label(*phase),
                    format_clock(*remaining),
                    running
                )
            }
            _ => "タイマー: 未起動 ('focusboard daemon' で起動できます)".to_string(),
        };
        lines.push(timer_line);

        lines
    }

    // ------------------------------------------------------------------------
    // Timer
    // ------------------------------------------------------------------------

    /// Shows the result of the start command.
    pub fn show_start_success(response: &IpcResponse) {
        println!("> {}", response.message);
        Self::show_remaining(response.data.as_ref());
    }

    /// Shows the result of the pause command.
    pub fn show_pause_success(response: &IpcResponse) {
        println!("|| {}", response.message);
        Self::show_remaining(response.data.as_ref());
    }

    /// Shows the result of the reset command.
    pub fn show_reset_success(response: &IpcResponse) {
        println!("[] {}", response.message);
        Self::show_remaining(response.data.as_ref());
    }

    /// Shows the result of the configure command.
    pub fn show_configure_success(response: &IpcResponse) {
        println!("* {}", response.message);
        if let Some(config) = response.data.as_ref().and_then(|data| data.config) {
            println!(
                "  作業 {}分 / 休憩 {}分 / 長い休憩 {}分 ({}セッションごと)",
                config.work_minutes,
                config.break_minutes,
                config.long_break_minutes,
                config.sessions_before_long_break
            );
        }
    }

    /// Shows the current timer status.
    pub fn show_status(response: &IpcResponse) {
        for line in Self::status_lines(response.data.as_ref()) {
            println!("{}", line);
        }
    }

    fn status_lines(data: Option<&ResponseData>) -> Vec<String> {
        let mut lines = vec![
            "ポモドーロタイマー ステータス".to_string(),
            "─────────────────────────────".to_string(),
        ];

        let Some(data) = data else {
            lines.push("タイマーの状態を取得できませんでした".to_string());
            return lines;
        };

        if let Some(phase) = data.phase {
            let running = match data.is_running {
                Some(true) => "実行中",
                _ => "一時停止中",
            };
            lines.push(format!("フェーズ: {} ({})", Self::phase_label(phase), running));
        }
        if let Some(remaining) = data.remaining_seconds {
            lines.push(format!("残り時間: {}", format_clock(remaining)));
        }
        if let Some(completed) = data.completed_sessions {
            match data.config {
                Some(config) => lines.push(format!(
                    "完了セッション: {}/{}",
                    completed, config.sessions_before_long_break
                )),
                None => lines.push(format!("完了セッション: {}", completed)),
            }
        }

        lines
    }

    fn show_remaining(data: Option<&ResponseData>) {
        let Some(data) = data else { return };
        if let Some(phase) = data.phase {
            println!("  フェーズ: {}", Self::phase_label(phase));
        }
        if let Some(remaining) = data.remaining_seconds {
            println!("  残り時間: {}", format_clock(remaining));
        }
    }

    /// Returns the user-facing label of a phase.
    pub fn phase_label(phase: CyclePhase) -> &'static str {
        match phase {
            CyclePhase::Work => "作業中",
            CyclePhase::ShortBreak => "短い休憩中",
            CyclePhase::LongBreak => "長い休憩中",
        }
    }

    // ------------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------------

    /// Shows the task list.
    pub fn show_tasks(tasks: &[Task]) {
        for line in Self::task_lines(tasks) {
            println!("{}", line);
        }
    }

    fn task_lines(tasks: &[Task]) -> Vec<String> {
        if tasks.is_empty() {
            return vec!["タスクはありません".to_string()];
        }

        let done = tasks.iter().filter(|task| task.completed).count();
        let mut lines = vec![format!("タスク ({}/{} 完了)", done, tasks.len())];
        for task in tasks {
            lines.push(Self::task_line(task));
            if let Some(description) = &task.description {
                lines.push(format!("           {}", description));
            }
        }
        lines
    }

    fn task_line(task: &Task) -> String {
        let mark = if task.completed { "[x]" } else { "[ ]" };
        format!("{} {} {}", mark, Self::short_id(&task.id), task.title)
    }

    fn short_id(id: &str) -> &str {
        id.char_indices()
            .nth(SHORT_ID_LEN)
            .map_or(id, |(index, _)| &id[..index])
    }

    /// Shows a newly added task.
    pub fn show_task_added(task: &Task) {
        println!("* タスクを追加しました");
        println!("  {}", Self::task_line(task));
    }

    /// Shows a task whose completion flag was flipped.
    pub fn show_task_toggled(task: &Task) {
        if task.completed {
            println!("* タスクを完了にしました");
        } else {
            println!("* タスクを未完了に戻しました");
        }
        println!("  {}", Self::task_line(task));
    }

    /// Shows an edited task.
    pub fn show_task_updated(task: &Task) {
        println!("* タスクを更新しました");
        println!("  {}", Self::task_line(task));
    }

    /// Shows a removed task.
    pub fn show_task_removed(task: &Task) {
        println!("* タスクを削除しました: {}", task.title);
    }

    // ------------------------------------------------------------------------
    // Settings, name and focus
    // ------------------------------------------------------------------------

    /// Shows display settings.
    pub fn show_settings(settings: &DashboardSettings) {
        for line in Self::settings_lines(settings) {
            println!("{}", line);
        }
    }

    fn settings_lines(settings: &DashboardSettings) -> Vec<String> {
        let background = match settings.background_type {
            BackgroundType::Gradient => match settings.gradient_preset() {
                Some(preset) => format!("グラデーション ({})", preset.name),
                None => format!("グラデーション ({})", settings.background_value),
            },
            BackgroundType::Image => format!("画像 ({})", settings.background_value),
        };
        let glass = if settings.glass_effect {
            format!("オン (ぼかし {}px)", settings.blur_amount)
        } else {
            "オフ".to_string()
        };

        vec![
            "表示設定".to_string(),
            "─────────────────────────────".to_string(),
            format!("背景: {}", background),
            format!("カラー: {}", settings.color_scheme),
            format!("グラス効果: {}", glass),
        ]
    }

    /// Shows a confirmation after settings were saved.
    pub fn show_settings_saved(settings: &DashboardSettings) {
        println!("* 表示設定を保存しました");
        Self::show_settings(settings);
    }

    /// Shows the stored name.
    pub fn show_name(name: Option<&str>) {
        match name {
            Some(name) => println!("名前: {}", name),
            None => println!("名前は設定されていません"),
        }
    }

    /// Shows a confirmation after the name was stored.
    pub fn show_name_saved(name: &str) {
        println!("* 名前を保存しました: {}", name);
    }

    /// Shows today's focus.
    pub fn show_focus(focus: Option<&str>) {
        match focus {
            Some(focus) => println!("今日のフォーカス: {}", focus),
            None => println!("今日のフォーカスは設定されていません"),
        }
    }

    /// Shows a confirmation after the focus was stored or cleared.
    pub fn show_focus_saved(focus: Option<&str>) {
        match focus {
            Some(focus) => println!("* 今日のフォーカスを設定しました: {}", focus),
            None => println!("* 今日のフォーカスをクリアしました"),
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GRADIENT_PRESETS;
    use crate::types::{CycleConfig, CycleState};

    fn idle_response(message: &str) -> IpcResponse {
        let config = CycleConfig::default();
        IpcResponse::success(
            message,
            Some(ResponseData::from_cycle(&CycleState::new(&config), &config)),
        )
    }

    fn task(id: &str, title: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            completed,
        }
    }

    // ------------------------------------------------------------------------
    // Dashboard Tests
    // ------------------------------------------------------------------------

    mod dashboard_tests {
        use super::*;

        fn at(hour: u32, minute: u32, second: u32) -> NaiveTime {
            NaiveTime::from_hms_opt(hour, minute, second).unwrap()
        }

        #[test]
        fn test_dashboard_lines_full() {
            let response = idle_response("");
            let tasks = vec![task("1", "a", true), task("2", "b", false), task("3", "c", true)];

            let lines = Display::dashboard_lines(
                at(9, 5, 7),
                Some("Kai"),
                Some("Ship the release"),
                &tasks,
                response.data.as_ref(),
            );

            assert_eq!(lines[0], "09:05:07");
            assert_eq!(lines[1], "こんにちは、Kaiさん！");
            assert!(lines.contains(&"今日のフォーカス: Ship the release".to_string()));
            assert!(lines.contains(&"タスク: 2/3 完了".to_string()));
            assert!(lines.contains(&"タイマー: 作業中 25:00 (一時停止中)".to_string()));
        }

        #[test]
        fn test_dashboard_lines_first_run() {
            let lines = Display::dashboard_lines(at(23, 59, 59), None, None, &[], None);

            assert_eq!(lines[0], "23:59:59");
            assert!(lines[1].starts_with("こんにちは！"));
            assert!(lines.contains(&"今日のフォーカス: (未設定)".to_string()));
            assert!(lines.contains(&"タスク: なし".to_string()));
            assert!(lines.last().unwrap().contains("未起動"));
        }

        #[test]
        fn test_dashboard_lines_running_break() {
            let data = ResponseData {
                phase: Some(CyclePhase::ShortBreak),
                remaining_seconds: Some(61),
                is_running: Some(true),
                completed_sessions: Some(1),
                config: None,
            };
            let lines = Display::dashboard_lines(at(0, 0, 0), None, None, &[], Some(&data));

            assert_eq!(lines[0], "00:00:00");
            assert_eq!(lines.last().unwrap(), "タイマー: 短い休憩中 01:01 (実行中)");
        }

        #[test]
        fn test_show_dashboard() {
            // Should not panic
            Display::show_dashboard(at(12, 0, 0), Some("Kai"), None, &[], None);
        }
    }

    // ------------------------------------------------------------------------
    // Status Tests
    // ------------------------------------------------------------------------

    mod status_tests {
        use super::*;

        #[test]
        fn test_status_lines_idle() {
            let response = idle_response("");
            let lines = Display::status_lines(response.data.as_ref());

            assert!(lines.contains(&"フェーズ: 作業中 (一時停止中)".to_string()));
            assert!(lines.contains(&"残り時間: 25:00".to_string()));
            assert!(lines.contains(&"完了セッション: 0/4".to_string()));
        }

        #[test]
        fn test_status_lines_running_break() {
            let data = ResponseData {
                phase: Some(CyclePhase::LongBreak),
                remaining_seconds: Some(59),
                is_running: Some(true),
                completed_sessions: Some(4),
                config: None,
            };
            let lines = Display::status_lines(Some(&data));

            assert!(lines.contains(&"フェーズ: 長い休憩中 (実行中)".to_string()));
            assert!(lines.contains(&"残り時間: 00:59".to_string()));
            assert!(lines.contains(&"完了セッション: 4".to_string()));
        }

        #[test]
        fn test_status_lines_no_data() {
            let lines = Display::status_lines(None);
            assert_eq!(lines.len(), 3);
        }

        #[test]
        fn test_phase_labels() {
            assert_eq!(Display::phase_label(CyclePhase::Work), "作業中");
            assert_eq!(Display::phase_label(CyclePhase::ShortBreak), "短い休憩中");
            assert_eq!(Display::phase_label(CyclePhase::LongBreak), "長い休憩中");
        }

        #[test]
        fn test_show_timer_results() {
            // Should not panic
            Display::show_start_success(&idle_response("タイマーを開始しました"));
            Display::show_pause_success(&idle_response("タイマーを一時停止しました"));
            Display::show_reset_success(&idle_response("タイマーをリセットしました"));
            Display::show_configure_success(&idle_response("設定を更新しました"));
            Display::show_status(&idle_response(""));
            Display::show_status(&IpcResponse::success("", None));
        }
    }

    // ------------------------------------------------------------------------
    // Task Tests
    // ------------------------------------------------------------------------

    mod task_tests {
        use super::*;

        #[test]
        fn test_task_lines_empty() {
            assert_eq!(Display::task_lines(&[]), vec!["タスクはありません"]);
        }

        #[test]
        fn test_task_lines_with_progress() {
            let mut with_description = task("0123456789abcdef", "Write docs", false);
            with_description.description = Some("README first".to_string());
            let tasks = vec![task("fedcba9876543210", "Review", true), with_description];

            let lines = Display::task_lines(&tasks);
            assert_eq!(lines[0], "タスク (1/2 完了)");
            assert_eq!(lines[1], "[x] fedcba98 Review");
            assert_eq!(lines[2], "[ ] 01234567 Write docs");
            assert!(lines[3].ends_with("README first"));
        }

        #[test]
        fn test_short_id_shorter_than_limit() {
            assert_eq!(Display::short_id("abc"), "abc");
        }

        #[test]
        fn test_show_task_messages() {
            // Should not panic
            let done = task("1", "a", true);
            let open = task("2", "b", false);
            Display::show_tasks(&[done.clone(), open.clone()]);
            Display::show_task_added(&open);
            Display::show_task_toggled(&done);
            Display::show_task_toggled(&open);
            Display::show_task_updated(&open);
            Display::show_task_removed(&open);
        }
    }

    // ------------------------------------------------------------------------
    // Settings Tests
    // ------------------------------------------------------------------------

    mod settings_tests {
        use super::*;

        #[test]
        fn test_settings_lines_default() {
            let lines = Display::settings_lines(&DashboardSettings::default());

            assert!(lines.contains(&"背景: グラデーション (Mystic Night)".to_string()));
            assert!(lines.contains(&"カラー: yellow".to_string()));
            assert!(lines.contains(&"グラス効果: オン (ぼかし 10px)".to_string()));
        }

        #[test]
        fn test_settings_lines_image_without_glass() {
            let mut settings = DashboardSettings::default().with_image("https://example.com/bg.jpg");
            settings.glass_effect = false;

            let lines = Display::settings_lines(&settings);
            assert!(lines.contains(&"背景: 画像 (https://example.com/bg.jpg)".to_string()));
            assert!(lines.contains(&"グラス効果: オフ".to_string()));
        }

        #[test]
        fn test_settings_lines_other_preset() {
            let settings = DashboardSettings::default().with_gradient(&GRADIENT_PRESETS[4]);
            let lines = Display::settings_lines(&settings);
            assert!(lines.contains(&"背景: グラデーション (Aurora)".to_string()));
        }

        #[test]
        fn test_show_misc() {
            // Should not panic
            Display::show_settings_saved(&DashboardSettings::default());
            Display::show_name(Some("Kai"));
            Display::show_name(None);
            Display::show_name_saved("Kai");
            Display::show_focus(Some("ship it"));
            Display::show_focus(None);
            Display::show_focus_saved(Some("ship it"));
            Display::show_focus_saved(None);
            Display::show_error("テストエラー");
        }
    }
}
