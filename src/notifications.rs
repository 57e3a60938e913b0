//! Desktop notifications
//! notify-send on Linux, osascript on macOS, nothing elsewhere

use std::process::Command;
use tracing::debug;

/// Receives user-facing notices from the application
pub trait NotificationSink {
    fn notify(&mut self, title: &str, body: &str);
}

/// Notifications through the desktop's notification service
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl NotificationSink for DesktopNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        let Some(mut command) = notification_command(title, body) else {
            return;
        };
        // Failures are not worth interrupting the user over
        if let Err(e) = command.output() {
            debug!("Failed to send notification: {}", e);
        }
    }
}

#[cfg(target_os = "macos")]
fn notification_command(title: &str, body: &str) -> Option<Command> {
    let script = format!(
        r#"display notification "{}" with title "{}""#,
        escape(body),
        escape(title)
    );
    let mut command = Command::new("osascript");
    command.arg("-e").arg(script);
    Some(command)
}

#[cfg(target_os = "linux")]
fn notification_command(title: &str, body: &str) -> Option<Command> {
    let mut command = Command::new("notify-send");
    command.arg("--app-name=Wage Labor Record").arg(title).arg(body);
    Some(command)
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn notification_command(_title: &str, _body: &str) -> Option<Command> {
    None
}

#[cfg(target_os = "macos")]
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Title and body announcing a saved interval
pub fn interval_saved_message(task: &str, client: &str, duration: &str) -> (String, String) {
    (
        "Worked time saved".to_string(),
        format!("{} for {} ({})", task, client, duration),
    )
}

/// Title and body announcing an idle check
pub fn idle_detected_message(idle_minutes: i64) -> (String, String) {
    (
        "Are you still working?".to_string(),
        format!("No activity for {} minutes", idle_minutes),
    )
}

#[cfg(test)]
pub mod testing {
    use super::NotificationSink;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Collects notifications; clones share the same log
    #[derive(Debug, Clone, Default)]
    pub struct RecordingNotifier {
        pub sent: Rc<RefCell<Vec<(String, String)>>>,
    }

    impl NotificationSink for RecordingNotifier {
        fn notify(&mut self, title: &str, body: &str) {
            self.sent.borrow_mut().push((title.to_string(), body.to_string()));
        }
    }
}
