//! Window title management: reflects the state of every visible slot.

use omnichat_layout::ModelTab;
use omnichat_webview::ControllerStatus;

use super::core::OmniChatApp;

impl OmniChatApp {
    /// Update the window title when any slot status changed.
    pub(super) fn update_window_title(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let slots: Vec<_> = self
            .selection
            .visible_tabs()
            .into_iter()
            .map(|tab| {
                let status = self
                    .slots
                    .iter()
                    .find(|(key, _)| key.tab == tab)
                    .map(|(_, entry)| entry.controller.status());
                (tab, status)
            })
            .collect();

        let title = compose_title(&self.config.window.title, &slots);
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }
}

/// Format: "OmniChat - ChatGPT (ready) | Claude (loading)".
fn compose_title(base: &str, slots: &[(ModelTab, Option<ControllerStatus>)]) -> String {
    let parts: Vec<String> = slots
        .iter()
        .map(|(tab, status)| {
            let name = match tab.subtitle() {
                Some(sub) => format!("{} {}", tab.title(), sub),
                None => tab.title().to_string(),
            };
            match status {
                Some(ControllerStatus::Error(_)) => format!("{name} (failed, R to retry)"),
                Some(status) => format!("{name} ({})", status.as_str()),
                None if tab.embedded().is_none() => format!("{name} (omnichat ask)"),
                None => name,
            }
        })
        .collect();

    if parts.is_empty() {
        base.to_string()
    } else {
        format!("{base} - {}", parts.join(" | "))
    }
}
