//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::Key;
use winit::window::WindowId;

use omnichat_layout::ModelTab;
use omnichat_webview::WindowSignal;

use super::core::OmniChatApp;
use super::types::AppEvent;

impl ApplicationHandler<AppEvent> for OmniChatApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
            return;
        }

        self.apply_selection();
        self.update_window_title();
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::HostCommands => self.process_host_commands(),
            AppEvent::ShutdownComplete => self.finish_shutdown(event_loop),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.begin_shutdown();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.relayout(WindowSignal::Resized);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                self.relayout(WindowSignal::Resized);
            }

            WindowEvent::Moved(_) => {
                self.relayout(WindowSignal::Moved);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard_input(event);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl OmniChatApp {
    /// Keys: `1`-`4` pick a tab, `C` toggles compare mode, `R` retries
    /// failed slots, `O` opens the visible model in the browser.
    fn handle_keyboard_input(&mut self, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat || self.is_shutting_down() {
            return;
        }
        let Key::Character(c) = &event.logical_key else {
            return;
        };

        match c.to_ascii_lowercase().as_str() {
            "c" => {
                self.selection.toggle_compare();
                self.apply_selection();
            }
            "r" => self.retry_failed(),
            "o" => self.open_in_browser(),
            digit => {
                let tab = digit
                    .parse::<u8>()
                    .ok()
                    .and_then(ModelTab::from_shortcut);
                if let Some(tab) = tab {
                    if self.selection.select(tab) {
                        self.apply_selection();
                    }
                }
            }
        }
        self.update_window_title();
    }
}
