// SPDX-License-Identifier: MPL-2.0
//! Demo application wiring the toaster into an Iced window.
//!
//! The `App` owns one [`Surface`] and hands a [`Toaster`] to its own update
//! loop; every interaction and the periodic tick are forwarded to the surface
//! with the current instant.

mod message;
pub mod paths;
pub mod persisted_state;
mod subscription;

pub use message::{Demo, Flags, Message};

use crate::config::{self, ToasterConfig};
use crate::diagnostics::DiagnosticsCollector;
use crate::notifications::{
    Bus, Position, PromiseData, Surface, ToastButton, ToastDuration, ToastKind, ToastOptions,
    Toaster,
};
use crate::ui::design_tokens::spacing;
use crate::ui::theming::resolve_theme;
use crate::ui::toast;
use iced::widget::{button, Column, Container, Row, Stack, Text};
use iced::{keyboard, window, Element, Length, Point, Subscription, Task, Theme};
use persisted_state::{FileStore, KeyValueStore, MemoryStore};
use std::time::{Duration, Instant};

const WINDOW_DEFAULT_WIDTH: f32 = 960.0;
const WINDOW_DEFAULT_HEIGHT: f32 = 640.0;

/// Root Iced application state.
pub struct App {
    toaster: Toaster,
    surface: Surface,
    diagnostics: DiagnosticsCollector,
    held_keys: Vec<String>,
    modifiers: keyboard::Modifiers,
    pointer: Point,
    uploads: u32,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("surface", &self.surface)
            .field("uploads", &self.uploads)
            .finish_non_exhaustive()
    }
}

/// Builds the window settings
fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires `Fn` for boot; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

fn load_config(flags: &Flags) -> ToasterConfig {
    let loaded = match &flags.config_path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    let mut config = loaded.unwrap_or_else(|err| {
        log::warn!("using default toaster config: {err}");
        ToasterConfig::default()
    });

    if let Some(position) = flags.position {
        config.position = position;
    }
    config.expand |= flags.expand;
    config
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = load_config(&flags);
        let mut store: Box<dyn KeyValueStore> = match FileStore::open() {
            Ok(store) => Box::new(store),
            Err(err) => {
                log::warn!("theme will not persist: {err}");
                Box::new(MemoryStore::default())
            }
        };
        let app = Self::with_config(config, store.as_mut());
        (app, Task::none())
    }

    /// Builds the application around an explicit config and key-value store.
    pub fn with_config(config: ToasterConfig, store: &mut dyn KeyValueStore) -> Self {
        let theme = resolve_theme(config.theme, store);
        log::info!("starting with {theme} theme at {}", config.position);

        let diagnostics = DiagnosticsCollector::default();
        let bus = Bus::new().with_diagnostics(diagnostics.handle());
        let surface = Surface::new(&bus, config, theme).with_diagnostics(diagnostics.handle());

        Self {
            toaster: Toaster::new(bus),
            surface,
            diagnostics,
            held_keys: Vec::new(),
            modifiers: keyboard::Modifiers::default(),
            pointer: Point::ORIGIN,
            uploads: 0,
        }
    }

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[must_use]
    pub fn title(&self) -> String {
        let count = self.surface.state().toasts.len();
        if count == 0 {
            "Iced Toasts".to_string()
        } else {
            format!("Iced Toasts ({count})")
        }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.surface.state().theme.to_iced()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_tick_subscription(),
            subscription::create_keyboard_subscription(),
        ])
    }

    /// Applies pending events, keeps card heights current and advances timers.
    fn settle(&mut self, now: Instant) {
        self.surface.sync(now);

        let heights: Vec<_> = self
            .surface
            .state()
            .toasts
            .iter()
            .map(|t| (t.id.clone(), toast::estimated_height(t)))
            .collect();
        for (id, height) in heights {
            self.surface.report_height(&id, height);
        }

        self.surface.tick(now);
        self.diagnostics.process_pending();
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let now = Instant::now();
        let task = match message {
            Message::Tick(instant) => {
                self.settle(instant);
                return Task::none();
            }
            Message::Toast(message) => {
                self.handle_toast_message(message, now);
                Task::none()
            }
            Message::Show(demo) => {
                self.show(demo);
                Task::none()
            }
            Message::StartUpload => self.start_upload(),
            Message::UploadFinished(result) => {
                match result {
                    Ok(files) => log::info!("upload of {files} files finished"),
                    Err(err) => log::info!("upload failed: {err}"),
                }
                Task::none()
            }
            Message::DismissAll => {
                self.toaster.dismiss_all();
                Task::none()
            }
            Message::ExportDiagnostics => {
                self.diagnostics.process_pending();
                match self.diagnostics.export_json() {
                    Ok(json) => log::info!("diagnostics report:\n{json}"),
                    Err(err) => log::error!("could not export diagnostics: {err}"),
                }
                Task::none()
            }
            Message::KeyPressed(code) => {
                if !self.held_keys.contains(&code) {
                    self.held_keys.push(code);
                }
                self.keys_changed(now);
                Task::none()
            }
            Message::KeyReleased(code) => {
                self.held_keys.retain(|held| held != &code);
                Task::none()
            }
            Message::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers;
                self.keys_changed(now);
                Task::none()
            }
        };
        self.settle(now);
        task
    }

    fn keys_changed(&mut self, now: Instant) {
        let mut active: Vec<&str> = subscription::modifier_names(self.modifiers);
        active.extend(self.held_keys.iter().map(String::as_str));
        self.surface.keys_pressed(&active, now);
    }

    fn handle_toast_message(&mut self, message: toast::Message, now: Instant) {
        match message {
            toast::Message::Close(id) => self.surface.close(&id, now),
            toast::Message::Action(id) => self.surface.click_action(&id, now),
            toast::Message::Cancel(id) => self.surface.click_cancel(&id, now),
            toast::Message::RegionEntered => self.surface.mouse_enter(now),
            toast::Message::RegionMoved => self.surface.mouse_move(now),
            toast::Message::RegionLeft => self.surface.mouse_leave(now),
            toast::Message::Pressed { id, dismissible } => {
                self.surface.pointer_down(dismissible, now);
                self.surface.swipe_start(&id, self.pointer, now);
            }
            toast::Message::Released(id) => {
                self.surface.swipe_end(&id, self.pointer, now);
                self.surface.pointer_up(now);
            }
            toast::Message::PointerMoved(id, point) => {
                self.pointer = point;
                if self.surface.card(&id).is_some_and(|card| card.is_swiping()) {
                    self.surface.swipe_move(&id, point);
                }
            }
        }
    }

    fn show(&self, demo: Demo) {
        let toaster = &self.toaster;
        match demo {
            Demo::Message => {
                toaster.message("Event has been created");
            }
            Demo::Description => {
                toaster.show(
                    ToastOptions::new()
                        .title("Event has been created")
                        .description("Monday, January 3rd at 6:00pm"),
                );
            }
            Demo::Success => {
                toaster.success("Settings saved");
            }
            Demo::Info => {
                toaster.info("Be at the area 10 minutes before the event time");
            }
            Demo::Warning => {
                toaster.warning("Event start time cannot be earlier than 8am");
            }
            Demo::Error => {
                toaster.error("Event has not been created");
            }
            Demo::Action => {
                toaster.create(
                    ToastKind::Action,
                    ToastOptions::new()
                        .title("Event has been deleted")
                        .action(
                            ToastButton::new("Undo")
                                .on_click(|t| log::info!("undo requested for toast {}", t.id)),
                        )
                        .cancel(ToastButton::new("Dismiss")),
                );
            }
            Demo::Important => {
                toaster.show(
                    ToastOptions::new()
                        .kind(ToastKind::Warning)
                        .title("Battery low")
                        .description("Keeps counting down while hovered")
                        .important(true),
                );
            }
            Demo::Pinned => {
                toaster.show(
                    ToastOptions::new()
                        .title("Stays until closed")
                        .duration(ToastDuration::Never)
                        .on_dismiss(|t| log::info!("toast {} dismissed", t.id)),
                );
            }
            Demo::TopCenter => {
                toaster.show(
                    ToastOptions::new()
                        .kind(ToastKind::Info)
                        .title("Shown at the top")
                        .position(Position::TopCenter)
                        .on_auto_close(|t| log::info!("toast {} closed itself", t.id)),
                );
            }
        }
    }

    fn start_upload(&mut self) -> Task<Message> {
        self.uploads += 1;
        let files = self.uploads;

        let upload = async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            if files % 3 == 0 {
                Err("network unreachable".to_string())
            } else {
                Ok(files)
            }
        };

        let (id, tracked) = self.toaster.promise(
            upload,
            PromiseData::new(format!("Uploading {files} files…"))
                .success_with(|files: &u32| format!("{files} files uploaded"))
                .error_with(|err: &String| format!("Upload failed: {err}"))
                .finally(|| log::debug!("upload settled")),
        );
        log::debug!("tracking upload with toast {id}");

        Task::perform(tracked, Message::UploadFinished)
    }

    /// Help line naming the notification region and its hotkey.
    fn hint(&self) -> String {
        format!(
            "Hover a stack to expand it. Keyboard: {}, Escape to collapse.",
            self.surface.config().region_label()
        )
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut demos = Row::new().spacing(spacing::XS);
        for demo in Demo::ALL {
            demos = demos.push(button(Text::new(demo.label())).on_press(Message::Show(demo)));
        }

        let controls = Column::new()
            .spacing(spacing::MD)
            .push(Text::new("Iced Toasts").size(28))
            .push(
                Text::new(self.hint()).size(14),
            )
            .push(demos.wrap())
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .push(button(Text::new("Upload")).on_press(Message::StartUpload))
                    .push(button(Text::new("Dismiss all")).on_press(Message::DismissAll))
                    .push(
                        button(Text::new("Export diagnostics"))
                            .on_press(Message::ExportDiagnostics),
                    ),
            );

        let page = Container::new(controls)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(spacing::LG);

        Stack::new()
            .push(page)
            .push(toast::view_overlay(&self.surface).map(Message::Toast))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theming::{ThemeMode, ThemeVariant};

    fn app() -> App {
        let config = ToasterConfig {
            theme: ThemeMode::Dark,
            ..ToasterConfig::default()
        };
        App::with_config(config, &mut MemoryStore::default())
    }

    #[test]
    fn explicit_theme_is_used() {
        let app = app();
        assert_eq!(app.surface().state().theme, ThemeVariant::Dark);
        assert_eq!(app.title(), "Iced Toasts");
    }

    #[test]
    fn show_then_settle_mounts_toast_with_height() {
        let mut app = app();
        let _ = app.update(Message::Show(Demo::Success));

        let state = app.surface().state();
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.heights.len(), 1);
        assert_eq!(app.title(), "Iced Toasts (1)");
    }

    #[test]
    fn dismiss_all_marks_every_toast() {
        let mut app = app();
        let _ = app.update(Message::Show(Demo::Message));
        let _ = app.update(Message::Show(Demo::Error));
        let _ = app.update(Message::DismissAll);

        let state = app.surface().state();
        assert_eq!(state.toasts.len(), 2);
        assert!(state.toasts.iter().all(|t| t.marked_for_deletion));
    }

    #[test]
    fn hotkey_expands_and_escape_collapses_stack() {
        let mut app = app();
        let _ = app.update(Message::Show(Demo::Message));
        let _ = app.update(Message::Show(Demo::Info));

        let _ = app.update(Message::ModifiersChanged(keyboard::Modifiers::ALT));
        let _ = app.update(Message::KeyPressed("KeyT".to_string()));
        assert!(app.surface().state().expanded);

        let _ = app.update(Message::KeyReleased("KeyT".to_string()));
        let _ = app.update(Message::ModifiersChanged(keyboard::Modifiers::empty()));
        let _ = app.update(Message::KeyPressed("Escape".to_string()));
        assert!(!app.surface().state().expanded);
    }

    #[test]
    fn hint_names_region_and_hotkey() {
        let hint = app().hint();
        assert!(hint.contains("Notifications alt+T"), "{hint}");
    }

    #[test]
    fn hover_region_expands_and_leave_collapses() {
        let mut app = app();
        let _ = app.update(Message::Show(Demo::Message));
        let _ = app.update(Message::Show(Demo::Info));

        let _ = app.update(Message::Toast(toast::Message::RegionEntered));
        assert!(app.surface().state().expanded);
        let _ = app.update(Message::Toast(toast::Message::RegionLeft));
        assert!(!app.surface().state().expanded);
    }

    #[test]
    fn top_center_demo_creates_second_group() {
        let mut app = app();
        let _ = app.update(Message::Show(Demo::Message));
        let _ = app.update(Message::Show(Demo::TopCenter));

        let positions = app
            .surface()
            .state()
            .possible_positions(app.surface().config().position);
        assert_eq!(positions, vec![Position::BottomRight, Position::TopCenter]);
    }
}
