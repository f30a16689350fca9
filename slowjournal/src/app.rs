//! slowJournal - dated markdown entries with a live preview

use crate::command::{Command, Outcome};
use crate::entry::ENTRY_EXTENSION;
use crate::preview::{self, Block};
use crate::prefs::{JournalPrefs, DIR_ENV_VAR};
use crate::store::{ActiveDocument, DocumentStore};
use egui::{Align2, Context, Key};
use slowcore::storage::{documents_dir, FolderBrowser};
use slowcore::theme::{consume_special_keys_with_tab, menu_bar, SlowColors, SlowTheme};
use slowcore::widgets::{status_bar, EntryRow, FolderRow};
use std::path::PathBuf;

#[derive(Clone, Copy, PartialEq)]
enum TitlePrompt {
    NewEntry,
    KeepScratch,
}

pub struct SlowJournalApp {
    store: DocumentStore,
    prefs: JournalPrefs,
    theme: SlowTheme,
    /// Commands raised during this frame, run after the UI pass
    queue: Vec<Command>,
    preview_source: String,
    preview_blocks: Vec<Block>,
    /// Last message for the status bar
    status: String,
    /// Failure the user has to acknowledge
    alert: Option<String>,
    title_prompt: Option<TitlePrompt>,
    new_title: String,
    show_folder_browser: bool,
    folder_browser: FolderBrowser,
    show_about: bool,
    show_shortcuts: bool,
}

impl SlowJournalApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let prefs = JournalPrefs::load();
        let startup = prefs.startup_directory(std::env::var(DIR_ENV_VAR).ok());

        let mut app = Self::with_state(DocumentStore::new(), prefs);
        if let Some(dir) = startup {
            app.queue.push(Command::OpenDirectory(dir));
        }
        app.run_queue();
        app
    }

    fn with_state(store: DocumentStore, prefs: JournalPrefs) -> Self {
        let start = prefs.directory.clone().unwrap_or_else(documents_dir);
        let mut app = Self {
            store,
            prefs,
            theme: SlowTheme::default(),
            queue: Vec::new(),
            preview_source: String::new(),
            preview_blocks: Vec::new(),
            status: String::new(),
            alert: None,
            title_prompt: None,
            new_title: String::new(),
            show_folder_browser: false,
            folder_browser: FolderBrowser::new(start).counting(ENTRY_EXTENSION),
            show_about: false,
            show_shortcuts: false,
        };
        app.refresh_preview();
        app
    }

    fn run_queue(&mut self) {
        for command in std::mem::take(&mut self.queue) {
            self.run(command);
        }
    }

    fn run(&mut self, command: Command) {
        let opened = match &command {
            Command::OpenDirectory(path) => Some(path.clone()),
            _ => None,
        };
        let saving = command == Command::Save;

        match self.store.apply(command) {
            Ok(Outcome::Scanned(report)) => {
                if let Some(dir) = opened {
                    self.prefs.remember_directory(&dir);
                    self.prefs.save();
                }
                self.status = format!("{} entries", report.entries.len());
                if !report.skipped.is_empty() {
                    self.status.push_str(&format!(
                        ", skipped {} not named title_date.md",
                        report.skipped.len()
                    ));
                }
            }
            Ok(Outcome::Created(entry)) => {
                self.status = format!("created {}", entry.title);
            }
            Ok(Outcome::Done) => {
                if saving {
                    self.status = if self.store.is_dirty() { "not saved".into() } else { "saved".into() };
                }
            }
            Err(err) => {
                log::error!("{}", err);
                if let Some(dir) = opened {
                    self.prefs.recent.remove(&dir);
                    self.prefs.save();
                }
                self.alert = Some(err.to_string());
            }
        }
    }

    fn open_folder_browser(&mut self) {
        let start = self
            .store
            .directory()
            .map(|d| d.to_path_buf())
            .unwrap_or_else(documents_dir);
        self.folder_browser = FolderBrowser::new(start).counting(ENTRY_EXTENSION);
        self.show_folder_browser = true;
    }

    fn prompt_title(&mut self, prompt: TitlePrompt) {
        if self.store.directory().is_none() {
            self.alert = Some("open a journal directory first".into());
            return;
        }
        self.new_title.clear();
        self.title_prompt = Some(prompt);
    }

    fn request_save(&mut self) {
        if self.store.active() == ActiveDocument::Scratch {
            self.prompt_title(TitlePrompt::KeepScratch);
        } else {
            self.queue.push(Command::Save);
        }
    }

    fn select_relative(&mut self, delta: isize) {
        let len = self.store.entries().len();
        if len == 0 {
            return;
        }
        let next = match self.store.active_index() {
            Some(i) => (i as isize + delta).clamp(0, len as isize - 1) as usize,
            None => 0,
        };
        self.queue.push(Command::Select(next));
    }

    /// Intercept Cmd shortcuts before the editor sees them.
    fn handle_keyboard(&mut self, ctx: &Context) {
        consume_special_keys_with_tab(ctx, 4);

        let mut actions: Vec<Box<dyn FnOnce(&mut Self)>> = Vec::new();
        ctx.input_mut(|i| {
            let cmd = i.modifiers.command;
            i.events.retain(|event| {
                let egui::Event::Key { key, pressed: true, .. } = event else {
                    return true;
                };
                if !cmd {
                    return true;
                }
                match key {
                    Key::N => actions.push(Box::new(|s| s.prompt_title(TitlePrompt::NewEntry))),
                    Key::O => actions.push(Box::new(|s| s.open_folder_browser())),
                    Key::S => actions.push(Box::new(|s| s.request_save())),
                    Key::R => actions.push(Box::new(|s| s.queue.push(Command::Rescan))),
                    Key::ArrowUp => actions.push(Box::new(|s| s.select_relative(-1))),
                    Key::ArrowDown => actions.push(Box::new(|s| s.select_relative(1))),
                    _ => return true,
                }
                false
            });
        });

        for action in actions {
            action(self);
        }
    }

    /// Directories open as the journal; files become a scratch document.
    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect()
        });
        let Some(path) = dropped.into_iter().next() else {
            return;
        };
        if path.is_dir() {
            self.queue.push(Command::OpenDirectory(path));
            return;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => self.queue.push(Command::PushExternal(text)),
            Err(err) => {
                log::error!("could not read {}: {}", path.display(), err);
                self.alert = Some(format!("could not read {}: {}", path.display(), err));
            }
        }
    }

    fn display_title(&self) -> String {
        let name = match self.store.active() {
            ActiveDocument::Entry(_) => self
                .store
                .active_entry()
                .map(|e| format!("{} — {}", e.title, e.date.display()))
                .unwrap_or_default(),
            ActiveDocument::Scratch => "scratch".to_string(),
            ActiveDocument::None => "journal".to_string(),
        };
        if self.store.is_dirty() {
            format!("{}*", name)
        } else {
            name
        }
    }

    fn refresh_preview(&mut self) {
        if self.preview_source != self.store.text() {
            self.preview_source = self.store.text().to_string();
            self.preview_blocks = preview::parse(&self.preview_source);
        }
    }

    /// The preview pane is drawn before the editor, so an edit has to
    /// reparse now and draw once more.
    fn text_edited(&mut self, ctx: &Context) {
        self.refresh_preview();
        ctx.request_repaint();
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        menu_bar(ui, |ui| {
            ui.menu_button("file", |ui| {
                if ui.button("new entry     \u{2318}n").clicked() {
                    self.prompt_title(TitlePrompt::NewEntry);
                    ui.close_menu();
                }
                if ui.button("open folder.. \u{2318}o").clicked() {
                    self.open_folder_browser();
                    ui.close_menu();
                }
                ui.menu_button("open recent", |ui| {
                    if self.prefs.recent.is_empty() {
                        ui.label("no recent folders");
                    }
                    for path in self.prefs.recent.paths.clone() {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| path.display().to_string());
                        if ui.button(name).on_hover_text(path.display().to_string()).clicked() {
                            self.queue.push(Command::OpenDirectory(path));
                            ui.close_menu();
                        }
                    }
                });
                if ui.button("rescan        \u{2318}r").clicked() {
                    self.queue.push(Command::Rescan);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("save          \u{2318}s").clicked() {
                    self.request_save();
                    ui.close_menu();
                }
                if self.store.active() == ActiveDocument::Scratch
                    && ui.button("keep scratch as entry..").clicked()
                {
                    self.prompt_title(TitlePrompt::KeepScratch);
                    ui.close_menu();
                }
            });
            ui.menu_button("view", |ui| {
                let label = if self.prefs.show_preview { "hide preview" } else { "show preview" };
                if ui.button(label).clicked() {
                    self.prefs.show_preview = !self.prefs.show_preview;
                    self.prefs.save();
                    ui.close_menu();
                }
            });
            ui.menu_button("help", |ui| {
                if ui.button("keyboard shortcuts").clicked() {
                    self.show_shortcuts = true;
                    ui.close_menu();
                }
                if ui.button("about").clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });
        });
    }

    fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        if ui.button("+ new entry").clicked() {
            self.prompt_title(TitlePrompt::NewEntry);
        }
        ui.add_space(4.0);

        let active = self.store.active_index();
        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = 0.0;
            for (index, entry) in self.store.entries().iter().enumerate() {
                let date = entry.date.display();
                let row = EntryRow::new(&entry.title, &date).active(active == Some(index));
                if ui.add(row).clicked() {
                    self.queue.push(Command::Select(index));
                }
            }
        });
    }

    fn render_editor(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_source("editor")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let available = ui.available_size();
                let response = ui.add_sized(
                    available,
                    egui::TextEdit::multiline(self.store.text_mut())
                        .code_editor()
                        .frame(false)
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    self.text_edited(ui.ctx());
                }
            });
    }

    fn render_preview(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_source("preview")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                preview::show(ui, &self.preview_blocks, &self.theme);
            });
    }

    fn render_placeholder(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            if self.store.directory().is_none() {
                ui.heading("press \u{2318}O to open a directory");
                ui.add_space(8.0);
                if ui.button("open folder..").clicked() {
                    self.open_folder_browser();
                }
            } else {
                ui.heading("no entries yet");
                ui.add_space(8.0);
                if ui.button("new entry").clicked() {
                    self.prompt_title(TitlePrompt::NewEntry);
                }
            }
        });
    }

    fn render_folder_browser(&mut self, ctx: &Context) {
        egui::Window::new("open journal folder")
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("location:");
                    ui.label(self.folder_browser.current_dir.to_string_lossy().to_string());
                });
                ui.separator();
                let mut navigate = None;
                egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    for (idx, entry) in self.folder_browser.entries.iter().enumerate() {
                        let selected = self.folder_browser.selected_index == Some(idx);
                        let response = ui.add(FolderRow::new(&entry.name).selected(selected));
                        if response.clicked() {
                            self.folder_browser.selected_index = Some(idx);
                        }
                        if response.double_clicked() {
                            navigate = Some(entry.path.clone());
                        }
                    }
                });
                if let Some(path) = navigate {
                    self.folder_browser.navigate_to(path);
                }
                ui.separator();
                ui.label(format!(
                    "{} .{} files here",
                    self.folder_browser.matching_files, ENTRY_EXTENSION
                ));
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        self.show_folder_browser = false;
                    }
                    if ui.button("open").clicked() {
                        self.queue.push(Command::OpenDirectory(self.folder_browser.chosen_dir()));
                        self.show_folder_browser = false;
                    }
                });
            });
    }

    fn render_title_prompt(&mut self, ctx: &Context, prompt: TitlePrompt) {
        let heading = match prompt {
            TitlePrompt::NewEntry => "new entry",
            TitlePrompt::KeepScratch => "keep scratch as entry",
        };
        egui::Window::new(heading)
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("title:");
                let field = ui.text_edit_singleline(&mut self.new_title);
                field.request_focus();
                let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                ui.label(egui::RichText::new("saved as title_MM-DD-YYYY.md").small());
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        self.title_prompt = None;
                    }
                    if ui.button("create").clicked() || submitted {
                        let title = self.new_title.clone();
                        self.queue.push(match prompt {
                            TitlePrompt::NewEntry => Command::Create(title),
                            TitlePrompt::KeepScratch => Command::KeepScratch(title),
                        });
                        self.title_prompt = None;
                    }
                });
            });
    }

    fn render_alert(&mut self, ctx: &Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };
        egui::Window::new("something went wrong")
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.alert = None;
                    }
                });
            });
    }

    fn render_about(&mut self, ctx: &Context) {
        egui::Window::new("about slowJournal")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("slowJournal");
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    ui.label("a folder of dated markdown entries");
                });
                ui.add_space(8.0);
                ui.separator();
                ui.label("entries are files named title_MM-DD-YYYY.md");
                ui.label("edits are saved when you switch entries");
                ui.label("drop a file to open it as scratch");
                ui.add_space(4.0);
                ui.label("frameworks:");
                ui.label("  egui/eframe (MIT), chrono (MIT)");
                ui.label("  pulldown-cmark (MIT)");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }

    fn render_shortcuts(&mut self, ctx: &Context) {
        egui::Window::new("keyboard shortcuts")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                shortcut_row(ui, "\u{2318}N", "New entry");
                shortcut_row(ui, "\u{2318}O", "Open folder");
                shortcut_row(ui, "\u{2318}S", "Save");
                shortcut_row(ui, "\u{2318}R", "Rescan folder");
                shortcut_row(ui, "\u{2318}\u{2191} / \u{2318}\u{2193}", "Previous / next entry");
                shortcut_row(ui, "Tab", "Insert four spaces");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_shortcuts = false;
                    }
                });
            });
    }
}

fn shortcut_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(shortcut).monospace().strong());
        ui.add_space(20.0);
        ui.label(description);
    });
}

impl eframe::App for SlowJournalApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);
        self.handle_dropped_files(ctx);
        self.refresh_preview();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| self.render_menu_bar(ui));
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            SlowTheme::title_bar_frame().show(ui, |ui| {
                ui.centered_and_justified(|ui| ui.label(self.display_title()));
            });
        });
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let buffer = self.store.buffer();
            let mut text = format!(
                "{} entries  |  {} words, {} chars",
                self.store.entries().len(),
                buffer.word_count(),
                buffer.char_count()
            );
            if !self.status.is_empty() {
                text.push_str("  |  ");
                text.push_str(&self.status);
            }
            status_bar(ui, &text);
        });

        let has_document = self.store.active() != ActiveDocument::None;
        if self.store.directory().is_some() {
            egui::SidePanel::left("entries")
                .resizable(true)
                .default_width(200.0)
                .show(ctx, |ui| self.render_sidebar(ui));
        }
        if has_document && self.prefs.show_preview {
            egui::SidePanel::right("preview")
                .resizable(true)
                .default_width(ctx.screen_rect().width() * 0.35)
                .frame(SlowTheme::pane_frame())
                .show(ctx, |ui| self.render_preview(ui));
        }
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(SlowColors::WHITE).inner_margin(egui::Margin::same(8.0)))
            .show(ctx, |ui| {
                if has_document {
                    self.render_editor(ui);
                } else {
                    self.render_placeholder(ui);
                }
            });

        if self.show_folder_browser {
            self.render_folder_browser(ctx);
        }
        if let Some(prompt) = self.title_prompt {
            self.render_title_prompt(ctx, prompt);
        }
        if self.show_about {
            self.render_about(ctx);
        }
        if self.show_shortcuts {
            self.render_shortcuts(ctx);
        }
        self.render_alert(ctx);

        if ctx.input(|i| i.viewport().close_requested())
            && matches!(self.store.active(), ActiveDocument::Entry(_))
        {
            self.queue.push(Command::Save);
        }

        if !self.queue.is_empty() {
            self.run_queue();
            ctx.request_repaint();
        }
    }
}
