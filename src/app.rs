use chrono::Utc;
use eframe::egui;
use egui::{CornerRadius, RichText, ScrollArea, Ui};

use hacker_stories::{
    Event, Fetcher, SearchTerm, Session, SortDirection, SortField, Status, StoryItem,
};

use crate::theme::AppTheme;

const FOOTER_TEXT: &str = "Icons made by Freepik from www.flaticon.com";

pub struct HackerStoriesApp {
    session: Session,
    fetcher: Fetcher,
    theme: AppTheme,
    is_dark_mode: bool,
    search_input: String,
    // Intents collected while rendering, handled once the frame is laid out
    pending_events: Vec<Event>,
}

impl HackerStoriesApp {
    pub fn new(fetcher: Fetcher, initial_term: &str, dark_mode: bool) -> Self {
        let mut app = Self {
            session: Session::new(),
            fetcher,
            theme: AppTheme::for_mode(dark_mode),
            is_dark_mode: dark_mode,
            search_input: initial_term.to_string(),
            pending_events: Vec::new(),
        };

        let effects = app.session.start(initial_term);
        app.fetcher.apply(effects);
        app
    }

    fn dispatch(&mut self, event: Event) {
        let effects = self.session.handle(event);
        self.fetcher.apply(effects);
    }

    fn collect_fetch_results(&mut self) {
        for outcome in self.fetcher.poll() {
            self.dispatch(outcome.into());
        }
    }

    fn open_link(&self, url: &str) {
        if let Err(e) = open::that(url) {
            tracing::warn!(url, error = %e, "failed to open link");
        }
    }

    fn toggle_theme(&mut self) {
        self.is_dark_mode = !self.is_dark_mode;
        self.theme = AppTheme::for_mode(self.is_dark_mode);
    }

    fn submit_search(&mut self) {
        self.pending_events
            .push(Event::Submit(self.search_input.clone()));
    }

    fn render_header(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading(
                RichText::new("My Hacker Stories")
                    .color(self.theme.highlight)
                    .size(24.0),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme_icon = if self.is_dark_mode { "☀" } else { "☾" };
                let theme_btn = ui
                    .add(
                        egui::Button::new(
                            RichText::new(theme_icon)
                                .color(self.theme.button_foreground)
                                .size(20.0),
                        )
                        .min_size(egui::Vec2::new(32.0, 32.0))
                        .corner_radius(CornerRadius::same(16))
                        .fill(self.theme.button_background),
                    )
                    .on_hover_text(if self.is_dark_mode {
                        "Switch to Light Mode"
                    } else {
                        "Switch to Dark Mode"
                    });

                if theme_btn.clicked() {
                    self.toggle_theme();
                }
            });
        });
    }

    fn render_search_form(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Search:").color(self.theme.text).size(16.0));
            ui.add_space(8.0);

            let input = ui.add_sized(
                [ui.available_width() - 100.0, 32.0],
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text("Search Hacker News...")
                    .text_color(self.theme.text)
                    .id(egui::Id::new("search")),
            );

            if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.submit_search();
            }

            ui.add_space(8.0);
            let can_submit = SearchTerm::new(self.search_input.as_str()).is_some();
            let submit_btn = ui.add_enabled(
                can_submit,
                egui::Button::new(
                    RichText::new("Submit")
                        .color(self.theme.button_foreground)
                        .size(14.0),
                )
                .min_size(egui::Vec2::new(80.0, 30.0))
                .corner_radius(CornerRadius::same(6))
                .fill(self.theme.button_background),
            );
            if submit_btn.clicked() {
                self.submit_search();
            }
        });
    }

    fn render_last_searches(&mut self, ui: &mut Ui) {
        let terms: Vec<SearchTerm> = self.session.recent_terms().cloned().collect();
        if terms.is_empty() {
            return;
        }

        ui.horizontal_wrapped(|ui| {
            for term in terms {
                let btn = ui.add(
                    egui::Button::new(
                        RichText::new(term.as_str())
                            .color(self.theme.button_foreground)
                            .size(14.0),
                    )
                    .corner_radius(CornerRadius::same(6))
                    .fill(self.theme.button_background),
                );
                if btn.clicked() {
                    self.search_input = term.to_string();
                    self.pending_events.push(Event::SelectRecent(term));
                }
            }
        });
    }

    fn render_list_header(&mut self, ui: &mut Ui) {
        let active = self.session.active_sort();
        ui.horizontal(|ui| {
            for field in SortField::ALL {
                let label = match active {
                    Some((f, SortDirection::Ascending)) if f == field => {
                        format!("{} ▲", field.label())
                    }
                    Some((f, SortDirection::Descending)) if f == field => {
                        format!("{} ▼", field.label())
                    }
                    _ => field.label().to_string(),
                };
                let header_btn = ui.add_enabled(
                    self.session.status() == Status::Success,
                    egui::Button::new(
                        RichText::new(label)
                            .color(self.theme.button_foreground)
                            .strong(),
                    )
                    .min_size(egui::Vec2::new(110.0, 26.0))
                    .fill(self.theme.button_background),
                );
                if header_btn.clicked() {
                    self.pending_events.push(Event::SortBy(field));
                }
            }
            ui.add_space(8.0);
            ui.label(RichText::new("Actions").color(self.theme.secondary_text).strong());
        });
    }

    fn render_item(&mut self, ui: &mut Ui, story: &StoryItem, now: chrono::DateTime<Utc>) {
        egui::Frame::new()
            .fill(self.theme.card_background)
            .corner_radius(CornerRadius::same(8))
            .stroke(self.theme.card_stroke(story.points))
            .inner_margin(10.0)
            .outer_margin(egui::vec2(4.0, 4.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let title = ui.add(
                        egui::Label::new(
                            RichText::new(&story.title)
                                .color(self.theme.link_color)
                                .size(16.0)
                                .strong(),
                        )
                        .sense(egui::Sense::click()),
                    );
                    if title.clicked() && !story.url.is_empty() {
                        self.open_link(&story.url);
                    }
                    if title.hovered() && !story.url.is_empty() {
                        ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let dismiss_btn = ui.add_sized(
                            [80.0, 26.0],
                            egui::Button::new(
                                RichText::new("Dismiss")
                                    .color(self.theme.button_foreground)
                                    .size(13.0),
                            )
                            .corner_radius(CornerRadius::same(6))
                            .fill(self.theme.button_background),
                        );
                        if dismiss_btn.clicked() {
                            self.pending_events.push(Event::Dismiss(story.id.clone()));
                        }
                    });
                });

                ui.horizontal(|ui| {
                    ui.label(RichText::new("by").color(self.theme.secondary_text).size(14.0));
                    ui.label(RichText::new(&story.author).color(self.theme.text).size(14.0));
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(format!("{} comments", story.num_comments))
                            .color(self.theme.secondary_text)
                            .size(14.0),
                    );
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(format!("{} points", story.points))
                            .color(self.theme.points_color(story.points))
                            .strong()
                            .size(14.0),
                    );
                    let age = story.time_ago(now);
                    if !age.is_empty() {
                        ui.add_space(8.0);
                        ui.label(RichText::new(age).color(self.theme.secondary_text).size(14.0));
                    }
                });
            });
    }

    fn render_stories(&mut self, ui: &mut Ui) {
        if let Some(message) = self.session.error_message() {
            ui.label(RichText::new(message).color(self.theme.error).size(16.0));
        }

        // Cloned so rows can queue events while we iterate
        let stories: Vec<StoryItem> = self.session.items().to_vec();
        let now = Utc::now();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for story in &stories {
                    self.render_item(ui, story, now);
                }

                if self.session.is_loading() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.spinner();
                        ui.label(
                            RichText::new("Loading ...")
                                .color(self.theme.secondary_text)
                                .size(16.0),
                        );
                    });
                } else if self.session.can_request_more() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(8.0);
                        let more_btn = ui.add_sized(
                            [120.0, 32.0],
                            egui::Button::new(
                                RichText::new("More")
                                    .color(self.theme.button_foreground)
                                    .size(15.0),
                            )
                            .corner_radius(CornerRadius::same(6))
                            .fill(self.theme.button_background),
                        );
                        if more_btn.clicked() {
                            self.pending_events.push(Event::RequestMore);
                        }
                    });
                }
            });
    }
}

impl eframe::App for HackerStoriesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.theme.apply_to_ctx(ctx);
        self.collect_fetch_results();

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(FOOTER_TEXT)
                        .color(self.theme.secondary_text)
                        .size(12.0),
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_header(ui);
            ui.add(egui::Separator::default().spacing(12.0));
            self.render_search_form(ui);
            ui.add_space(6.0);
            self.render_last_searches(ui);
            ui.add(egui::Separator::default().spacing(12.0));
            self.render_list_header(ui);
            ui.add_space(4.0);
            self.render_stories(ui);
        });

        let events = std::mem::take(&mut self.pending_events);
        let handled_any = !events.is_empty();
        for event in events {
            self.dispatch(event);
        }
        if handled_any {
            ctx.request_repaint();
        }
    }
}
