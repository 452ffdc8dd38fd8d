//! Widgets section: news ticker, weather, quote, APOD and Pokémon cards.

use eframe::egui;
use egui::{pos2, Align2, Color32, FontId, RichText};
use folio::widgets::apod::ApodCard;
use folio::widgets::news::{Headline, Ticker};
use folio::widgets::pokemon::{stat_fraction, Pokemon};
use folio::{ThemeColors, WidgetError};

use crate::app::AppState;
use crate::io::{WidgetFetcher, WidgetKind};

const TICKER_HEIGHT: f32 = 28.0;
const TICKER_SEPARATOR: &str = "     •     ";

/// Result of user interaction with the widgets section
pub enum WidgetsInteraction {
    /// A widget's refresh button was clicked
    RefreshRequested(WidgetKind),
    /// Search button or Enter in the Pokémon search box
    PokemonSearchRequested,
    /// The random Pokémon button
    RandomPokemonRequested,
}

fn card<R>(ui: &mut egui::Ui, title: &str, colors: &ThemeColors, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::group(ui.style())
        .fill(colors.card_background)
        .corner_radius(8.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).strong().size(15.0).color(colors.heading));
            ui.add_space(4.0);
            add_contents(ui)
        })
        .inner
}

fn error_label(ui: &mut egui::Ui, error: &WidgetError, color: Color32) {
    let response = ui.label(RichText::new(&error.message).color(color));
    if let Some(detail) = &error.detail {
        response.on_hover_text(detail);
    }
}

fn refresh_button(ui: &mut egui::Ui, fetcher: &WidgetFetcher, kind: WidgetKind) -> bool {
    if fetcher.is_loading(kind) {
        ui.spinner();
        false
    } else {
        ui.small_button("⟳").on_hover_text("Refresh").clicked()
    }
}

/// Renders all widget cards
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
/// * `fetcher` - Background fetcher, for loading indicators
///
/// # Returns
/// * `Option<WidgetsInteraction>` - User interaction result
pub fn render_widgets_panel(ui: &mut egui::Ui, state: &mut AppState, fetcher: &WidgetFetcher) -> Option<WidgetsInteraction> {
    let mut interaction = None;
    let colors = state.theme.colors().clone();
    let widgets = &mut state.widgets;

    card(ui, "Headlines", &colors, |ui| {
        match (widgets.news.value(), widgets.news.error()) {
            (Some(headlines), _) if !headlines.is_empty() => {
                render_ticker(ui, headlines, &mut widgets.ticker, &colors);
                ui.collapsing("All headlines", |ui| {
                    for headline in headlines {
                        ui.hyperlink_to(headline.label(), &headline.url);
                    }
                });
            }
            (_, Some(error)) => error_label(ui, error, colors.error),
            _ => {}
        }
        if refresh_button(ui, fetcher, WidgetKind::News) {
            interaction = Some(WidgetsInteraction::RefreshRequested(WidgetKind::News));
        }
    });

    ui.add_space(8.0);
    ui.columns(2, |columns| {
        card(&mut columns[0], "Weather", &colors, |ui| {
            if let Some(report) = widgets.weather.value() {
                ui.label(RichText::new(report.headline()).strong());
                ui.label(report.readings());
            } else if let Some(error) = widgets.weather.error() {
                error_label(ui, error, colors.error);
            }
            if refresh_button(ui, fetcher, WidgetKind::Weather) {
                interaction = Some(WidgetsInteraction::RefreshRequested(WidgetKind::Weather));
            }
        });

        card(&mut columns[1], "Quote of the day", &colors, |ui| {
            if let Some(strip) = widgets.quote.value_mut() {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(strip.current_text()).italics());
                    if strip.is_paged() && ui.small_button("›").on_hover_text("Next part").clicked() {
                        strip.next_page();
                    }
                });
            } else if let Some(error) = widgets.quote.error() {
                error_label(ui, error, colors.error);
            }
            if refresh_button(ui, fetcher, WidgetKind::Quote) {
                interaction = Some(WidgetsInteraction::RefreshRequested(WidgetKind::Quote));
            }
        });
    });

    ui.add_space(8.0);
    ui.columns(2, |columns| {
        card(&mut columns[0], "Astronomy picture of the day", &colors, |ui| {
            if let Some(apod) = widgets.apod.value() {
                render_apod(ui, apod, &mut widgets.apod_expanded, &colors);
            } else if let Some(error) = widgets.apod.error() {
                error_label(ui, error, colors.error);
            }
            if refresh_button(ui, fetcher, WidgetKind::Apod) {
                interaction = Some(WidgetsInteraction::RefreshRequested(WidgetKind::Apod));
            }
        });

        card(&mut columns[1], "Pokémon", &colors, |ui| {
            let loading = fetcher.is_loading(WidgetKind::Pokemon);
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut widgets.pokemon_query)
                        .hint_text("Name or number, e.g. pikachu or 25")
                        .desired_width(180.0),
                );
                let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.add_enabled(!loading, egui::Button::new("Search")).clicked() || (entered && !loading) {
                    interaction = Some(WidgetsInteraction::PokemonSearchRequested);
                }
                if ui.add_enabled(!loading, egui::Button::new("🎲 Random")).clicked() {
                    interaction = Some(WidgetsInteraction::RandomPokemonRequested);
                }
                if loading {
                    ui.spinner();
                }
            });

            if let Some(pokemon) = widgets.pokemon.value() {
                render_pokemon(ui, pokemon, &colors);
            } else if let Some(error) = widgets.pokemon.error() {
                error_label(ui, error, colors.error);
            }
        });
    });

    interaction
}

/// Scrolls the headline strip, drawn twice back to back, inside a clipped band.
fn render_ticker(ui: &mut egui::Ui, headlines: &[Headline], ticker: &mut Ticker, colors: &ThemeColors) {
    let strip: String = headlines
        .iter()
        .map(Headline::label)
        .collect::<Vec<_>>()
        .join(TICKER_SEPARATOR)
        + TICKER_SEPARATOR;

    let (rect, response) = ui.allocate_exact_size(egui::vec2(ui.available_width(), TICKER_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, colors.hover);

    let font = FontId::proportional(14.0);
    let strip_width = painter.layout_no_wrap(strip.clone(), font.clone(), colors.text).size().x;

    ticker.set_paused(response.hovered());
    ticker.advance(ui.input(|i| i.stable_dt), strip_width);

    for x in ticker.copy_positions(strip_width) {
        painter.text(
            pos2(rect.left() + x, rect.center().y),
            Align2::LEFT_CENTER,
            &strip,
            font.clone(),
            colors.text,
        );
    }

    ui.ctx().request_repaint();
}

fn render_apod(ui: &mut egui::Ui, card: &ApodCard, expanded: &mut bool, colors: &ThemeColors) {
    let apod = &card.apod;

    if let Some(notice) = &card.notice {
        error_label(ui, notice, colors.warning);
    }

    ui.label(RichText::new(&apod.title).strong());
    let mut byline = apod.date.clone();
    if let Some(copyright) = &apod.copyright {
        byline.push_str(&format!(" · © {}", copyright.trim()));
    }
    if card.from_cache {
        byline.push_str(" · cached");
    }
    ui.label(RichText::new(byline).color(colors.text_dim));

    if apod.is_image() {
        ui.hyperlink_to("🔭 Open full size", apod.full_size_url());
    } else {
        ui.hyperlink_to("▶ Watch video", &apod.url);
    }

    if *expanded {
        ui.label(&apod.explanation);
    } else {
        ui.label(apod.explanation_preview());
    }
    let toggle = if *expanded { "Show less" } else { "Read more" };
    if ui.link(toggle).clicked() {
        *expanded = !*expanded;
    }
}

fn render_pokemon(ui: &mut egui::Ui, pokemon: &Pokemon, colors: &ThemeColors) {
    ui.label(RichText::new(pokemon.title()).strong().size(16.0));
    ui.label(format!(
        "Type: {}  |  Height: {:.1} m  |  Weight: {:.1} kg",
        pokemon.type_names().join(" / "),
        pokemon.height_m(),
        pokemon.weight_kg()
    ));

    for entry in &pokemon.stats {
        ui.horizontal(|ui| {
            ui.add_sized([110.0, 18.0], egui::Label::new(&entry.stat.name));
            ui.add(
                egui::ProgressBar::new(stat_fraction(entry.base_stat))
                    .desired_width(160.0)
                    .fill(colors.accent)
                    .text(entry.base_stat.to_string()),
            );
        });
    }

    if let Some(artwork) = pokemon.artwork() {
        ui.hyperlink_to("🖼 Artwork", artwork);
    }
}
