use crate::countdown::{compute_initial_remaining, format_hms, parse_hhmm};
use crate::fonts::FontRegistry;
use crate::form::{SettingsForm, MAX_FONT_SIZE, MIN_FONT_SIZE};
use eframe::egui::{self, Color32, FontId, RichText};
use std::time::Duration;

const SECTION_FILL: Color32 = Color32::from_rgb(0x34, 0x49, 0x5e);

fn section<R>(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    ui.add_space(8.0);
    ui.label(RichText::new(title).strong());
    egui::Frame::group(ui.style())
        .fill(SECTION_FILL)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

/// Text the preview shows: the clock the overlay would start with right now.
fn preview_text(time: &str) -> String {
    match parse_hhmm(time) {
        Ok(target) => format_hms(compute_initial_remaining(
            target,
            chrono::Local::now().naive_local(),
        )),
        Err(_) => format_hms(0),
    }
}

/// Draw the settings screen. Returns `true` when the start button was clicked.
pub fn show(
    ctx: &egui::Context,
    form: &mut SettingsForm,
    families: &[String],
    fonts: &mut FontRegistry,
    enabled: bool,
) -> bool {
    let mut start = false;
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_enabled_ui(enabled, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                ui.heading("Countdown");

                section(ui, "⏰ Time", |ui| {
                    ui.label(RichText::new("Target time (HH:MM)").italics());
                    ui.add(
                        egui::TextEdit::singleline(&mut form.time)
                            .font(FontId::proportional(18.0))
                            .desired_width(120.0),
                    );
                    ui.small("24-hour clock, e.g. 18:00");
                });

                section(ui, "🔤 Font", |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Family");
                        egui::ComboBox::from_id_source("font_family")
                            .selected_text(form.font_family.as_str())
                            .width(220.0)
                            .show_ui(ui, |ui| {
                                for family in families {
                                    ui.selectable_value(
                                        &mut form.font_family,
                                        family.clone(),
                                        family.as_str(),
                                    );
                                }
                            });
                    });
                    ui.horizontal(|ui| {
                        ui.label("Size");
                        ui.add(
                            egui::DragValue::new(&mut form.font_size)
                                .clamp_range(MIN_FONT_SIZE..=MAX_FONT_SIZE),
                        );
                    });
                    ui.horizontal(|ui| {
                        ui.label("Color");
                        let mut color = form.color();
                        if ui.color_edit_button_srgba(&mut color).changed() {
                            form.set_color(color);
                        }
                        ui.monospace(&form.font_color);
                    });
                });

                section(ui, "📊 Preview", |ui| {
                    let spec = form.font_spec();
                    let family = fonts.font_family(ctx, &spec.family, spec.bold);
                    ui.vertical_centered(|ui| {
                        ui.add_space(16.0);
                        ui.label(
                            RichText::new(preview_text(&form.time))
                                .font(FontId::new(spec.size as f32, family))
                                .color(form.color()),
                        );
                        ui.add_space(16.0);
                    });
                });

                section(ui, "📝 End message", |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Shown when the countdown ends");
                        ui.add(
                            egui::TextEdit::singleline(&mut form.end_message)
                                .desired_width(f32::INFINITY),
                        );
                    });
                });

                ui.add_space(12.0);
                let button = egui::Button::new(RichText::new("▶ Start countdown").strong().size(16.0))
                    .fill(Color32::from_rgb(0x27, 0xae, 0x60))
                    .min_size(egui::vec2(ui.available_width(), 40.0));
                if ui.add(button).clicked() {
                    start = true;
                }
            });
        });
    });
    ctx.request_repaint_after(Duration::from_secs(1));
    start
}
