use super::compare;
use super::state::WorkflowEvent;
use super::PureVision;
use crate::utils::format_bytes;
use eframe::egui::{self, Color32, RichText};
use tracing::info;

const ACCENT: Color32 = Color32::from_rgb(96, 165, 250);
const BUTTON_FILL: Color32 = Color32::from_rgb(37, 99, 235);
const ERROR_RED: Color32 = Color32::from_rgb(220, 50, 50);

impl PureVision {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new("PURE VISION").size(30.0).strong());
                    ui.add_space(2.0);
                    ui.label(RichText::new("ULTRA RESOLUTION AI").color(ACCENT));
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new("Upscale photos up to 4x with an ESRGAN model")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);
                self.render_picker(ui);
                ui.add_space(16.0);
                self.render_actions(ui);

                if self.state.result.is_some() {
                    ui.add_space(24.0);
                    self.render_result(ui);
                }

                ui.add_space(24.0);
            });
        });
    }

    fn render_picker(&mut self, ui: &mut egui::Ui) {
        let loading = self.state.loading();
        ui.group(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.add_enabled_ui(!loading, |ui| {
                    let button =
                        egui::Button::new("📁 Select Image").min_size(egui::vec2(180.0, 36.0));
                    if ui.add(button).clicked() {
                        self.select_image(ui.ctx());
                    }
                });

                ui.add_space(8.0);
                match &self.state.image {
                    Some(image) => {
                        ui.label(format!(
                            "{} ({})",
                            image.file_name,
                            format_bytes(image.size())
                        ));
                    }
                    None => {
                        ui.label(
                            RichText::new("JPG or PNG, up to 5 MB")
                                .color(ui.visuals().text_color().gamma_multiply(0.6)),
                        );
                    }
                }

                if self.state.result.is_none() {
                    if let Some(texture) = &self.before_texture {
                        ui.add_space(10.0);
                        ui.add(
                            egui::Image::new(texture)
                                .max_size(egui::vec2(ui.available_width() - 24.0, 300.0)),
                        );
                    }
                }
                ui.add_space(12.0);
            });
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        let loading = self.state.loading();
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.state.can_upscale(), |ui| {
                let label = if loading {
                    "Processing..."
                } else {
                    "⬆ Enhance Image"
                };
                let button = egui::Button::new(RichText::new(label).size(16.0).strong())
                    .min_size(egui::vec2(220.0, 44.0))
                    .fill(BUTTON_FILL);
                if ui.add(button).clicked() {
                    self.start_upscale(ui.ctx());
                }
            });

            if loading {
                ui.add_space(10.0);
                ui.spinner();
            }
            if !self.state.status.is_empty() {
                ui.add_space(8.0);
                ui.label(RichText::new(self.state.status.clone()).color(ACCENT));
            }
            if !self.state.error.is_empty() {
                ui.add_space(8.0);
                ui.colored_label(ERROR_RED, self.state.error.clone());
            }
        });
    }

    fn render_result(&mut self, ui: &mut egui::Ui) {
        let Some(result) = self.state.result.clone() else {
            return;
        };
        let before = self.before_texture.clone();
        let after = self.result_texture.clone();

        ui.separator();
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("Comparison").size(20.0));
        });
        ui.add_space(8.0);

        match after {
            Some(after) => {
                let mut moved = None;
                ui.vertical_centered(|ui| {
                    moved = compare::comparison_slider(
                        ui,
                        before.as_ref(),
                        &after,
                        self.state.slider,
                    );
                });
                if let Some(position) = moved {
                    self.state.apply(WorkflowEvent::SliderMoved(position));
                }
            }
            None => {
                ui.vertical_centered(|ui| {
                    if self.result_fetch_failed {
                        ui.label("The processed image could not be previewed here. Use Save Image to open it.");
                    } else {
                        ui.spinner();
                        ui.add_space(4.0);
                        ui.label(
                            RichText::new("Fetching the processed image...")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    }
                });
            }
        }

        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            let save = egui::Button::new("💾 Save Image").min_size(egui::vec2(200.0, 36.0));
            if ui.add(save).clicked() {
                info!("Opening processed image: {}", result.upscaled_url);
                let _ = open::that(&result.upscaled_url);
            }
            ui.add_space(5.0);
            let restart = egui::Button::new("🔄 Start Over").min_size(egui::vec2(200.0, 36.0));
            if ui.add(restart).clicked() {
                self.reset();
            }
        });

        if let Some(analysis) = result.analysis {
            ui.add_space(16.0);
            ui.group(|ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("AI ANALYSIS REPORT").small().strong());
                    ui.add_space(6.0);
                    egui::Grid::new("analysis_report")
                        .num_columns(2)
                        .spacing([40.0, 6.0])
                        .show(ui, |ui| {
                            ui.label("Model architecture");
                            ui.monospace("ESRGAN");
                            ui.end_row();
                            ui.label("Processing time");
                            ui.monospace(analysis.duration);
                            ui.end_row();
                            ui.label("Pixel accuracy (PSNR)");
                            ui.monospace(analysis.psnr);
                            ui.end_row();
                            if let Some(improvement) = analysis.improvement {
                                ui.label("Improvement");
                                ui.monospace(improvement);
                                ui.end_row();
                            }
                        });
                });
            });
        }
    }
}
