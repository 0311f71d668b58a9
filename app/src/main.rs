use std::time::Instant;

use dla_core::{DlaSimulation, WalkConfig, flatten2};
use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{ColorImage, TextureHandle};
use image::GrayImage;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum OutputKind {
    HeightField,
    PointHeights,
    Aggregate,
}
impl Default for OutputKind {
    fn default() -> Self {
        OutputKind::HeightField
    }
}

struct DlaApp {
    // parameters
    output_kind: OutputKind,
    target_size: u32,
    initial_size: u32,
    particles: u32,
    seed: u64,
    centering_bias: f64,
    expand_increment: u32,

    // generated texture
    terrain_texture: Option<TextureHandle>,

    // timing & status
    last_duration: Option<f32>,
    status_message: String,

    // Store the last grayscale buffer and its size for PNG export
    last_gray: Option<Vec<u8>>,
    last_size: usize,
}

impl Default for DlaApp {
    fn default() -> Self {
        Self {
            output_kind: OutputKind::HeightField,
            target_size: 256,
            initial_size: 4,
            particles: 10_000,
            seed: 2025,
            centering_bias: 0.03,
            expand_increment: 10,
            terrain_texture: None,
            last_duration: None,
            status_message: String::new(),
            last_gray: None,
            last_size: 0,
        }
    }
}

impl App for DlaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("DLA Terrain Generator");
            ui.separator();

            // Output selector
            ui.label("Output");
            egui::ComboBox::from_label("Rendered layer")
                .selected_text(format!("{:?}", self.output_kind))
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.output_kind,
                        OutputKind::HeightField,
                        "HeightField",
                    );
                    ui.selectable_value(
                        &mut self.output_kind,
                        OutputKind::PointHeights,
                        "PointHeights",
                    );
                    ui.selectable_value(&mut self.output_kind, OutputKind::Aggregate, "Aggregate");
                });

            ui.label("Target size");
            ui.add(egui::Slider::new(&mut self.target_size, 64..=1024));

            ui.label("Initial size");
            ui.add(egui::Slider::new(&mut self.initial_size, 2..=64));

            ui.label("Particles");
            ui.add(
                egui::Slider::new(&mut self.particles, 100..=100_000).logarithmic(true),
            );

            ui.label("Seed");
            ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));

            ui.label("Centering bias");
            ui.add(egui::Slider::new(&mut self.centering_bias, 0.0..=0.2));

            ui.label("Expand increment");
            ui.add(egui::Slider::new(&mut self.expand_increment, 1..=50));

            ui.separator();

            // Generate & measure
            if ui.button("Generate Terrain").clicked() {
                let start = Instant::now();
                let walk = WalkConfig {
                    centering_bias: self.centering_bias,
                    expand_increment: self.expand_increment as usize,
                };
                match DlaSimulation::with_config(
                    self.target_size as usize,
                    self.initial_size as usize,
                    self.seed,
                    walk,
                    1,
                ) {
                    Ok(mut sim) => {
                        sim.run(self.particles as usize);
                        let grid = match self.output_kind {
                            OutputKind::HeightField => sim.height_field_image(),
                            OutputKind::PointHeights => sim.point_height_image(),
                            OutputKind::Aggregate => sim.aggregate_image(),
                        };
                        let size = sim.lattice().size();
                        let flat = flatten2(&grid);

                        let color_image = ColorImage::from_gray([size, size], &flat);
                        self.terrain_texture = Some(ctx.load_texture(
                            "terrain",
                            color_image,
                            egui::TextureOptions::NEAREST,
                        ));
                        self.last_gray = Some(flat);
                        self.last_size = size;
                        self.last_duration = Some(start.elapsed().as_secs_f32() * 1000.0);
                        self.status_message = format!(
                            "Generated in {:.2} ms (seed {})",
                            self.last_duration.unwrap(),
                            self.seed
                        );
                    }
                    Err(e) => {
                        self.status_message = format!("Error: {e}");
                    }
                }
                ctx.request_repaint();
            }

            // Save to PNG
            if ui.button("Save PNG…").clicked() {
                if let Some(buf) = &self.last_gray {
                    let filename = format!("dla_terrain_{}.png", self.seed);
                    let img = GrayImage::from_raw(
                        self.last_size as u32,
                        self.last_size as u32,
                        buf.clone(),
                    )
                    .expect("buffer matches dimensions");
                    img.save(&filename).unwrap();
                    self.status_message = format!("Saved {}", filename);
                }
            }

            ui.separator();
            ui.label(&self.status_message);
        });

        // central display
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(tex) = &self.terrain_texture {
                let available = ui.available_size();
                ui.image((tex.id(), available));
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Click “Generate” to start");
                });
            }
        });
    }
}

fn main() {
    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "DLA Terrain Generator",
        opts,
        Box::new(|_cc| Ok(Box::new(DlaApp::default()))),
    )
    .unwrap();
}
