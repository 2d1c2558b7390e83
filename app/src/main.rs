use std::time::Instant;

use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{Color32, Pos2, Rect, Sense, Shape, Stroke, Vec2};
use log::{error, info};
use mountain_core::{
    Align, FlatSpec, MountainConfig, Point, SeededRandom, TerrainGenerator, render_config_svg,
};
use mountain_core::config::RidgeStyle;
use mountain_storage::RangeStore;
use mountain_storage::models::RangeDoc;

const MONGO_URI: &str = "mongodb://localhost:27017";
const DB_NAME: &str = "mountain_db";
const COLLECTION: &str = "ranges";

struct FlatRow {
    pos: f64,
    width: f64,
    align: Align,
    name: String,
}

struct RangeApp {
    // parameters
    config: MountainConfig,
    seed: u64,
    name: String,
    flats: Vec<FlatRow>,
    ridge: bool,

    // last result
    points: Vec<Point>,
    status_message: String,
}

impl Default for RangeApp {
    fn default() -> Self {
        Self {
            config: MountainConfig::default(),
            seed: 2025,
            name: "range".to_string(),
            flats: Vec::new(),
            ridge: true,
            points: Vec::new(),
            status_message: String::new(),
        }
    }
}

impl RangeApp {
    // Settings as the generator sees them, including the edited flats
    fn current_config(&self) -> MountainConfig {
        let mut config = self.config.clone();
        config.flats = if self.flats.is_empty() {
            None
        } else {
            Some(
                self.flats
                    .iter()
                    .map(|f| FlatSpec {
                        pos: f.pos,
                        width: f.width,
                        align: f.align,
                        name: f.name.clone(),
                    })
                    .collect(),
            )
        };
        config.ridge = self.ridge.then(|| RidgeStyle {
            color: Some("#ffffff".to_string()),
            thickness: Some(1.0),
        });
        config
    }

    fn generate(&mut self) {
        let start = Instant::now();
        let config = self.current_config();
        match TerrainGenerator::new(config) {
            Ok(generator) => {
                self.points = generator.generate(&mut SeededRandom::new(self.seed));
                let ms = start.elapsed().as_secs_f32() * 1000.0;
                self.status_message = format!(
                    "Generated {} points in {:.2} ms (seed {})",
                    self.points.len(),
                    ms,
                    self.seed
                );
            }
            Err(e) => {
                self.points.clear();
                self.status_message = format!("Invalid settings: {}", e);
            }
        }
    }

    fn save_svg(&mut self) {
        if self.points.is_empty() {
            self.status_message = "Nothing to save yet".into();
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_file_name(format!("{}_{}.svg", self.name, self.seed))
            .save_file()
        else {
            return;
        };
        let config = self.current_config();
        // shadow depths come from the same seed as the range
        let svg = render_config_svg(&config, &self.points, &mut SeededRandom::new(self.seed));
        self.status_message = match std::fs::write(&path, svg) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => format!("Could not write {}: {}", path.display(), e),
        };
    }

    fn save_to_db(&mut self) {
        if self.points.is_empty() {
            self.status_message = "Nothing to save yet".into();
            return;
        }
        let doc = RangeDoc::new(
            self.name.clone(),
            self.seed as i64,
            self.current_config(),
            self.points.clone(),
        );
        let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(e) => {
                self.status_message = format!("Runtime error: {}", e);
                return;
            }
        };
        self.status_message = match rt.block_on(async {
            let store = RangeStore::init(MONGO_URI, DB_NAME, COLLECTION).await?;
            store.create(doc).await
        }) {
            Ok(()) => {
                info!("saved range '{}' (seed {})", self.name, self.seed);
                "Saved to MongoDB".into()
            }
            Err(e) => {
                error!("save failed: {}", e);
                format!("DB error: {}", e)
            }
        };
    }

    fn load_from_db(&mut self) {
        let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(e) => {
                self.status_message = format!("Runtime error: {}", e);
                return;
            }
        };
        let name = self.name.clone();
        let found = rt.block_on(async {
            let store = RangeStore::init(MONGO_URI, DB_NAME, COLLECTION).await?;
            store.read_by_name(&name).await
        });
        self.status_message = match found {
            Ok(Some(doc)) => {
                self.seed = doc.seed as u64;
                self.ridge = doc.config.ridge.is_some();
                self.flats = doc
                    .config
                    .flats
                    .iter()
                    .flatten()
                    .map(|f| FlatRow {
                        pos: f.pos,
                        width: f.width,
                        align: f.align,
                        name: f.name.clone(),
                    })
                    .collect();
                self.config = doc.config;
                self.points = doc.points;
                format!("Loaded '{}' from MongoDB", name)
            }
            Ok(None) => format!("No range named '{}'", name),
            Err(e) => format!("DB error: {}", e),
        };
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Mountain Range");
        ui.separator();

        ui.label("Name");
        ui.text_edit_singleline(&mut self.name);
        ui.label("Seed");
        ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));

        ui.separator();
        ui.label("Stage");
        ui.add(egui::Slider::new(&mut self.config.stage.width, 100.0..=2000.0).text("Width"));
        ui.add(egui::Slider::new(&mut self.config.stage.height, 50.0..=1000.0).text("Height"));

        ui.separator();
        ui.label("Peaks");
        ui.add(egui::Slider::new(&mut self.config.peaks.count, 0..=12).text("Count"));
        ui.add(egui::Slider::new(&mut self.config.peaks.detail, 0..=9).text("Detail"));
        ui.add(egui::Slider::new(&mut self.config.peaks.min_y, 0.0..=1000.0).text("Min height"));
        ui.add(egui::Slider::new(&mut self.config.peaks.max_y, 0.0..=1000.0).text("Max height"));
        ui.checkbox(&mut self.config.peaks.start_with_peak, "Start with a peak");

        ui.label("Valleys");
        ui.add(egui::Slider::new(&mut self.config.valleys.min_y, 0.0..=1000.0).text("Floor"));
        ui.checkbox(&mut self.ridge, "Ridge line");

        ui.separator();
        ui.label("Flats");
        let mut remove = None;
        for (i, flat) in self.flats.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut flat.name);
                if ui.small_button("✖").clicked() {
                    remove = Some(i);
                }
            });
            ui.add(egui::Slider::new(&mut flat.pos, 0.0..=1.0).text("Position"));
            ui.add(egui::Slider::new(&mut flat.width, 0.0..=500.0).text("Width"));
            egui::ComboBox::from_id_salt(("align", i))
                .selected_text(format!("{:?}", flat.align))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut flat.align, Align::Left, "Left");
                    ui.selectable_value(&mut flat.align, Align::Center, "Center");
                    ui.selectable_value(&mut flat.align, Align::Right, "Right");
                });
        }
        if let Some(i) = remove {
            self.flats.remove(i);
        }
        if ui.button("Add flat").clicked() {
            self.flats.push(FlatRow {
                pos: 0.5,
                width: 50.0,
                align: Align::Center,
                name: format!("flat{}", self.flats.len() + 1),
            });
        }

        ui.separator();
        if ui.button("Generate Range").clicked() {
            self.generate();
        }
        if ui.button("Save SVG…").clicked() {
            self.save_svg();
        }
        if ui.button("Save to DB…").clicked() {
            self.save_to_db();
        }
        if ui.button("Load from DB…").clicked() {
            self.load_from_db();
        }

        ui.separator();
        ui.label(&self.status_message);
    }

    // Draw the silhouette scaled into `rect`. The fill is built from one
    // quad per segment since the outline itself is not convex.
    fn preview(&self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let stage = &self.config.stage;
        let scale = (rect.width() / stage.width as f32).min(rect.height() / stage.height as f32);
        let origin = rect.center() - Vec2::new(stage.width as f32, stage.height as f32) * scale / 2.0;
        let to_screen = |x: f64, y: f64| origin + Vec2::new(x as f32, y as f32) * scale;

        let painter = ui.painter_at(rect);
        let bottom = stage.height;
        painter.rect_filled(
            Rect::from_min_size(origin, Vec2::new(stage.width as f32, stage.height as f32) * scale),
            0.0,
            Color32::from_rgb(182, 208, 230),
        );

        let mountain = Color32::from_rgb(52, 64, 82);
        for pair in self.points.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            painter.add(Shape::convex_polygon(
                vec![
                    to_screen(a.x, a.y),
                    to_screen(b.x, b.y),
                    to_screen(b.x, bottom),
                    to_screen(a.x, bottom),
                ],
                mountain,
                Stroke::NONE,
            ));
        }

        if self.ridge {
            let line: Vec<Pos2> = self.points.iter().map(|p| to_screen(p.x, p.y)).collect();
            painter.add(Shape::line(line, Stroke::new(1.0, Color32::WHITE)));
        }

        for p in &self.points {
            if let Some(name) = &p.flat_name {
                let at = to_screen(p.x, p.y);
                painter.circle_filled(at, 3.0, Color32::YELLOW);
                painter.text(
                    at - Vec2::new(0.0, 6.0),
                    egui::Align2::CENTER_BOTTOM,
                    name,
                    egui::FontId::proportional(12.0),
                    Color32::YELLOW,
                );
            }
        }
    }
}

impl App for RangeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| self.controls(ui));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.points.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("Click “Generate Range” to start");
                });
            } else {
                self.preview(ui);
            }
        });
    }
}

fn main() {
    env_logger::init();

    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([500.0, 300.0]),
        ..Default::default()
    };
    if let Err(e) = run_native(
        "Mountain Range Generator",
        opts,
        Box::new(|_cc| Ok(Box::new(RangeApp::default()))),
    ) {
        error!("app exited with an error: {}", e);
    }
}
