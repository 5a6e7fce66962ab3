//! Native result window: one viewport with a comparison tab and a final-image tab.

use egui::{ColorImage, TextureHandle, TextureOptions};
use image::RgbImage;

use crate::CliResult;

const WINDOW_TITLE: &str = "Enhanced Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Comparison,
    Final,
}

impl Tab {
    fn title(self) -> &'static str {
        match self {
            Tab::Comparison => "Comparison",
            Tab::Final => "Final Enhanced Image",
        }
    }
}

struct Textures {
    original: TextureHandle,
    enhanced: TextureHandle,
}

struct EnhanceViewer {
    original: RgbImage,
    enhanced: RgbImage,
    textures: Option<Textures>,
    tab: Tab,
}

fn to_color_image(img: &RgbImage) -> ColorImage {
    ColorImage::from_rgb(
        [img.width() as usize, img.height() as usize],
        img.as_raw().as_slice(),
    )
}

impl EnhanceViewer {
    fn textures(&mut self, ctx: &egui::Context) -> &Textures {
        self.textures.get_or_insert_with(|| Textures {
            original: ctx.load_texture(
                "original",
                to_color_image(&self.original),
                TextureOptions::LINEAR,
            ),
            enhanced: ctx.load_texture(
                "enhanced",
                to_color_image(&self.enhanced),
                TextureOptions::LINEAR,
            ),
        })
    }
}

impl eframe::App for EnhanceViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in [Tab::Comparison, Tab::Final] {
                    ui.selectable_value(&mut self.tab, tab, tab.title());
                }
            });
        });

        let tab = self.tab;
        let textures = self.textures(ctx);
        let (original, enhanced) = (textures.original.clone(), textures.enhanced.clone());

        egui::CentralPanel::default().show(ctx, |ui| match tab {
            Tab::Comparison => {
                ui.columns(2, |cols| {
                    cols[0].vertical_centered(|ui| {
                        ui.heading("Original Image");
                        ui.add(egui::Image::new(&original).shrink_to_fit());
                    });
                    cols[1].vertical_centered(|ui| {
                        ui.heading("Enhanced Image");
                        ui.add(egui::Image::new(&enhanced).shrink_to_fit());
                    });
                });
            }
            Tab::Final => {
                ui.vertical_centered(|ui| {
                    ui.heading(Tab::Final.title());
                    ui.add(egui::Image::new(&enhanced).shrink_to_fit());
                });
            }
        });
    }
}

/// Block until the user closes the window.
pub fn show(original: RgbImage, enhanced: RgbImage) -> CliResult<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::vec2(1200.0, 600.0))
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    tracing::info!("opening viewer window");
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(EnhanceViewer {
                original,
                enhanced,
                textures: None,
                tab: Tab::Comparison,
            }))
        }),
    )?;
    Ok(())
}
