use std::{fmt, sync::Arc, time::Duration};

use compflow::prelude::Figure;
use egui_glow::EguiGlow;
use glow::{Context as GlowContext, HasContext};
use winit::{event::WindowEvent, window::Window};

use crate::{painter::draw_figure, EventLoop};

/// Name the configured font is registered under.
const CUSTOM_FONT: &str = "compflow-custom";

pub struct Render {
    /// The interface to the loaded OpenGL function.
    gl: Arc<GlowContext>,
    egui_glow: EguiGlow,
    info: OpenGLInfo,
}

impl Render {
    pub fn new(event_loop: &EventLoop, gl: Arc<GlowContext>) -> Self {
        let info = OpenGLInfo::new(&gl);
        let egui_glow = EguiGlow::new(event_loop, gl.clone(), None);

        Self {
            gl,
            egui_glow,
            info,
        }
    }

    /// Install a font ahead of egui's built in proportional fonts.
    pub fn install_font(&self, font_data: Vec<u8>) {
        let mut fonts = egui::FontDefinitions::default();
        fonts.font_data.insert(
            CUSTOM_FONT.to_owned(),
            egui::FontData::from_owned(font_data),
        );
        fonts
            .families
            .entry(egui::FontFamily::Proportional)
            .or_default()
            .insert(0, CUSTOM_FONT.to_owned());
        self.egui_glow.egui_ctx.set_fonts(fonts);
    }

    /// Feed a window event to egui. Returns whether a repaint is needed.
    pub fn on_event(&mut self, event: &WindowEvent<'_>) -> bool {
        let response: egui_winit::EventResponse = self.egui_glow.on_event(event);
        response.repaint
    }

    pub fn clear_window(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe {
            self.gl.clear_color(red, green, blue, alpha);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    /// Draw a frame of the figure. Returns the time until egui wants
    /// the next frame.
    pub fn paint(&mut self, window: &Window, figure: &Figure) -> Duration {
        let repaint_after = self.egui_glow.run(window, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none().fill(egui::Color32::WHITE))
                .show(ctx, |ui| {
                    let (response, painter) =
                        ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                    draw_figure(&painter, response.rect, figure);
                });
        });

        self.clear_window(1.0, 1.0, 1.0, 1.0);
        self.egui_glow.paint(window);

        repaint_after
    }

    /// Release GPU resources. Must be called before the GL context goes away.
    pub fn destroy(&mut self) {
        self.egui_glow.destroy();
    }

    pub fn opengl_info(&self) -> &OpenGLInfo {
        &self.info
    }
}

pub struct OpenGLInfo {
    pub version: String,
    pub renderer: String,
    pub vendor: String,
    pub shading_lang: String,
}

impl OpenGLInfo {
    pub fn new(gl: &GlowContext) -> Self {
        unsafe {
            Self {
                version: gl.get_parameter_string(glow::VERSION),
                renderer: gl.get_parameter_string(glow::RENDERER),
                vendor: gl.get_parameter_string(glow::VENDOR),
                shading_lang: gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
            }
        }
    }
}

impl fmt::Display for OpenGLInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self {
            version,
            renderer,
            vendor,
            shading_lang,
        } = self;
        writeln!(f, "OpenGL Version: {version}")?;
        writeln!(f, "Renderer: {renderer}")?;
        writeln!(f, "Vendor: {vendor}")?;
        writeln!(f, "Shading Language: {shading_lang}")?;
        Ok(())
    }
}
