use std::path::Path;

use log::{info, warn};
use winit::event::VirtualKeyCode;
use winit_input_helper::WinitInputHelper;

use crate::{
    animation::Typewriter,
    framework::{
        application::{Context, Lesson, UpdateResultAction},
        bootstrap,
        clock::Tick,
        error::BootstrapError,
        gpu::Texture,
        gui::{DebugPanel, Gui},
        loaders::{Font, FontLoader},
        renderer::WgpuSurface,
        viewport::HostWindow,
        SceneContext,
    },
};

const BACKGROUND: &str = "background";
const DAMPING: &str = "damping";
const TYPING_INTERVAL: &str = "typing interval";

/// Lesson parameters as currently set in the debug panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LessonSettings {
    pub background:         [f32; 3],
    pub damping:            bool,
    pub typing_interval_ms: f64,
}

impl LessonSettings {
    pub fn register(&self, panel: &mut DebugPanel) {
        panel
            .set_title("Lesson")
            .add_color(BACKGROUND, self.background)
            .add_bool(DAMPING, self.damping)
            .add_float(TYPING_INTERVAL, self.typing_interval_ms as f32, 5.0..=200.0);
    }

    /// Reads the settings back, parameters missing from the panel keep their current value.
    pub fn read(&self, panel: &DebugPanel) -> Self {
        Self {
            background:         panel.color(BACKGROUND).unwrap_or(self.background),
            damping:            panel.bool(DAMPING).unwrap_or(self.damping),
            typing_interval_ms: panel.float(TYPING_INTERVAL).map_or(self.typing_interval_ms, f64::from),
        }
    }
}

/// Typeface at `path`, or nothing when it cannot be loaded.
pub fn load_font(loader: &FontLoader, path: &Path) -> Option<Font> {
    match loader.load(path) {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("Headline font not loaded: {}", err);
            None
        },
    }
}

/// Texture drawn by the gui, the GPU texture has to live as long as its id is used.
struct Logo {
    _texture: Texture,
    id:       egui::TextureId,
    size:     egui::Vec2,
}

/// Orbiting camera over a plain background, with a headline typed over the scene.
pub struct DemoLesson {
    scene:    SceneContext<WgpuSurface>,
    settings: LessonSettings,
    headline: String,
    typed:    String,
    typewriter: Typewriter,
    logo:     Option<Logo>,
}

impl DemoLesson {
    pub fn new(context: &Context) -> Result<Self, BootstrapError> {
        let surface = WgpuSurface::new(context.gpu.clone())?;
        let mut scene = bootstrap(surface, context.gui, context.window)?;

        let [r, g, b] = context.params.clear_color;
        let settings = LessonSettings {
            background:         [r, g, b],
            damping:            scene.controls.enable_damping(),
            typing_interval_ms: context.params.typing_interval_ms,
        };
        settings.register(&mut scene.gui);

        let logo = context.params.logo_texture.as_ref().and_then(|path| {
            match scene.load_texture(path) {
                Ok(texture) => {
                    let size = texture.texture.size();
                    let id = scene.renderer.surface_mut().register_texture(&texture);
                    Some(Logo {
                        _texture: texture,
                        id,
                        size: egui::vec2(size.width as f32, size.height as f32),
                    })
                },
                Err(err) => {
                    warn!("Logo not loaded: {}", err);
                    None
                },
            }
        });

        let headline = context.params.headline.clone();
        if let Some(font) = context.params.headline_font.as_ref().and_then(|path| load_font(&scene.font_loader, path)) {
            info!(
                "Headline is {:.2} em wide in {}",
                font.text_width(&headline, 1.0),
                font.family_name
            );
        }

        let typewriter = Typewriter::with_interval(&headline, settings.typing_interval_ms);

        let mut lesson = Self {
            scene,
            settings,
            headline,
            typed: String::new(),
            typewriter,
            logo,
        };
        lesson.apply_settings();
        Ok(lesson)
    }

    /// Drops the running reveal and types the headline again from scratch.
    fn restart_headline(&mut self) {
        self.typed.clear();
        self.typewriter = Typewriter::with_interval(&self.headline, self.settings.typing_interval_ms);
    }

    fn apply_settings(&mut self) {
        let [r, g, b] = self.settings.background;
        self.scene.renderer.clear_color = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        };

        if self.scene.controls.enable_damping() != self.settings.damping {
            self.scene.controls.set_enable_damping(self.settings.damping);
        }

        if self.typewriter.interval_ms() != self.settings.typing_interval_ms {
            self.restart_headline();
        }
    }
}

impl Lesson for DemoLesson {
    fn input(&mut self, input: &WinitInputHelper) -> UpdateResultAction {
        if input.key_pressed(VirtualKeyCode::Escape) {
            return UpdateResultAction::Exit;
        }
        if input.key_pressed(VirtualKeyCode::H) {
            let visible = !self.scene.gui.is_visible();
            self.scene.gui.set_visible(visible);
        }
        if input.key_pressed(VirtualKeyCode::Space) {
            info!("Retyping headline");
            self.restart_headline();
        }
        self.scene.controls.on_input(input);
        UpdateResultAction::None
    }

    fn update(&mut self, tick: &Tick) -> UpdateResultAction {
        self.scene.update(tick.delta.as_secs_f32());
        UpdateResultAction::None
    }

    fn frame(&mut self, now_ms: f64) {
        // a finished reveal leaves the text as is
        let _ = self.typewriter.on_tick(now_ms, &mut self.typed);
    }

    fn gui(&mut self, ctx: &egui::Context) {
        if self.scene.gui.show() {
            self.settings = self.settings.read(&self.scene.gui);
            self.apply_settings();
        }

        egui::Area::new("headline")
            .anchor(egui::Align2::CENTER_TOP, [0.0, 40.0])
            .interactable(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(self.typed.as_str()).size(28.0).strong());
                    if let Some(logo) = &self.logo {
                        ui.image(logo.id, logo.size);
                    }
                });
            });
    }

    fn resize(&mut self, host: &dyn HostWindow) -> UpdateResultAction {
        match self.scene.handle_resize(host) {
            Ok(()) => UpdateResultAction::Redraw,
            Err(err) => {
                warn!("Resize failed: {}", err);
                UpdateResultAction::None
            },
        }
    }

    fn render(&mut self, gui: &mut Gui) -> Result<(), wgpu::SurfaceError> {
        self.scene.renderer.render(gui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LessonSettings {
        LessonSettings {
            background:         [0.1, 0.2, 0.3],
            damping:            true,
            typing_interval_ms: 20.0,
        }
    }

    #[test]
    fn registered_settings_read_back_unchanged() {
        let mut panel = DebugPanel::new(&egui::Context::default());
        settings().register(&mut panel);

        assert_eq!(panel.title(), "Lesson");
        assert_eq!(panel.params().len(), 3);
        assert_eq!(settings().read(&panel), settings());
    }

    #[test]
    fn panel_changes_are_picked_up() {
        let mut panel = DebugPanel::new(&egui::Context::default());
        settings().register(&mut panel);
        panel.add_bool(DAMPING, false).add_color(BACKGROUND, [1.0, 0.0, 0.0]);
        panel.set_float(TYPING_INTERVAL, 500.0);

        let read = settings().read(&panel);
        assert!(!read.damping);
        assert_eq!(read.background, [1.0, 0.0, 0.0]);
        assert_eq!(read.typing_interval_ms, 200.0);
    }

    #[test]
    fn headline_font_is_optional() {
        let loader = FontLoader::default();
        assert!(load_font(&loader, Path::new("/nonexistent/helvetiker.json")).is_none());

        let path = std::env::temp_dir().join(format!("lesson-headline-font-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "familyName": "Plain", "resolution": 1000, "glyphs": { "H": { "ha": 600 }, "i": { "ha": 250 } } }"#,
        )
        .unwrap();
        let font = load_font(&loader, &path);
        std::fs::remove_file(&path).unwrap();

        let font = font.unwrap();
        assert_eq!(font.family_name, "Plain");
        assert!((font.text_width("Hi", 1.0) - 0.85).abs() < 1e-6);
    }

    #[test]
    fn missing_params_keep_current_values() {
        let panel = DebugPanel::new(&egui::Context::default());
        assert_eq!(settings().read(&panel), settings());
    }
}
