use egui_winit::EventResponse;
use winit::{event::WindowEvent, event_loop::EventLoopWindowTarget, window::Window};

/// Container hosting egui for one window, debug panels attach to its `egui_ctx`.
pub struct Gui {
    pub egui_ctx:       egui::Context,
    pub egui_winit:     egui_winit::State,
    pub data_to_render: Option<GuiDataToRender>,
}

/// Output of the last gui run, taken by the renderer when it draws a frame.
pub struct GuiDataToRender {
    pub textures_delta: egui::TexturesDelta,
    pub shapes:         Vec<egui::epaint::ClippedShape>,
}

impl Gui {
    pub fn new<T, F>(event_loop: &EventLoopWindowTarget<T>, window: &Window, style_gui: F) -> Self
    where
        F: FnOnce(egui::Style) -> egui::Style,
    {
        let egui_ctx = egui::Context::default();

        // set global egui styling
        egui_ctx.set_style(style_gui((*egui_ctx.style()).clone()));

        let mut egui_winit = egui_winit::State::new(event_loop);
        egui_winit.set_pixels_per_point(window.scale_factor() as f32);

        Self {
            egui_ctx,
            egui_winit,
            data_to_render: None,
        }
    }

    pub fn on_event(&mut self, event: &WindowEvent<'_>) -> EventResponse {
        self.egui_winit.on_event(&self.egui_ctx, event)
    }

    /// Input coordinates arrive in physical pixels of the window, hence the native scale factor.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.egui_winit.set_pixels_per_point(scale_factor as f32);
    }

    /// Runs one gui frame, returns true when egui asks for an immediate repaint.
    pub fn run(&mut self, window: &Window, run_ui: impl FnOnce(&egui::Context)) -> bool {
        let raw_input = self.egui_winit.take_egui_input(window);

        let egui::FullOutput {
            platform_output,
            repaint_after,
            textures_delta,
            shapes,
        } = self.egui_ctx.run(raw_input, run_ui);

        // Update window state (mainly to change cursors)
        self.egui_winit.handle_platform_output(window, &self.egui_ctx, platform_output);

        // Output not yet drawn is merged, so texture updates are never lost
        let textures_delta = match self.data_to_render.take() {
            Some(mut data) => {
                data.textures_delta.append(textures_delta);
                data.textures_delta
            },
            None => textures_delta,
        };

        self.data_to_render = Some(GuiDataToRender {
            textures_delta,
            shapes,
        });

        repaint_after.is_zero()
    }
}

pub fn style_gui(mut style: egui::Style) -> egui::Style {
    // adjust intrusive window shadowing
    style.visuals.window_shadow = egui::epaint::Shadow {
        extrusion: 0.0,
        color: egui::Color32::BLACK,
    };
    style
}
