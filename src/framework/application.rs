use std::sync::Arc;

use log::{error, info};
use winit_input_helper::WinitInputHelper;
use winit::{
    event::{Event, WindowEvent},
    platform::run_return::EventLoopExtRunReturn,
    window::{Window, WindowBuilder},
    event_loop::{EventLoop, ControlFlow},
};

use super::{
    gpu,
    clock::{Clock, Tick},
    config::RunParams,
    error::BootstrapError,
    gui::{Gui, style_gui},
    viewport::HostWindow,
};

/// What the application loop should do after a lesson handled something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResultAction {
    None, Redraw, Exit
}
impl UpdateResultAction {
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (UpdateResultAction::Exit, _) => UpdateResultAction::Exit,
            (_, UpdateResultAction::Exit) => UpdateResultAction::Exit,
            (UpdateResultAction::Redraw, _) => UpdateResultAction::Redraw,
            (_, UpdateResultAction::Redraw) => UpdateResultAction::Redraw,
            _ => UpdateResultAction::None,
        }
    }
}

/// Everything a lesson gets to build itself from.
pub struct Context<'a> {
    pub params: &'a RunParams,
    pub window: &'a Window,
    pub gpu:    Arc<gpu::Context>,
    /// Container debug panels are drawn into
    pub gui:    &'a egui::Context,
}

/// A lesson driven by the application loop.
pub trait Lesson {
    /// Input not consumed by the gui.
    fn input(&mut self, input: &WinitInputHelper) -> UpdateResultAction;

    /// Fixed rate update.
    fn update(&mut self, tick: &Tick) -> UpdateResultAction;

    /// Called once per displayed frame with its timestamp in milliseconds, before the gui is built.
    fn frame(&mut self, now_ms: f64);

    fn gui(&mut self, ctx: &egui::Context);

    /// Window size or pixel ratio changed.
    fn resize(&mut self, host: &dyn HostWindow) -> UpdateResultAction;

    fn render(&mut self, gui: &mut Gui) -> Result<(), wgpu::SurfaceError>;
}

pub fn run<L, I>(init: I, params: RunParams) -> Result<(), BootstrapError>
where
    L: Lesson,
    I: FnOnce(&Context) -> Result<L, BootstrapError>,
{
    let mut event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(params.window_name.as_str())
        .with_inner_size(winit::dpi::LogicalSize::new(params.window_width, params.window_height))
        .build(&event_loop)?;
    let gpu = Arc::new(pollster::block_on(gpu::Context::new(&window))?);

    let mut gui = Gui::new(&event_loop, &window, style_gui);

    let context = Context {
        params: &params,
        window: &window,
        gpu:    gpu.clone(),
        gui:    &gui.egui_ctx,
    };
    let mut lesson = init(&context)?;
    info!("Lesson \"{}\" initialized", params.window_name);

    // Execution control
    let mut input = WinitInputHelper::new();
    let mut clock = Clock::now(params.tick_per_second);

    // Main loop
    let mut event_consumed_by_gui = false;
    window.request_redraw();

    event_loop.run_return(move |event, _, control_flow| {
        let mut flow_result_action = UpdateResultAction::None;

        match event {
            Event::NewEvents(_) |
            Event::MainEventsCleared |
            Event::WindowEvent { .. } => {

                // Let gui process window event and when it does not handle it, update the lesson
                if let Event::WindowEvent { event, .. } = &event {
                    match event {
                        // x11 sends this event when moving cursor on that causes to ignore dragging of egui slides and such
                        WindowEvent::AxisMotion { .. } => {},

                        // rest of the events are handled by egui
                        _ => event_consumed_by_gui = gui.on_event(event).consumed,
                    }
                }

                // Input helper gathers events into a coherent input state, ready once all events of a step arrived
                if input.update(&event) {
                    let input_result = if input.window_resized().is_some() {
                        lesson.resize(&window)
                    } else if let Some(scale_factor) = input.scale_factor_changed() {
                        gui.set_scale_factor(scale_factor);
                        lesson.resize(&window)
                    } else if input.close_requested() || input.destroyed() {
                        UpdateResultAction::Exit
                    } else if !event_consumed_by_gui {
                        lesson.input(&input)
                    } else {
                        UpdateResultAction::None
                    };

                    flow_result_action = flow_result_action.combine(input_result);
                }
            },

            Event::RedrawRequested(_) => {
                lesson.frame(clock.elapsed_ms(std::time::Instant::now()));
                gui.run(&window, |ctx| lesson.gui(ctx));

                flow_result_action = match lesson.render(&mut gui) {
                    // Request redraw immediately after frame is rendered, to let it run as fast as possible and let vSync to limit FPS by blocking
                    Ok(()) => UpdateResultAction::Redraw,
                    Err(err) => {
                        error!("Rendering failed: {}", err);
                        UpdateResultAction::Exit
                    },
                };
            },
            _ => {} // Ignore other events
        }

        // Update lesson only when is its time to do so
        if clock.tick() {
            let update_result = lesson.update(clock.current_tick());
            flow_result_action = flow_result_action.combine(update_result);
        } else {
            // Schedule next tick as a time to wake up in case of idling
            *control_flow = ControlFlow::WaitUntil(*clock.next_scheduled_tick())
        };

        // Decide on final control flow based on combination of all result actions
        match flow_result_action {
            UpdateResultAction::Exit => *control_flow = ControlFlow::Exit,
            UpdateResultAction::Redraw => window.request_redraw(),
            _ => {},
        }
    });

    info!("Application loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::UpdateResultAction::*;

    #[test]
    fn exit_wins_over_everything() {
        assert_eq!(Exit.combine(Redraw), Exit);
        assert_eq!(None.combine(Exit), Exit);
        assert_eq!(Redraw.combine(Exit), Exit);
    }

    #[test]
    fn redraw_wins_over_none() {
        assert_eq!(Redraw.combine(None), Redraw);
        assert_eq!(None.combine(Redraw), Redraw);
        assert_eq!(None.combine(None), None);
    }
}
