use std::time::{Duration, Instant};

use compflow::prelude::Figure;
use log::{error, info};
use winit::{
    event::{Event as EV, StartCause, WindowEvent as WE},
    event_loop::{ControlFlow, EventLoopBuilder},
    platform::run_return::EventLoopExtRunReturn,
};

use crate::{
    actions::*, config::ViewerConf, error::AppError, render::Render, window::WindowContext,
    EventLoop, InputMap,
};

/// Flowchart viewer application
pub struct FlowchartApp {
    ctx: WindowContext,
    render: Render,
    figure: Figure,
    input_map: InputMap,
    conf: ViewerConf,
}

impl FlowchartApp {
    /// Create the viewer window and lay out the pipeline figure.
    pub fn new(event_loop: &EventLoop, conf: ViewerConf) -> Result<Self, AppError> {
        let ctx = WindowContext::new(event_loop, conf.window_size)?;

        let render = Render::new(event_loop, ctx.gl.clone());
        info!("created OpenGL renderer:\n{}", render.opengl_info());

        if let Some(font_path) = &conf.font {
            info!("load font: {}", font_path.display());
            render.install_font(std::fs::read(font_path)?);
        }

        let input_map = InputMap::new(&conf.input);

        Ok(Self {
            ctx,
            render,
            figure: compflow::pipeline_figure(),
            input_map,
            conf,
        })
    }

    pub fn create_event_loop() -> EventLoop {
        EventLoopBuilder::new().build()
    }

    /// Write the figure to the configured SVG path.
    pub fn export(&self) -> Result<(), AppError> {
        compflow::svg::write_to_path(&self.figure, &self.conf.export_path)?;
        Ok(())
    }

    fn redraw(&mut self) -> Result<Duration, AppError> {
        self.ctx.make_context_current()?;
        let repaint_after = self.render.paint(&self.ctx.window, &self.figure);
        self.ctx.swap_buffers()?;
        Ok(repaint_after)
    }
}

/// Event Loop.
impl FlowchartApp {
    pub fn run(&mut self, event_loop: &mut EventLoop) -> Result<(), AppError> {
        let main_window_id = self.ctx.window_id();
        let mut result = Ok(());

        event_loop.run_return(|event, _, control_flow| {
            match event {
                EV::NewEvents(cause) => {
                    // Frame start
                    self.input_map.clear_state();

                    if let StartCause::ResumeTimeReached { .. } = cause {
                        self.ctx.request_redraw();
                    }
                }
                EV::MainEventsCleared => {
                    for action in self.input_map.drain_events() {
                        log::debug!("action: {action}");
                    }

                    if self.input_map.is_action_pressed(EXPORT) {
                        if let Err(err) = self.export() {
                            error!("{err}");
                        }
                    }

                    if self.input_map.is_action_pressed(EXIT) {
                        info!("exit");
                        control_flow.set_exit();
                    }
                }
                EV::RedrawRequested(_) => match self.redraw() {
                    Ok(repaint_after) => {
                        if matches!(control_flow, ControlFlow::ExitWithCode(_)) {
                            return;
                        }
                        if repaint_after.is_zero() {
                            self.ctx.request_redraw();
                            control_flow.set_poll();
                        } else if let Some(at) = Instant::now().checked_add(repaint_after) {
                            control_flow.set_wait_until(at);
                        } else {
                            control_flow.set_wait();
                        }
                    }
                    Err(err) => {
                        result = Err(err);
                        control_flow.set_exit();
                    }
                },
                EV::WindowEvent { window_id, event } if window_id == main_window_id => {
                    match &event {
                        WE::Resized(size) => self.ctx.resize_surface(*size),
                        WE::ScaleFactorChanged { new_inner_size, .. } => {
                            self.ctx.resize_surface(**new_inner_size)
                        }
                        WE::KeyboardInput { input, .. } => {
                            if let Some(virtual_keycode) = input.virtual_keycode {
                                self.input_map.push_key(virtual_keycode, input.state);
                            }
                        }
                        WE::CloseRequested | WE::Destroyed => {
                            control_flow.set_exit();
                        }
                        _ => { /* blank */ }
                    }

                    if self.render.on_event(&event) {
                        self.ctx.request_redraw();
                    }
                }
                EV::LoopDestroyed => {
                    self.render.destroy();
                }
                _ => { /* blank */ }
            }
        });

        result
    }
}
