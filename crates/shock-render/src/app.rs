// ApplicationHandler and event loop for the blocking chart window.

use egui_winit_vulkano::{Gui, GuiConfig};
use vulkano::sync::GpuFuture;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowId,
};

use crate::chart::Chart;
use crate::sink::DisplaySink;
use crate::{plot_view, renderer::Renderer, ui, RenderError};

/// Display sink that opens a window and blocks until it is closed.
#[derive(Debug, Clone)]
pub struct ChartWindow {
    title: String,
}

impl ChartWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for ChartWindow {
    fn default() -> Self {
        Self::new("Normal Shock Relations")
    }
}

impl DisplaySink for ChartWindow {
    fn show(&mut self, chart: &Chart) -> Result<(), RenderError> {
        let event_loop =
            EventLoop::new().map_err(|e| RenderError::Display(format!("event loop: {e}")))?;
        let mut app = App::new(chart.clone(), self.title.clone());
        event_loop
            .run_app(&mut app)
            .map_err(|e| RenderError::Display(format!("event loop: {e}")))?;
        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App {
    renderer: Option<Renderer>,
    gui: Option<Gui>,
    chart: Chart,
    title: String,
    /// First fatal error; stops the event loop.
    error: Option<RenderError>,
}

impl App {
    fn new(chart: Chart, title: String) -> Self {
        Self {
            renderer: None,
            gui: None,
            chart,
            title,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RenderError) {
        eprintln!("Display error: {error}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        let renderer = match Renderer::new(event_loop, &self.title) {
            Ok(r) => r,
            Err(e) => return self.fail(event_loop, e),
        };

        let gui = Gui::new(
            event_loop,
            renderer.surface.clone(),
            renderer.queue.clone(),
            renderer.swapchain_format(),
            GuiConfig {
                is_overlay: false,
                ..Default::default()
            },
        );

        renderer.window.request_redraw();
        self.renderer = Some(renderer);
        self.gui = Some(gui);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gui) = self.gui.as_mut() {
            gui.update(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(_) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.recreate_swapchain = true;
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render_frame() {
                    self.fail(event_loop, e);
                }
                return;
            }
            _ => {}
        }

        // Hover and resize change what egui draws.
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Only repaint in response to window events.
    }
}

impl App {
    fn render_frame(&mut self) -> Result<(), RenderError> {
        let (Some(renderer), Some(gui)) = (self.renderer.as_mut(), self.gui.as_mut()) else {
            return Ok(());
        };

        let Some((image_index, acquire_future)) = renderer.begin_frame()? else {
            return Ok(());
        };
        let before_future = renderer.take_previous_frame_end().join(acquire_future);

        let chart = &self.chart;
        gui.immediate_ui(|gui| {
            let ctx = gui.context();
            ui::draw_summary(&ctx, chart);
            plot_view::draw_chart(&ctx, chart);
        });

        let image_view = renderer.image_views[image_index as usize].clone();
        let after_future = gui.draw_on_image(before_future, image_view);
        let final_future = renderer.present(after_future, image_index);
        renderer.end_frame(final_future);
        Ok(())
    }
}
