use std::sync::Arc;

use anyhow::Context;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture, wgpu::TextureFormat};
use tracing::{debug, error};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use super::{frame::RenderFrame, sleeper::Sleeper};

/// Draws the frame and optionally returns a new window title.
pub type DrawCallback = Box<dyn FnMut(RenderFrame) -> Option<String>>;

pub struct RendererWindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u64,
    pub draw_callback: DrawCallback,
}

pub struct RendererWindow {
    config: RendererWindowConfig,
    resumed_window: Option<ResumedWindow>,
    sleeper: Sleeper,
    failure: Option<anyhow::Error>,
}

struct ResumedWindow {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    title: String,
}

impl RendererWindow {
    pub fn new(config: RendererWindowConfig) -> Self {
        let sleeper = Sleeper::from_fps(config.target_fps);

        Self {
            config,
            resumed_window: None,
            sleeper,
            failure: None,
        }
    }

    /// Blocks on the event loop until the window is closed.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new().context("Creating event loop")?;
        event_loop.run_app(&mut self).context("Running event loop")?;

        match self.failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    fn open(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<ResumedWindow> {
        let window = Arc::new({
            let window_size = LogicalSize::new(self.config.width, self.config.height);

            event_loop
                .create_window(
                    WindowAttributes::default()
                        .with_title(self.config.title.clone())
                        .with_inner_size(window_size),
                )
                .context("Creating window")?
        });

        let pixels = {
            let window_size = window.inner_size();

            let surface_texture =
                SurfaceTexture::new(window_size.width, window_size.height, window.clone());

            PixelsBuilder::new(window_size.width, window_size.height, surface_texture)
                .texture_format(TextureFormat::Rgba8UnormSrgb)
                .build()
                .context("Creating pixels buffer")?
        };

        window.request_redraw();

        Ok(ResumedWindow {
            window,
            pixels,
            title: self.config.title.clone(),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, failure: anyhow::Error) {
        error!("{failure:#}");
        self.failure = Some(failure);
        event_loop.exit();
    }
}

impl ApplicationHandler for RendererWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.resumed_window.is_some() {
            return;
        }

        match self.open(event_loop) {
            Ok(resumed_window) => self.resumed_window = Some(resumed_window),
            Err(failure) => self.fail(event_loop, failure),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(ResumedWindow {
            window,
            pixels,
            title,
        }) = self.resumed_window.as_mut()
        else {
            return;
        };

        let outcome = match event {
            WindowEvent::RedrawRequested => {
                let PhysicalSize { width, height } = window.inner_size();

                let next_frame = RenderFrame {
                    width,
                    height,
                    buffer: pixels.frame_mut(),
                };

                if let Some(new_title) = (self.config.draw_callback)(next_frame)
                    && new_title != *title
                {
                    window.set_title(&new_title);
                    *title = new_title;
                }

                let rendered = pixels.render().context("Rendering with pixels");

                // The redraw loop is throttled on the event loop thread, so
                // resizes wait for the current frame to finish pacing.
                self.sleeper.sleep();
                window.request_redraw();
                rendered
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                debug!(width, height, "window resized");
                let resized = pixels
                    .resize_surface(width, height)
                    .and_then(|()| pixels.resize_buffer(width, height))
                    .context("Resizing pixels buffer");
                window.request_redraw();
                resized
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(failure) = outcome {
            self.fail(event_loop, failure);
        }
    }
}
