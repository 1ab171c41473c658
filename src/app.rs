use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{Config, FALLBACK_WINDOW_SIZE};
use crate::controls::{Control, RateCounter, RunStats, RuntimeParameters};
use crate::error::GpuError;
use crate::gpu::GpuPresenter;
use crate::present::Present;
use crate::simulation::Simulation;

/// Application state
pub struct App {
    config: Config,
    window: Option<Arc<Window>>,
    presenter: Option<GpuPresenter>,
    sim: Option<Simulation>,
    params: RuntimeParameters,
    modifiers: ModifiersState,
    steps_done: u64,
    next_step: Instant,
    rate_counter: RateCounter,
    stats: RunStats,
    error: Option<GpuError>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let params = RuntimeParameters::new(&config.run);
        Self {
            config,
            window: None,
            presenter: None,
            sim: None,
            params,
            modifiers: ModifiersState::empty(),
            steps_done: 0,
            next_step: Instant::now(),
            rate_counter: RateCounter::new(),
            stats: RunStats::start(),
            error: None,
        }
    }

    /// Setup failure that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<GpuError> {
        self.error.take()
    }

    fn window_size(&self, event_loop: &ActiveEventLoop) -> PhysicalSize<u32> {
        let fraction = self.config.run.window_fraction;
        let (width, height) = match event_loop.primary_monitor() {
            Some(monitor) => {
                let size = monitor.size();
                (size.width, size.height)
            }
            None => FALLBACK_WINDOW_SIZE,
        };
        PhysicalSize::new(
            ((width as f64 * fraction) as u32).max(1),
            ((height as f64 * fraction) as u32).max(1),
        )
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), GpuError> {
        let size = self.window_size(event_loop);
        let window_attrs = Window::default_attributes()
            .with_title("Game of Life")
            .with_inner_size(size)
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let px = self.config.run.px_size;
        let rows = (size.height / px).max(1) as usize;
        let cols = (size.width / px).max(1) as usize;
        let sim = Simulation::new(&self.config.sim, rows, cols);

        let presenter = GpuPresenter::new(window.clone(), sim.grid())?;

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  PageUp/PageDown: Raise/lower max fps");
        log::info!("  Ctrl+PageUp/PageDown: Raise/lower skip");
        log::info!("  R: Reseed");
        log::info!("  Escape/F4: Quit");

        self.window = Some(window);
        self.presenter = Some(presenter);
        self.sim = Some(sim);
        self.stats = RunStats::start();
        self.next_step = Instant::now();
        Ok(())
    }

    fn render(&mut self) {
        if let (Some(presenter), Some(sim)) = (self.presenter.as_mut(), self.sim.as_ref()) {
            if let Err(e) = presenter.present(sim.grid()) {
                log::error!("Present failed: {}", e);
            }
        }
    }

    /// Run one tick: draw if due, then advance the simulation.
    fn tick(&mut self, started: Instant) {
        if self.params.should_render(self.steps_done) {
            self.render();
        }

        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        sim.step();
        self.steps_done += 1;

        if let Some(rate) = self.rate_counter.tick() {
            if let Some(window) = &self.window {
                window.set_title(&format!(
                    "Game of Life - {} - {:.0} steps/s - skip {}",
                    self.config.sim.rule, rate, self.params.skip
                ));
            }
        }

        self.next_step = self.params.next_step_at(started);
    }

    fn handle_control(&mut self, control: Control, event_loop: &ActiveEventLoop) {
        match control {
            Control::Quit => {
                log::info!("Quit requested, exiting...");
                event_loop.exit();
            }
            Control::Reseed => {
                if let Some(sim) = self.sim.as_mut() {
                    sim.reset();
                    log::info!("Reseeded");
                }
            }
            _ => self.params.adjust(control),
        }
    }
}

/// Map a key press to a control, if it is bound.
pub fn control_for_key(key: KeyCode, ctrl: bool) -> Option<Control> {
    match key {
        KeyCode::Escape | KeyCode::F4 => Some(Control::Quit),
        KeyCode::PageUp if ctrl => Some(Control::SkipUp),
        KeyCode::PageDown if ctrl => Some(Control::SkipDown),
        KeyCode::PageUp => Some(Control::FpsUp),
        KeyCode::PageDown => Some(Control::FpsDown),
        KeyCode::KeyR => Some(Control::Reseed),
        _ => None,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing Game of Life...");
        if let Err(e) = self.init(event_loop) {
            log::error!("Initialization failed: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        let ctrl = self.modifiers.control_key();
                        if let Some(control) = control_for_key(key_code, ctrl) {
                            self.handle_control(control, event_loop);
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.sim.is_none() {
            return;
        }

        if self.steps_done >= self.config.run.steps {
            log::info!("Reached {} steps, exiting...", self.steps_done);
            event_loop.exit();
            return;
        }

        let now = Instant::now();
        if now >= self.next_step {
            self.tick(now);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_step));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(sim) = &self.sim {
            self.stats.report(self.steps_done, sim.reseeds());
        }
    }
}
