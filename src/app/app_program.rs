//! Fullscreen program loop.
//!
//! Each pass drains finished background tasks, then events relayed by the
//! list controller, then terminal input. When nothing arrived the loop waits
//! for the next tick, advances running scroll animations and redraws if
//! anything changed.

use crate::app::{
    config::UserConfig,
    error::{RecoveryExt, Result},
    event_async_task_manager::{AsyncTaskManager, TaskId},
    event_msg::{Cmd, CmdOrBatch, Msg, Sub},
    event_sync_subscriptions::{crossterm_to_msg, subscriptions},
    fixture::load_source,
    sync_simulator,
    tea_model::{AppModalState, Model},
    tea_update::update,
    tea_view::view,
    terminal::{AppTerminal, TerminalGuard},
};
use convlist::list::{ChannelObserver, ListEvent};
use crossterm::event;
use eyre::WrapErr;
use ratatui::layout::Rect;
use std::{
    rc::Rc,
    time::{Duration, Instant},
};
use tokio::{sync::mpsc, time::interval};

pub struct Program {
    model: Model,
    terminal: AppTerminal,
    // Dropped after the terminal, restoring the screen
    _guard: TerminalGuard,
    task_manager: AsyncTaskManager,
    list_events: mpsc::UnboundedReceiver<ListEvent>,
    sync_task: Option<TaskId>,
    needs_render: bool,
}

impl Program {
    pub fn new(config: UserConfig) -> Result<Self> {
        let source = load_source(&config)?;
        let (observer, list_events) = ChannelObserver::new();
        let mut model = Model::new(config, source, Rc::new(observer));

        let (guard, terminal) = TerminalGuard::new()?;
        let size = terminal.size().wrap_err("Failed to read terminal size")?;
        model.resize(Rect::new(0, 0, size.width, size.height));

        Ok(Program {
            model,
            terminal,
            _guard: guard,
            task_manager: AsyncTaskManager::new(),
            list_events,
            sync_task: None,
            needs_render: true, // Initial render needed
        })
    }

    pub fn run(self) -> Result<()> {
        // Create a Tokio runtime for this blocking function
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.run_async())
    }

    async fn run_async(mut self) -> Result<()> {
        let mut tick_interval = interval(self.model.config.tick_interval());
        let mut last_tick = Instant::now();

        if subscriptions(&self.model).contains(&Sub::SyncSimulation) {
            self.spawn_command(Cmd::AsyncScheduleSync).await?;
        }

        loop {
            if matches!(self.model.state, AppModalState::Quit) {
                break;
            }

            let mut had_events = false;

            // Finished background tasks
            for msg in self.task_manager.poll_messages() {
                had_events = true;
                self.dispatch(msg).await?;
            }

            // Events the list controller relayed while handling earlier messages
            while let Ok(event) = self.list_events.try_recv() {
                had_events = true;
                self.dispatch(Msg::ListEvent(event)).await?;
            }

            if let Some(msg) = self.poll_input_events()? {
                had_events = true;
                self.dispatch(msg).await?;
            }

            if had_events {
                continue;
            }

            tick_interval.tick().await;
            self.task_manager.cleanup_completed_tasks();

            let elapsed = last_tick.elapsed();
            last_tick = Instant::now();
            if self.model.is_busy() {
                self.dispatch(Msg::Tick(elapsed)).await?;
            }

            let active = self.task_manager.active_task_count();
            if active != self.model.active_task_count {
                self.dispatch(Msg::RecordActiveTaskCount(active)).await?;
            }

            if self.needs_render {
                self.terminal
                    .draw(|f| view(&self.model, f))
                    .wrap_err("Failed to draw frame")?;
                self.needs_render = false;
            }
        }

        tracing::info!("Program loop finished");
        Ok(())
    }

    fn poll_input_events(&self) -> Result<Option<Msg>> {
        let subs = subscriptions(&self.model);
        if !subs.contains(&Sub::KeyboardInput) {
            return Ok(None);
        }

        if event::poll(Duration::ZERO)? {
            let event = event::read()?;
            return Ok(crossterm_to_msg(event, &self.model));
        }
        Ok(None)
    }

    async fn dispatch(&mut self, msg: Msg) -> Result<()> {
        let cmds = update(&mut self.model, msg);
        self.needs_render = true;

        if let Err(report) = self.spawn_commands(cmds).await {
            if report.is_fatal() {
                return Err(report);
            }
            tracing::warn!("Command failed, continuing: {}", report);
        }
        Ok(())
    }

    async fn spawn_commands(&mut self, cmds: CmdOrBatch<Cmd>) -> Result<()> {
        match cmds {
            CmdOrBatch::Single(cmd) => self.spawn_command(cmd).await?,
            CmdOrBatch::Batch(commands) => {
                for cmd in commands {
                    self.spawn_command(cmd).await?;
                }
            }
        }
        Ok(())
    }

    async fn spawn_command(&mut self, cmd: Cmd) -> Result<()> {
        match cmd {
            Cmd::AsyncScheduleSync => {
                if let Some(previous) = self.sync_task.take() {
                    self.task_manager.cancel_task(previous);
                }
                let sync_interval = self.model.config.sync_interval();
                let task_id = self
                    .task_manager
                    .spawn_task(sync_simulator::next_sync(sync_interval));
                self.sync_task = Some(task_id);
            }

            Cmd::AsyncCancelSync => {
                if let Some(task_id) = self.sync_task.take() {
                    self.task_manager.cancel_task(task_id);
                }
            }

            Cmd::TerminalAutoResize => {
                self.terminal.autoresize()?;
                self.needs_render = true;
            }

            Cmd::None => {}
        }
        Ok(())
    }
}
