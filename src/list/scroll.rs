//! Viewport positioning for the conversation list.
//!
//! The coordinator owns the list viewport (first visible row and height in
//! rows) and at most one outstanding scroll job. A job settles in two
//! stages: the outer list scroll, then an optional inner scroll inside the
//! conversation content. Its completion fires only after both settle.
//!
//! A new job supersedes the outstanding one: the viewport re-targets (last
//! write wins) and the superseded job's completion fires right away, before
//! the new job can complete. Every accepted completion therefore runs once,
//! in call order.

use crate::list::{
    completion::Completion,
    entry::{ListEntry, MessageId},
    source::ConversationContent,
    tracing_macros::trace_hot_path,
};
use std::{cell::Cell, rc::Rc, time::Duration};

pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(200);
pub const DEFAULT_SCROLL_MARGIN: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollConfig {
    pub animation_duration: Duration,
    /// Rows of context kept around a revealed row when the list allows it
    pub scroll_margin: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            animation_duration: DEFAULT_ANIMATION_DURATION,
            scroll_margin: DEFAULT_SCROLL_MARGIN,
        }
    }
}

/// Visible window of the list, in rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

impl Viewport {
    pub fn contains(&self, index: usize) -> bool {
        index >= self.offset && index < self.offset + self.height
    }

    pub fn max_offset(&self, total: usize) -> usize {
        total.saturating_sub(self.height)
    }
}

/// Ease-out interpolation between two row offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    from: usize,
    to: usize,
    elapsed: Duration,
    duration: Duration,
}

impl Animation {
    pub fn new(from: usize, to: usize, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn target(&self) -> usize {
        self.to
    }

    /// Moves the animation forward and returns the offset for this frame.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.elapsed = (self.elapsed + elapsed).min(self.duration);
        self.current()
    }

    pub fn current(&self) -> usize {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        let from = self.from as f32;
        let to = self.to as f32;
        (from + (to - from) * eased).round() as usize
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug)]
enum JobStage {
    Outer,
    Inner(Rc<Cell<bool>>),
    Settled,
}

#[derive(Debug)]
pub(crate) struct ScrollJob {
    target: ListEntry,
    message: Option<MessageId>,
    animated: bool,
    stage: JobStage,
    completion: Completion,
}

impl ScrollJob {
    pub(crate) fn new(
        target: ListEntry,
        message: Option<MessageId>,
        animated: bool,
        completion: Completion,
    ) -> Self {
        Self {
            target,
            message,
            animated,
            stage: JobStage::Outer,
            completion,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScrollCoordinator {
    config: ScrollConfig,
    viewport: Viewport,
    animation: Option<Animation>,
    job: Option<ScrollJob>,
}

impl ScrollCoordinator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn has_pending_job(&self) -> bool {
        self.job.is_some()
    }

    /// Message target of the outstanding job, while its inner scroll has not started.
    pub fn pending_message(&self) -> Option<&MessageId> {
        match &self.job {
            Some(ScrollJob {
                message: Some(message),
                stage: JobStage::Outer,
                ..
            }) => Some(message),
            _ => None,
        }
    }

    /// Offset that makes row `index` visible with the least movement.
    pub fn reveal_offset(&self, index: usize, total: usize) -> usize {
        let Viewport { offset, height } = self.viewport;
        if height == 0 {
            return offset;
        }

        let margin = self.config.scroll_margin.min(height.saturating_sub(1) / 2);
        let target = if index < offset + margin {
            index.saturating_sub(margin)
        } else if index + margin >= offset + height {
            index + margin + 1 - height
        } else {
            offset
        };
        target.min(self.viewport.max_offset(total))
    }

    pub fn set_viewport_height(&mut self, height: usize, total: usize) {
        if self.viewport.height != height {
            tracing::debug!("List viewport height {} -> {}", self.viewport.height, height);
            self.viewport.height = height;
        }
        self.clamp(total);
    }

    /// Keeps the viewport and any running animation inside a list of `total` rows.
    pub fn clamp(&mut self, total: usize) {
        let max_offset = self.viewport.max_offset(total);
        self.viewport.offset = self.viewport.offset.min(max_offset);
        if let Some(animation) = self.animation.as_mut() {
            animation.to = animation.to.min(max_offset);
            animation.from = animation.from.min(max_offset);
        }
    }

    /// Starts `job` for the row at `index`, superseding any outstanding job.
    pub(crate) fn begin(
        &mut self,
        job: ScrollJob,
        index: usize,
        total: usize,
        content: Option<&dyn ConversationContent>,
    ) {
        self.supersede();

        let target = self.reveal_offset(index, total);
        if target == self.viewport.offset {
            self.animation = None;
        } else if job.animated && !self.config.animation_duration.is_zero() {
            tracing::debug!(
                "Animating list scroll {} -> {} for {}",
                self.viewport.offset,
                target,
                job.target
            );
            self.animation = Some(Animation::new(
                self.viewport.offset,
                target,
                self.config.animation_duration,
            ));
        } else {
            tracing::debug!(
                "Jumping list scroll {} -> {} for {}",
                self.viewport.offset,
                target,
                job.target
            );
            self.animation = None;
            self.viewport.offset = target;
        }

        self.job = Some(job);
        self.advance_job(content);
    }

    /// Completes `completion` without new scrolling.
    ///
    /// When a job for `target` is still running the completion waits for it
    /// and fires right after the job's own. Otherwise any outstanding job is
    /// flushed and the completion fires now.
    pub(crate) fn complete_with(&mut self, target: &ListEntry, completion: Completion) {
        if let Some(job) = self.job.as_mut().filter(|job| &job.target == target) {
            trace_hot_path!("Joining running scroll job for {}", target);
            job.completion = std::mem::take(&mut job.completion).then(completion);
            return;
        }
        self.supersede();
        completion.fire();
    }

    /// Advances the running animation by `elapsed`; returns whether the offset moved.
    pub fn tick(&mut self, elapsed: Duration, content: Option<&dyn ConversationContent>) -> bool {
        let before = self.viewport.offset;

        if let Some(animation) = self.animation.as_mut() {
            self.viewport.offset = animation.advance(elapsed);
            trace_hot_path!(
                "List scroll frame offset={} target={}",
                self.viewport.offset,
                animation.to
            );
            if animation.is_finished() {
                self.animation = None;
            }
        }

        self.advance_job(content);
        before != self.viewport.offset
    }

    /// Moves the viewport on behalf of the user, cancelling programmatic animation.
    pub fn user_scroll(
        &mut self,
        delta: isize,
        total: usize,
        content: Option<&dyn ConversationContent>,
    ) -> bool {
        let before = self.viewport.offset;
        if self.animation.take().is_some() {
            tracing::debug!("User scroll interrupted list animation");
        }

        let max_offset = self.viewport.max_offset(total) as isize;
        let moved = (before as isize)
            .saturating_add(delta)
            .clamp(0, max_offset.max(0));
        self.viewport.offset = moved as usize;

        self.advance_job(content);
        before != self.viewport.offset
    }

    /// Fires the outstanding job's completion early because a newer request replaced it.
    fn supersede(&mut self) {
        if let Some(previous) = self.job.take() {
            tracing::debug!("Scroll job for {} superseded", previous.target);
            previous.completion.fire();
        }
    }

    fn advance_job(&mut self, content: Option<&dyn ConversationContent>) {
        loop {
            let Some(job) = self.job.as_mut() else {
                return;
            };

            match &job.stage {
                JobStage::Outer => {
                    if self.animation.is_some() {
                        return;
                    }
                    job.stage = Self::start_inner_scroll(job, content);
                }
                JobStage::Inner(settled) => {
                    if !settled.get() {
                        return;
                    }
                    job.stage = JobStage::Settled;
                }
                JobStage::Settled => {
                    if let Some(job) = self.job.take() {
                        tracing::debug!("Scroll job for {} settled", job.target);
                        job.completion.fire();
                    }
                    return;
                }
            }
        }
    }

    fn start_inner_scroll(job: &mut ScrollJob, content: Option<&dyn ConversationContent>) -> JobStage {
        let (Some(conversation), Some(message)) = (job.target.conversation_id(), job.message.take())
        else {
            return JobStage::Settled;
        };
        let Some(content) = content else {
            tracing::debug!("No content view to scroll to message {}", message);
            return JobStage::Settled;
        };
        if content.message_position(conversation, &message).is_none() {
            tracing::debug!(
                "Message {} not found in conversation {}, skipping content scroll",
                message,
                conversation
            );
            return JobStage::Settled;
        }

        let settled = Rc::new(Cell::new(false));
        let flag = settled.clone();
        content.scroll_to_message(
            conversation,
            &message,
            job.animated,
            Completion::new(move || flag.set(true)),
        );
        JobStage::Inner(settled)
    }
}
