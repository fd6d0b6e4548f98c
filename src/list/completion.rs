use std::fmt;

/// One-shot callback fired when a scroll request has fully settled.
///
/// Firing consumes the value, so a completion can run at most once. The
/// controller fires every completion it accepts exactly once; completions of
/// rejected calls are dropped without running.
#[derive(Default)]
pub struct Completion {
    callback: Option<Box<dyn FnOnce()>>,
}

impl Completion {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// A completion with nothing to run.
    pub fn none() -> Self {
        Self { callback: None }
    }

    pub fn is_none(&self) -> bool {
        self.callback.is_none()
    }

    /// A completion that runs `self` and then `next`.
    pub fn then(self, next: Completion) -> Completion {
        match (self.is_none(), next.is_none()) {
            (true, _) => next,
            (_, true) => self,
            _ => Completion::new(move || {
                self.fire();
                next.fire();
            }),
        }
    }

    pub fn fire(mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("armed", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_then_runs_in_order() {
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let (first, second) = (order.clone(), order.clone());

        Completion::new(move || first.borrow_mut().push(1))
            .then(Completion::none())
            .then(Completion::new(move || second.borrow_mut().push(2)))
            .fire();

        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_fire_runs_callback_once() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let completion = Completion::new(move || counter.set(counter.get() + 1));

        completion.fire();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_drop_does_not_run_callback() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let completion = Completion::new(move || counter.set(counter.get() + 1));

        drop(completion);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_none_is_noop() {
        let completion = Completion::none();
        assert!(completion.is_none());
        completion.fire();
    }
}
