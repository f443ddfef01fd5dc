use std::cell::RefCell;
use std::rc::Rc;

/// Typed callback list standing in for a GObject signal.
pub(crate) struct Notifier<T> {
    handlers: RefCell<Vec<Rc<dyn Fn(&T)>>>,
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Notifier<T> {
    pub(crate) fn connect<F: Fn(&T) + 'static>(&self, handler: F) {
        self.handlers.borrow_mut().push(Rc::new(handler));
    }

    pub(crate) fn emit(&self, value: &T) {
        // Snapshot so a handler may connect further handlers while running.
        let handlers = self.handlers.borrow().clone();
        for handler in handlers {
            handler(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn every_handler_sees_each_emission() {
        let notifier = Notifier::<u32>::default();
        let total = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let total = total.clone();
            notifier.connect(move |value| total.set(total.get() + value));
        }
        notifier.emit(&5);
        assert_eq!(total.get(), 10);
    }

    #[test]
    fn handler_can_connect_during_emit() {
        let notifier = Rc::new(Notifier::<()>::default());
        let inner = notifier.clone();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        notifier.connect(move |_| {
            let counter = counter.clone();
            inner.connect(move |_| counter.set(counter.get() + 1));
        });
        notifier.emit(&());
        notifier.emit(&());
        assert_eq!(hits.get(), 1);
    }
}
