use std::cell::RefCell;
use std::rc::Rc;

use crate::Dispose;

pub type SubId = usize;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Observable value. Subscribers run after every write, outside of any
/// internal borrow, so they may read or write the signal themselves.
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

struct Inner<T> {
    value: T,
    next_sub: SubId,
    subs: Vec<(SubId, Subscriber<T>)>,
}

impl<T: Clone> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            next_sub: 0,
            subs: Vec::new(),
        })))
    }
    pub fn get(&self) -> T {
        self.0.borrow().value.clone()
    }
    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }
    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_sub;
        inner.next_sub += 1;
        inner.subs.push((id, Rc::new(f)));
        id
    }
    pub fn unsubscribe(&self, id: SubId) -> bool {
        let mut inner = self.0.borrow_mut();
        let before = inner.subs.len();
        inner.subs.retain(|(sid, _)| *sid != id);
        inner.subs.len() != before
    }
    /// Subscribe and get a [`Dispose`] that removes the subscriber.
    pub fn watch(&self, f: impl Fn(&T) + 'static) -> Dispose {
        let id = self.subscribe(f);
        let this = self.clone();
        Dispose::new(move || {
            this.unsubscribe(id);
        })
    }
    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().subs.len()
    }

    fn notify(&self) {
        let (value, subs) = {
            let inner = self.0.borrow();
            let subs: Vec<Subscriber<T>> = inner.subs.iter().map(|(_, s)| s.clone()).collect();
            (inner.value.clone(), subs)
        };
        for s in subs {
            s(&value);
        }
    }
}

pub fn signal<T: Clone>(t: T) -> Signal<T> {
    Signal::new(t)
}
