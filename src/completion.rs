use std::{
    cell::RefCell,
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll, Waker},
};

#[derive(Debug, Default)]
struct Shared {
    resolved: bool,
    waker: Option<Waker>,
}

/// Handed back by a reveal; resolves once that reveal settles.
///
/// A reveal superseded by another never settles, so its `Completion` stays
/// pending forever.
#[derive(Debug)]
#[must_use = "a Completion does nothing unless polled or checked"]
pub struct Completion {
    shared: Rc<RefCell<Shared>>,
}

/// Engine-side half. Resolving consumes it, dropping it abandons the reveal.
#[derive(Debug)]
pub(crate) struct Resolver {
    shared: Rc<RefCell<Shared>>,
}

pub(crate) fn pair() -> (Resolver, Completion) {
    let shared = Rc::new(RefCell::new(Shared::default()));

    (
        Resolver {
            shared: Rc::clone(&shared),
        },
        Completion { shared },
    )
}

impl Resolver {
    pub(crate) fn resolve(self) {
        let waker = {
            let mut shared = self.shared.borrow_mut();
            shared.resolved = true;
            shared.waker.take()
        };

        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl Completion {
    pub fn is_resolved(&self) -> bool {
        self.shared.borrow().resolved
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut shared = self.shared.borrow_mut();

        if shared.resolved {
            return Poll::Ready(());
        }

        shared.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}
