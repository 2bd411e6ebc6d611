//! Responsive observation of a host container's size.
//!
//! # Design
//!
//! [`HostContainer`] is the measurable box a diagram lives in. It stores the
//! current content size in shared single-threaded storage
//! (`Rc<RefCell<..>>`) together with weakly held resize callbacks. Calling
//! [`HostContainer::resize`] with a size that differs from the current one
//! notifies every live callback, in registration order.
//!
//! [`HostContainer::observe`] hands back a [`ResizeSubscription`] guard that
//! owns the only strong reference to the callback. Dropping the guard makes
//! the callback unreachable; dead entries are pruned on the next
//! notification or count.
//!
//! A [`MountedDiagram`] couples a per-instance [`LayoutEngine`] to a host:
//! it lays out for the host's current size when mounted and re-lays out on
//! every size change until it is unmounted or dropped.
//!
//! # Nested Resizes
//!
//! A callback may resize the host again (e.g. to enforce a minimum width).
//! The nested call notifies every observer with the newer size, and the
//! outer notification stops there, so no observer ends up holding a size
//! the host no longer has.

use std::{
    any::Any,
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use log::{debug, trace};

use stageflow_core::geometry::ContainerSize;

use crate::layout::{DiagramGeometry, LayoutEngine};

type CallbackRc = Rc<dyn Fn(ContainerSize)>;
type CallbackWeak = Weak<dyn Fn(ContainerSize)>;

struct HostInner {
    size: ContainerSize,
    observers: Vec<CallbackWeak>,
}

/// A resizable container that reports its content size to observers.
///
/// Cloning a `HostContainer` creates another handle to the same container.
#[derive(Clone)]
pub struct HostContainer {
    inner: Rc<RefCell<HostInner>>,
}

impl HostContainer {
    /// Creates a host with an initial content size.
    pub fn new(size: ContainerSize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HostInner {
                size,
                observers: Vec::new(),
            })),
        }
    }

    /// Current content size.
    pub fn size(&self) -> ContainerSize {
        self.inner.borrow().size
    }

    /// Records a new content size.
    ///
    /// Live observers are notified only when the size actually changed.
    /// Returns `true` if it did.
    pub fn resize(&self, size: ContainerSize) -> bool {
        let callbacks: Vec<CallbackRc> = {
            let mut inner = self.inner.borrow_mut();
            if inner.size == size {
                return false;
            }
            inner.size = size;
            inner.observers.retain(|weak| weak.strong_count() > 0);
            inner.observers.iter().filter_map(Weak::upgrade).collect()
        };

        trace!(
            width = size.width(),
            height = size.height(),
            observers = callbacks.len();
            "Host container resized"
        );

        for callback in &callbacks {
            // A nested resize already delivered a newer size to everyone
            if self.inner.borrow().size != size {
                break;
            }
            callback(size);
        }
        true
    }

    /// Registers a resize callback.
    ///
    /// The callback stays registered for as long as the returned guard is
    /// alive.
    pub fn observe(&self, callback: impl Fn(ContainerSize) + 'static) -> ResizeSubscription {
        let strong: CallbackRc = Rc::new(callback);
        self.inner
            .borrow_mut()
            .observers
            .push(Rc::downgrade(&strong));

        ResizeSubscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of callbacks whose subscription is still alive.
    pub fn active_observers(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        inner.observers.retain(|weak| weak.strong_count() > 0);
        inner.observers.len()
    }
}

impl Default for HostContainer {
    fn default() -> Self {
        Self::new(ContainerSize::default())
    }
}

impl fmt::Debug for HostContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("HostContainer")
            .field("size", &inner.size)
            .field("observer_count", &inner.observers.len())
            .finish()
    }
}

/// RAII guard for a resize callback.
///
/// Dropping the guard detaches the callback from its host.
pub struct ResizeSubscription {
    // Holds the only strong reference to the callback
    _guard: Box<dyn Any>,
}

impl fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeSubscription").finish_non_exhaustive()
    }
}

/// A diagram attached to a host container.
///
/// Holds the instance's own [`LayoutEngine`]; nothing is shared between
/// mounted diagrams.
#[derive(Debug)]
pub struct MountedDiagram {
    engine: Rc<RefCell<LayoutEngine>>,
    subscription: ResizeSubscription,
}

impl MountedDiagram {
    pub(crate) fn attach(host: &HostContainer, mut engine: LayoutEngine) -> Self {
        engine.update(host.size());

        let engine = Rc::new(RefCell::new(engine));
        let weak_engine = Rc::downgrade(&engine);
        let subscription = host.observe(move |size| {
            if let Some(engine) = weak_engine.upgrade() {
                engine.borrow_mut().update(size);
            }
        });

        debug!(
            width = host.size().width(),
            height = host.size().height();
            "Diagram mounted"
        );

        Self {
            engine,
            subscription,
        }
    }

    /// Snapshot of the geometry for the host's latest size.
    pub fn geometry(&self) -> DiagramGeometry {
        self.engine.borrow().geometry().clone()
    }

    /// Size the diagram is currently laid out for.
    pub fn size(&self) -> ContainerSize {
        self.engine.borrow().size()
    }

    /// Number of layout computations so far, including the initial one.
    pub fn recompute_count(&self) -> usize {
        self.engine.borrow().recompute_count()
    }

    /// Detaches the diagram from its host.
    ///
    /// Equivalent to dropping the value.
    pub fn unmount(self) {
        let Self {
            engine,
            subscription,
        } = self;
        drop(subscription);
        debug!(recompute_count = engine.borrow().recompute_count(); "Diagram unmounted");
    }
}
