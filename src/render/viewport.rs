use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::Rc,
};

use crate::foundation::core::LayoutSize;

/// The display a surface is shown in: a layout box plus a device pixel ratio.
///
/// Cloning shares the same underlying display. Resize notifications are delivered through
/// [`ResizeSubscription`]s; the render loop holds one while mounted.
#[derive(Clone, Debug)]
pub struct Viewport {
    inner: Rc<RefCell<ViewportInner>>,
}

#[derive(Debug)]
struct ViewportInner {
    layout: LayoutSize,
    pixel_ratio: f64,
    next_id: u64,
    listeners: BTreeMap<u64, Rc<Cell<bool>>>,
}

impl Viewport {
    pub fn new(layout: LayoutSize, pixel_ratio: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ViewportInner {
                layout,
                pixel_ratio,
                next_id: 0,
                listeners: BTreeMap::new(),
            })),
        }
    }

    pub fn layout(&self) -> LayoutSize {
        self.inner.borrow().layout
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.inner.borrow().pixel_ratio
    }

    /// Change the layout box and/or ratio and flag every live subscription.
    pub fn resize(&self, layout: LayoutSize, pixel_ratio: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.layout = layout;
        inner.pixel_ratio = pixel_ratio;
        for flag in inner.listeners.values() {
            flag.set(true);
        }
    }

    pub fn subscribe_resize(&self) -> ResizeSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let pending = Rc::new(Cell::new(false));
        inner.listeners.insert(id, Rc::clone(&pending));
        ResizeSubscription {
            id,
            viewport: self.clone(),
            pending,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn unsubscribe(&self, id: u64) {
        self.inner.borrow_mut().listeners.remove(&id);
    }
}

/// Registration for resize events. Dropping it detaches the listener.
#[derive(Debug)]
pub struct ResizeSubscription {
    id: u64,
    viewport: Viewport,
    pending: Rc<Cell<bool>>,
}

impl ResizeSubscription {
    /// True if the viewport was resized since the last call.
    pub fn take_pending(&self) -> bool {
        self.pending.replace(false)
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.viewport.unsubscribe(self.id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/viewport.rs"]
mod tests;
