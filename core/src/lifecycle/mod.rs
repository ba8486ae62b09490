//! Widget lifecycle
//!
//! Every DOM-facing utility implements [`Widget`]. A [`Lifecycle`] runs the
//! contract against a [`MountHost`]:
//!
//! ```text
//!   mount point missing ──► Inert (logged, never fatal)
//!         │
//!         ▼
//!      render ──err──► Inert
//!         │
//!   attach_listeners ──err──► Inert
//!         │
//!         ▼
//!       Ready ──destroy──► Destroyed ──reinit──► (runs the contract again)
//! ```

mod error;
pub mod mount;

pub use error::WidgetError;
pub use mount::MountPoint;

/// DOM lookup abstraction. The frontend implements it on top of `web-sys`.
pub trait MountHost {
    fn has_mount(&self, point: MountPoint) -> bool;

    /// Remove whatever the widget rendered into `point`.
    fn clear(&mut self, point: MountPoint);
}

/// Capability interface for DOM-mounted widgets.
pub trait Widget {
    fn name(&self) -> &'static str;

    /// Element the widget renders into. `None` for page-global utilities.
    fn mount_point(&self) -> Option<MountPoint> {
        None
    }

    fn render(&mut self, host: &mut dyn MountHost) -> Result<(), WidgetError>;

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        Ok(())
    }

    /// Release listeners and observers.
    fn destroy(&mut self, _host: &mut dyn MountHost) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    Pending,
    Ready,
    Inert { reason: String },
    Destroyed,
}

#[derive(Debug, Clone)]
pub struct Lifecycle {
    name: &'static str,
    state: LifecycleState,
}

impl Lifecycle {
    /// Run render → attach listeners → ready for `widget`.
    pub fn mount<W: Widget + ?Sized>(widget: &mut W, host: &mut dyn MountHost) -> Self {
        let mut lifecycle = Self {
            name: widget.name(),
            state: LifecycleState::Pending,
        };
        lifecycle.run(widget, host);
        lifecycle
    }

    fn run<W: Widget + ?Sized>(&mut self, widget: &mut W, host: &mut dyn MountHost) {
        if let Some(point) = widget.mount_point()
            && !host.has_mount(point)
        {
            let err = WidgetError::MissingMount { id: point.id() };
            tracing::error!(widget = self.name, error = %err, "widget left inert");
            self.state = LifecycleState::Inert {
                reason: err.to_string(),
            };
            return;
        }

        let result = widget
            .render(host)
            .and_then(|_| widget.attach_listeners(host));

        match result {
            Ok(()) => {
                tracing::debug!(widget = self.name, "initialized");
                self.state = LifecycleState::Ready;
            }
            Err(err) => {
                tracing::error!(widget = self.name, error = %err, "error initializing widget");
                self.state = LifecycleState::Inert {
                    reason: err.to_string(),
                };
            }
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == LifecycleState::Ready
    }

    /// Clear mounted markup and reset the initialized flag.
    pub fn destroy<W: Widget + ?Sized>(&mut self, widget: &mut W, host: &mut dyn MountHost) {
        if self.is_initialized() {
            widget.destroy(host);
        }
        if let Some(point) = widget.mount_point() {
            host.clear(point);
        }
        self.state = LifecycleState::Destroyed;
        tracing::debug!(widget = self.name, "destroyed");
    }

    /// Re-run the contract, destroying first when initialized.
    pub fn reinit<W: Widget + ?Sized>(&mut self, widget: &mut W, host: &mut dyn MountHost) {
        if self.is_initialized() {
            self.destroy(widget, host);
        }
        self.state = LifecycleState::Pending;
        self.run(widget, host);
    }
}

/// Widgets mounted in a fixed order and torn down in reverse.
#[derive(Default)]
pub struct WidgetSet {
    entries: Vec<(Box<dyn Widget>, Lifecycle)>,
}

impl WidgetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, mut widget: Box<dyn Widget>, host: &mut dyn MountHost) {
        let lifecycle = Lifecycle::mount(widget.as_mut(), host);
        self.entries.push((widget, lifecycle));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn states(&self) -> impl Iterator<Item = (&'static str, &LifecycleState)> {
        self.entries.iter().map(|(_, l)| (l.name(), l.state()))
    }

    pub fn ready_count(&self) -> usize {
        self.entries.iter().filter(|(_, l)| l.is_initialized()).count()
    }

    /// Destroy in reverse mount order. Widgets stay in the set so the page
    /// can bring them back with [`reinit_all`](Self::reinit_all).
    pub fn destroy_all(&mut self, host: &mut dyn MountHost) {
        for (widget, lifecycle) in self.entries.iter_mut().rev() {
            if lifecycle.state() != &LifecycleState::Destroyed {
                lifecycle.destroy(widget.as_mut(), host);
            }
        }
    }

    /// Run the contract again for every widget, in mount order.
    pub fn reinit_all(&mut self, host: &mut dyn MountHost) {
        for (widget, lifecycle) in &mut self.entries {
            lifecycle.reinit(widget.as_mut(), host);
        }
    }
}

/// Ids from [`MountPoint::required`] that the host cannot find.
pub fn missing_mounts(host: &dyn MountHost) -> Vec<&'static str> {
    MountPoint::required()
        .into_iter()
        .filter(|p| !host.has_mount(*p))
        .map(|p| p.id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeHost {
        present: HashSet<&'static str>,
        cleared: Vec<&'static str>,
    }

    impl FakeHost {
        fn with(ids: &[&'static str]) -> Self {
            Self {
                present: ids.iter().copied().collect(),
                cleared: Vec::new(),
            }
        }
    }

    impl MountHost for FakeHost {
        fn has_mount(&self, point: MountPoint) -> bool {
            self.present.contains(point.id())
        }

        fn clear(&mut self, point: MountPoint) {
            self.cleared.push(point.id());
        }
    }

    struct RecordingWidget {
        name: &'static str,
        point: Option<MountPoint>,
        fail_render: bool,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl RecordingWidget {
        fn new(name: &'static str, point: Option<MountPoint>, log: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                name,
                point,
                fail_render: false,
                log: Rc::clone(log),
            }
        }
    }

    impl Widget for RecordingWidget {
        fn name(&self) -> &'static str {
            self.name
        }

        fn mount_point(&self) -> Option<MountPoint> {
            self.point
        }

        fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
            self.log.borrow_mut().push(format!("{}:render", self.name));
            if self.fail_render {
                return Err(WidgetError::Js("boom".into()));
            }
            Ok(())
        }

        fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
            self.log.borrow_mut().push(format!("{}:attach", self.name));
            Ok(())
        }

        fn destroy(&mut self, _host: &mut dyn MountHost) {
            self.log.borrow_mut().push(format!("{}:destroy", self.name));
        }
    }

    #[test]
    fn render_then_attach_then_ready() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut host = FakeHost::with(&["header"]);
        let mut widget = RecordingWidget::new("header", Some(MountPoint::Header), &log);

        let lifecycle = Lifecycle::mount(&mut widget, &mut host);

        assert!(lifecycle.is_initialized());
        assert_eq!(*log.borrow(), vec!["header:render", "header:attach"]);
    }

    #[test]
    fn missing_mount_leaves_widget_inert_without_rendering() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut host = FakeHost::default();
        let mut widget = RecordingWidget::new("projects", Some(MountPoint::ProjectsGrid), &log);

        let lifecycle = Lifecycle::mount(&mut widget, &mut host);

        assert!(matches!(lifecycle.state(), LifecycleState::Inert { .. }));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn render_error_leaves_widget_inert_and_skips_listeners() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut host = FakeHost::default();
        let mut widget = RecordingWidget::new("monitor", None, &log);
        widget.fail_render = true;

        let lifecycle = Lifecycle::mount(&mut widget, &mut host);

        assert!(!lifecycle.is_initialized());
        assert_eq!(*log.borrow(), vec!["monitor:render"]);
    }

    #[test]
    fn destroy_clears_mount_and_resets_flag() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut host = FakeHost::with(&["main"]);
        let mut widget = RecordingWidget::new("about", Some(MountPoint::Main), &log);

        let mut lifecycle = Lifecycle::mount(&mut widget, &mut host);
        lifecycle.destroy(&mut widget, &mut host);

        assert_eq!(lifecycle.state(), &LifecycleState::Destroyed);
        assert_eq!(host.cleared, vec!["main"]);
        assert!(log.borrow().contains(&"about:destroy".to_string()));
    }

    #[test]
    fn reinit_destroys_then_mounts_again() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut host = FakeHost::default();
        let mut widget = RecordingWidget::new("theme", None, &log);

        let mut lifecycle = Lifecycle::mount(&mut widget, &mut host);
        lifecycle.reinit(&mut widget, &mut host);

        assert!(lifecycle.is_initialized());
        assert_eq!(
            *log.borrow(),
            vec![
                "theme:render",
                "theme:attach",
                "theme:destroy",
                "theme:render",
                "theme:attach"
            ]
        );
    }

    #[test]
    fn widget_set_tears_down_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut host = FakeHost::default();
        let mut set = WidgetSet::new();
        set.mount(Box::new(RecordingWidget::new("first", None, &log)), &mut host);
        set.mount(Box::new(RecordingWidget::new("second", None, &log)), &mut host);
        assert_eq!(set.ready_count(), 2);

        log.borrow_mut().clear();
        set.destroy_all(&mut host);

        assert_eq!(set.ready_count(), 0);
        assert_eq!(*log.borrow(), vec!["second:destroy", "first:destroy"]);

        // a second teardown finds nothing left to destroy
        set.destroy_all(&mut host);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn widget_set_reinit_brings_destroyed_widgets_back() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut host = FakeHost::with(&["header"]);
        let mut set = WidgetSet::new();
        set.mount(Box::new(RecordingWidget::new("spy", Some(MountPoint::Header), &log)), &mut host);
        set.mount(Box::new(RecordingWidget::new("vitals", None, &log)), &mut host);
        set.destroy_all(&mut host);
        assert_eq!(host.cleared, vec!["header"]);

        log.borrow_mut().clear();
        set.reinit_all(&mut host);

        assert_eq!(set.ready_count(), 2);
        assert_eq!(
            *log.borrow(),
            vec!["spy:render", "spy:attach", "vitals:render", "vitals:attach"]
        );
    }

    #[test]
    fn missing_mounts_lists_absent_required_ids() {
        let host = FakeHost::with(&["header", "main"]);
        let missing = missing_mounts(&host);
        assert!(!missing.contains(&"header"));
        assert!(missing.contains(&"projects-grid"));
        assert!(missing.contains(&"contact"));
    }
}
