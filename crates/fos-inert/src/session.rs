//! Inert session
//!
//! Owns the state shared by the listeners of one document: configuration,
//! Tab direction, the shadow-focus tracker and the host profile. Nothing
//! is global; two documents get two independent sessions.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fos_dom::{Document, DomResult, Event, EventType, ListenerId, ListenerOptions, NodeId};

use crate::{
    ClickInterceptor, DirectionTracker, FocusInterceptor, HostProfile, InertConfig, InertElementExt, ShadowFocusTracker,
    TabDirection, resolver, select_profile, style,
};

#[derive(Debug)]
pub struct InertSession {
    config: InertConfig,
    direction: DirectionTracker,
    shadow_focus: ShadowFocusTracker,
    profile: Box<dyn HostProfile>,
    registrations: RefCell<Vec<ListenerId>>,
    style_element: Cell<Option<NodeId>>,
}

impl InertSession {
    /// Register the capture listeners on `document` and start emulating
    pub fn install(document: &mut Document, config: InertConfig) -> Rc<Self> {
        let profile = select_profile(config.profile, document);
        tracing::info!("installing inert emulation ({} profile, marker {:?})", profile.name(), config.attribute);

        let session = Rc::new(Self {
            config,
            direction: DirectionTracker::new(),
            shadow_focus: ShadowFocusTracker::new(),
            profile,
            registrations: RefCell::new(Vec::new()),
            style_element: Cell::new(None),
        });

        let root = document.root();
        let capture = ListenerOptions::capture();
        let mut ids = Vec::with_capacity(4);
        for event_type in [EventType::KeyDown, EventType::PointerDown] {
            let tracked = Rc::clone(&session);
            let listener = move |_: &mut Document, event: &mut Event| tracked.direction.observe(event);
            ids.push(document.add_event_listener(root, event_type, capture, Rc::new(listener)));
        }
        let focus = FocusInterceptor::new(Rc::clone(&session), document);
        ids.push(document.add_event_listener(root, EventType::Focus, capture, Rc::new(focus)));
        let click = ClickInterceptor::new(&session.config.attribute);
        ids.push(document.add_event_listener(root, EventType::Click, capture, Rc::new(click)));
        session.registrations.replace(ids);

        if session.config.inject_style {
            match style::inject_text(document, &style::stylesheet_for(&session.config.attribute)) {
                Ok(element) => session.style_element.set(Some(element)),
                Err(err) => tracing::warn!("inert stylesheet not injected: {}", err),
            }
        }
        session
    }

    /// Remove every listener and the injected stylesheet
    pub fn uninstall(&self, document: &mut Document) {
        for id in self.registrations.take() {
            document.remove_event_listener(id);
        }
        self.shadow_focus.detach(document);
        if let Some(element) = self.style_element.take() {
            if let Some(parent) = document.tree().parent(element) {
                if let Err(err) = document.remove_child(parent, element) {
                    tracing::warn!("inert stylesheet not removed: {}", err);
                }
            }
        }
        self.direction.reset();
        tracing::info!("inert emulation uninstalled");
    }

    pub fn is_installed(&self) -> bool {
        !self.registrations.borrow().is_empty()
    }

    pub fn config(&self) -> &InertConfig {
        &self.config
    }

    /// Current Tab direction
    pub fn direction(&self) -> TabDirection {
        self.direction.current()
    }

    pub fn direction_tracker(&self) -> &DirectionTracker {
        &self.direction
    }

    pub fn shadow_focus(&self) -> &ShadowFocusTracker {
        &self.shadow_focus
    }

    /// Innermost shadow root holding focus
    pub fn tracked_shadow_root(&self) -> Option<NodeId> {
        self.shadow_focus.tracked_root()
    }

    pub fn tracked_shadow_roots(&self) -> Vec<NodeId> {
        self.shadow_focus.tracked_roots()
    }

    pub fn profile(&self) -> &dyn HostProfile {
        self.profile.as_ref()
    }

    pub fn profile_name(&self) -> &'static str {
        self.profile.name()
    }

    /// Injected `<style>` element, if any
    pub fn style_element(&self) -> Option<NodeId> {
        self.style_element.get()
    }

    /// Inertness under this session's marker
    pub fn is_inert(&self, document: &Document, node: NodeId) -> bool {
        resolver::is_inert(document, node, &self.config.attribute)
    }

    /// Mark or unmark `element` with this session's marker
    pub fn set_inert(&self, document: &mut Document, element: NodeId, inert: bool) -> DomResult<()> {
        document.set_inert_by(element, &self.config.attribute, inert)
    }
}
