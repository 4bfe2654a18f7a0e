//! Host profiles
//!
//! Some documents navigate on a script-dispatched Tab keydown, others
//! ignore it. The capability is checked once when a session is installed.

use std::fmt;

use fos_dom::{Document, Key};

use crate::{ProfilePreference, TabDirection};

/// Native redirect capability of a host
pub trait HostProfile: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Let the host move focus itself. Returns whether an attempt was
    /// made; the caller checks where focus ended up.
    fn native_redirect(&self, document: &mut Document, direction: TabDirection) -> bool;
}

/// Tab order is always rebuilt from the tree
#[derive(Debug, Default, Clone, Copy)]
pub struct EmulatedTraversal;

impl HostProfile for EmulatedTraversal {
    fn name(&self) -> &'static str {
        "emulated"
    }

    fn native_redirect(&self, _document: &mut Document, _direction: TabDirection) -> bool {
        false
    }
}

/// Dispatch a synthetic Tab keydown at the active element first
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticTabDispatch;

impl HostProfile for SyntheticTabDispatch {
    fn name(&self) -> &'static str {
        "synthetic-tab"
    }

    fn native_redirect(&self, document: &mut Document, direction: TabDirection) -> bool {
        let backward = match direction {
            TabDirection::None => return false,
            TabDirection::Forward => false,
            TabDirection::Backward => true,
        };
        tracing::trace!("dispatching synthetic Tab (shift: {})", backward);
        document.dispatch_synthetic_key(Key::Tab, backward);
        true
    }
}

/// Pick the profile for `document`
pub fn select_profile(preference: ProfilePreference, document: &Document) -> Box<dyn HostProfile> {
    match preference {
        ProfilePreference::Emulated => Box::new(EmulatedTraversal),
        ProfilePreference::SyntheticTab => Box::new(SyntheticTabDispatch),
        ProfilePreference::Auto if document.settings().synthetic_tab_navigation => Box::new(SyntheticTabDispatch),
        ProfilePreference::Auto => Box::new(EmulatedTraversal),
    }
}
