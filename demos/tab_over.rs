//! Example: Tabbing over an inert dialog
//!
//! Run with `RUST_LOG=fos_inert=debug` to see each interception.

use fos_dom::{Document, Key, NodeId};
use fos_inert::{InertConfig, InertElementExt, InertSession};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut doc = Document::new("https://example.com/");
    let config = InertConfig::from_json(r#"{"profile": "emulated"}"#).unwrap_or_default();
    let session = InertSession::install(&mut doc, config);

    let body = doc.body();
    let name = add(&mut doc, body, "input");
    let dialog = add(&mut doc, body, "div");
    add(&mut doc, dialog, "input");
    add(&mut doc, dialog, "button");
    let submit = add(&mut doc, body, "button");

    if let Err(err) = doc.set_inert(dialog, true) {
        eprintln!("could not mark dialog inert: {err}");
        return;
    }

    doc.focus(name);
    println!("focused: {:?}", doc.focused_element());
    doc.press_key(Key::Tab, false);
    println!("after Tab: {:?} (submit is {:?})", doc.focused_element(), submit);
    doc.press_key(Key::Tab, true);
    println!("after Shift+Tab: {:?} (name is {:?})", doc.focused_element(), name);
    println!("profile: {}, direction: {:?}", session.profile_name(), session.direction());

    session.uninstall(&mut doc);
}

fn add(doc: &mut Document, parent: NodeId, tag: &str) -> NodeId {
    let id = doc.create_element(tag);
    if let Err(err) = doc.append_child(parent, id) {
        eprintln!("append failed: {err}");
    }
    id
}
