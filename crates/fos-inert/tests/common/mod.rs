//! Shared fixtures for fos-inert integration tests

#![allow(dead_code)]

use std::rc::Rc;

use fos_dom::{Document, NodeId};
use fos_inert::{InertConfig, InertSession};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness (`RUST_LOG=fos_inert=trace`)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Document with an installed session, no stylesheet
pub fn session() -> (Document, Rc<InertSession>) {
    init_tracing();
    let mut doc = Document::default();
    let session = InertSession::install(&mut doc, InertConfig::default().without_style());
    (doc, session)
}

pub fn append(doc: &mut Document, parent: NodeId, tag: &str) -> NodeId {
    let id = doc.create_element(tag);
    doc.append_child(parent, id).expect("append");
    id
}

pub fn append_with_tab_index(doc: &mut Document, parent: NodeId, tag: &str, tab_index: i32) -> NodeId {
    let id = append(doc, parent, tag);
    doc.set_attribute(id, "tabindex", &tab_index.to_string()).expect("tabindex");
    id
}

/// `<input>` x3 under `<body>`: before, during, after
pub fn before_during_after(doc: &mut Document) -> [NodeId; 3] {
    let body = doc.body();
    [(); 3].map(|_| append(doc, body, "input"))
}
