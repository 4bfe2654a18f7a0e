//! Inert stylesheet
//!
//! Pointer suppression is left to the renderer: inert subtrees get
//! `pointer-events: none`, no text selection, and an overlay pseudo
//! element that swallows hits on the box.

use fos_dom::{Document, DomResult, NodeId};

pub const INERT_STYLESHEET: &str = "/*[inert]*/[inert]{position:relative!important;\
-webkit-user-select:none;-moz-user-select:none;-ms-user-select:none;user-select:none;\
pointer-events:none}\
[inert]::before{content:'';display:block;position:absolute;top:0;left:0;right:0;bottom:0}";

/// Stylesheet text for a custom marker attribute
pub fn stylesheet_for(marker: &str) -> String {
    INERT_STYLESHEET.replace("[inert]", &format!("[{marker}]"))
}

/// Append a `<style type="text/css">` holding the stylesheet to `<body>`
pub fn inject(document: &mut Document) -> DomResult<NodeId> {
    inject_text(document, INERT_STYLESHEET)
}

/// Like [`inject`], with an arbitrary stylesheet
pub fn inject_text(document: &mut Document, css: &str) -> DomResult<NodeId> {
    let style = document.create_element("style");
    document.set_attribute(style, "type", "text/css")?;
    let text = document.create_text(css);
    document.append_child(style, text)?;
    let body = document.body();
    document.append_child(body, style)?;
    tracing::trace!("inert stylesheet injected as {:?}", style);
    Ok(style)
}
