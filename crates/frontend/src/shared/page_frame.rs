//! PageFrame: standard root wrapper for every routed page.
//!
//! Usage:
//! ```rust
//! # use leptos::prelude::*;
//! use frontend::shared::page_frame::PageFrame;
//! use frontend::shared::page_standard::PAGE_CAT_LIST;
//!
//! #[component]
//! pub fn ClientList() -> impl IntoView {
//!     view! {
//!         <PageFrame page_id="a002_client--list" category=PAGE_CAT_LIST>
//!             <div class="page__header">...</div>
//!             <div class="page__content">...</div>
//!         </PageFrame>
//!     }
//! }
//! ```

use super::page_standard::*;
use leptos::prelude::*;

/// Root wrapper that sets standard metadata on every page.
#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`.
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_SYSTEM => "page page--system",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}

/// Standard page header: title on the left, actions on the right.
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: MaybeProp<String>,
    /// Action buttons rendered on the right.
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-text">
                <h1 class="page__title">{title}</h1>
                {move || subtitle.get().map(|s| view! { <p class="page__subtitle">{s}</p> })}
            </div>
            <div class="page__actions">
                {children.map(|c| c())}
            </div>
        </div>
    }
}
