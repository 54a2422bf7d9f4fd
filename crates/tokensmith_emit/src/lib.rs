//! tokensmith emitters
//!
//! Turns resolved tokens into per-category source files for three targets:
//!
//! | Platform | Files | Example entry |
//! |----------|-------|---------------|
//! | `kotlin` | `Color.kt`, `Spacing.kt`, ... | `val spacing8 = 8.dp` |
//! | `xml`    | `colors.xml`, `dimens.xml`, ... | `<dimen name="spacing_8">8dp</dimen>` |
//! | `css`    | `colors.css`, ..., `tokens.css` | `--spacing-8: 8px;` |
//!
//! All three share one driver ([`render_all`]); they differ only in the
//! [`Emitter`] hooks. Output is sorted by token path, so unchanged input
//! always produces byte-identical files.

pub mod category;
pub mod css;
pub mod emitter;
pub mod kotlin;
pub mod naming;
pub mod provider;
pub mod rules;
pub mod shape;
pub mod xml;

pub use category::{Category, CategoryMap};
pub use css::CssEmitter;
pub use emitter::{render_all, render_document, Document, EmitContext, Emitter, Entry, Output};
pub use kotlin::KotlinEmitter;
pub use provider::{render_provider, PROVIDER_FILE};
pub use rules::{composite_policy, is_denied, CompositePolicy, Platform};
pub use shape::{shape_of, GenericFamily, Rgba, Shape, Unit};
pub use xml::XmlEmitter;

/// The emitter for `platform`
pub fn emitter_for(platform: Platform) -> Box<dyn Emitter> {
    match platform {
        Platform::Kotlin => Box::new(KotlinEmitter),
        Platform::Xml => Box::new(XmlEmitter),
        Platform::Css => Box::new(CssEmitter),
    }
}
