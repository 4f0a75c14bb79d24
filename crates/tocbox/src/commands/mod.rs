//! CLI command implementations.

mod book;
pub(crate) mod click;
pub(crate) mod render;
pub(crate) mod reset;
pub(crate) mod resolve;
pub(crate) mod search;
pub(crate) mod theme;
pub(crate) mod visit;

pub(crate) use click::ClickArgs;
pub(crate) use render::RenderArgs;
pub(crate) use reset::ResetArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use search::SearchArgs;
pub(crate) use theme::ThemeArgs;
pub(crate) use visit::VisitArgs;
