mod pawns;
mod render;
mod session;

pub(crate) use pawns::HuntOutcome;
pub(crate) use render::render_grid;
pub(crate) use session::HuntSession;
