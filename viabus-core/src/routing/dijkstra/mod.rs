mod state;
mod traced;

pub(crate) use state::State;
pub(crate) use traced::fastest_path;
