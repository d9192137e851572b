//! Terminal rendering for the runner.

mod layout;
mod runner_scene;

pub use runner_scene::render_runner_scene;
