#[macro_use]
extern crate approx;

mod ball_mesh_toc;
mod common;
mod conservative_advancement_invariants;
mod contact_truncation;
mod cost_sources;
mod still_objects_toc;
