//! Two small terminal arcade games, Ball Bounce and Donut Chase, sharing
//! the terminal plumbing they both need: an event pump, held-key tracking,
//! a scaled drawing surface and the frame loop.

pub mod app;
pub mod config;
pub mod event;
pub mod games;
pub mod geom;
pub mod input;
pub mod surface;
