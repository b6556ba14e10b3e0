//! Model and client logic shared by the dashboard backend and frontend.
//!
//! Nothing in here touches the network or the DOM directly: the frontend plugs
//! a browser transport into [`upload::UploadClient`] and renders
//! [`modal::UploadModalState`], the backend validates uploads against
//! [`model::template`].

pub mod modal;
pub mod model;
pub mod requests;
pub mod session;
pub mod upload;
