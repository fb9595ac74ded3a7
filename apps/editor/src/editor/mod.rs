// Resume editor session: form schema, skills, preview, views and the
// HTTP handlers that drive them.

pub mod demo;
pub mod fields;
pub mod handlers;
pub mod preview;
pub mod registry;
pub mod session;
pub mod skills;
pub mod view;

pub use registry::SessionRegistry;
pub use session::EditorSession;
