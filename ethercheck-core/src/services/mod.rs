//! Service layer - business logic orchestration

mod session;

pub use session::{EventPumpHandle, SessionService, INSTALL_PROMPT};
