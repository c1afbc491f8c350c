/*
[INPUT]:  Login responses from the My Attire service
[OUTPUT]: Shared session state and role checks
[POS]:    Auth layer - client-side session handling
[UPDATE]: When the session lifecycle or stored fields change
*/

pub mod session;

pub use session::{SessionData, SessionManager, SESSION_TTL_SECONDS};
