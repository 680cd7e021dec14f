//! # State Module
//!
//! State the commands share, split by concern so each command takes only
//! what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  SessionState    │  │  DisplayState    │  │  PageState (pages/)  │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  AuthContext     │  │  currency symbol │  │  Catalog             │  │
//! │  │  over the        │  │  column width    │  │  EditSession         │  │
//! │  │  session file    │  │                  │  │  search term         │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  All three are owned by the single command task; nothing is shared     │
//! │  across threads.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::DisplayState;
pub use session::{open_session, AppSessionStore, SessionState};
