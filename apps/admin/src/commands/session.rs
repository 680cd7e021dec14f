//! `sign-in`, `sign-out`, `whoami`.
//!
//! Signing in only unlocks the edit and delete controls; nothing is checked.

use folio_data::{AuthContext, SessionStore};

use crate::error::AppResult;

pub fn sign_in<S: SessionStore>(auth: &mut AuthContext<S>, name: &str) -> AppResult<String> {
    let user = auth.sign_in(name)?;
    Ok(format!("Signed in as {}", user.name))
}

pub fn sign_out<S: SessionStore>(auth: &mut AuthContext<S>) -> AppResult<String> {
    let was = auth.user().map(|user| user.name.clone());
    auth.sign_out()?;
    Ok(match was {
        Some(name) => format!("Signed out {}", name),
        None => "Not signed in".to_string(),
    })
}

pub fn whoami<S: SessionStore>(auth: &AuthContext<S>) -> String {
    match auth.user() {
        Some(user) => match user.signed_in_at {
            Some(at) => format!("{} (signed in {})", user.name, at.format("%Y-%m-%d %H:%M UTC")),
            None => user.name.clone(),
        },
        None => "Not signed in".to_string(),
    }
}
