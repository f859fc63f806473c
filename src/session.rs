//! Per-user state carried between the steps of an iteration.

use goose::goose::GooseUser;

use crate::pet::PetId;

/// Stored as Goose session data, so every [`GooseUser`] has its own copy.
#[derive(Debug, Clone, Default)]
pub struct PetSession {
    /// The pet created by the most recent create step, if any has run yet.
    pub pet_id: Option<PetId>,
}

/// Replace the current pet identifier, creating the session if needed.
pub fn set_pet_id(user: &mut GooseUser, pet_id: PetId) {
    match user.get_session_data_mut::<PetSession>() {
        Some(session) => session.pet_id = Some(pet_id),
        None => user.set_session_data(PetSession {
            pet_id: Some(pet_id),
        }),
    }
}

/// The identifier the current iteration is operating on.
pub fn current_pet_id(user: &GooseUser) -> Option<PetId> {
    user.get_session_data::<PetSession>()
        .and_then(|session| session.pet_id)
}
