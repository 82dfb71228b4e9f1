//! Resource moderation state machine
//!
//! Crowd-sourced resources are born WAITING and become publicly visible only
//! once APPROVED. Every rule here is a pure function over the principal and
//! the resource state; the CRUD handlers for languages, frameworks, and
//! reviews all gate through these.

use crate::auth::Principal;
use shared::models::ResourceState;
use shared::{AppError, Permission};

/// State a resource is created in.
///
/// Holders of the resource type's set-state permission publish directly;
/// everyone else enters the moderation queue.
pub fn initial_state(creator: &Principal, set_state: Permission) -> ResourceState {
    if creator.has_permission(set_state) {
        ResourceState::Approved
    } else {
        ResourceState::Waiting
    }
}

/// Gate for `PATCH /{id}/state`.
///
/// Any state-to-state transition is allowed to an authorized actor, including
/// APPROVED → DECLINED and back.
pub fn authorize_set_state(actor: &Principal, set_state: Permission) -> Result<(), AppError> {
    if actor.has_permission(set_state) {
        return Ok(());
    }
    Err(AppError::forbidden(format!(
        "setting resource state requires {set_state}"
    )))
}

/// Gate for fetching a single resource.
///
/// A non-APPROVED resource is visible only with the view-by-state permission.
/// The denial is explicit (403), not a 404: the resource's existence is not
/// hidden. Authorship grants no visibility override — even the author is
/// blocked without the permission.
pub fn authorize_view(
    viewer: Option<&Principal>,
    view_by_state: Permission,
    state: ResourceState,
) -> Result<(), AppError> {
    if state == ResourceState::Approved {
        return Ok(());
    }
    if viewer.is_some_and(|p| p.has_permission(view_by_state)) {
        return Ok(());
    }
    Err(AppError::forbidden(format!(
        "viewing a non-approved resource requires {view_by_state}"
    )))
}

/// Resolve the state filter a list query is allowed to run with.
///
/// Privileged viewers get what they asked for (no filter = all states).
/// Unprivileged viewers asking for nothing are transparently narrowed to
/// APPROVED; asking explicitly for a non-APPROVED state is denied, consistent
/// with single-resource fetches.
pub fn effective_state_filter(
    viewer: Option<&Principal>,
    view_by_state: Permission,
    requested: Option<ResourceState>,
) -> Result<Option<ResourceState>, AppError> {
    if viewer.is_some_and(|p| p.has_permission(view_by_state)) {
        return Ok(requested);
    }
    match requested {
        None | Some(ResourceState::Approved) => Ok(Some(ResourceState::Approved)),
        Some(_) => Err(AppError::forbidden(format!(
            "listing by state requires {view_by_state}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Permission::{LanguageSetState, LanguageViewByState};

    fn principal(perms: &[Permission]) -> Principal {
        Principal::new(1, 1, perms.iter().copied())
    }

    #[test]
    fn creation_state_follows_set_state_permission() {
        let moderator = principal(&[LanguageSetState]);
        let member = principal(&[]);
        assert_eq!(
            initial_state(&moderator, LanguageSetState),
            ResourceState::Approved
        );
        assert_eq!(
            initial_state(&member, LanguageSetState),
            ResourceState::Waiting
        );
    }

    #[test]
    fn set_state_requires_the_permission() {
        let moderator = principal(&[LanguageSetState]);
        let member = principal(&[]);
        assert!(authorize_set_state(&moderator, LanguageSetState).is_ok());
        let err = authorize_set_state(&member, LanguageSetState).unwrap_err();
        assert!(matches!(err, AppError::NotEnoughPermission { .. }));
    }

    #[test]
    fn approved_resources_are_visible_to_everyone() {
        assert!(authorize_view(None, LanguageViewByState, ResourceState::Approved).is_ok());
    }

    #[test]
    fn non_approved_requires_view_by_state_and_is_403_not_404() {
        let viewer = principal(&[LanguageViewByState]);
        let member = principal(&[]);

        for state in [ResourceState::Waiting, ResourceState::Declined] {
            assert!(authorize_view(Some(&viewer), LanguageViewByState, state).is_ok());

            let err = authorize_view(Some(&member), LanguageViewByState, state).unwrap_err();
            assert!(matches!(err, AppError::NotEnoughPermission { .. }), "{err:?}");

            let err = authorize_view(None, LanguageViewByState, state).unwrap_err();
            assert!(matches!(err, AppError::NotEnoughPermission { .. }), "{err:?}");
        }
    }

    #[test]
    fn list_filter_is_transparent_for_unprivileged_viewers() {
        // anonymous, no explicit filter: narrowed to APPROVED
        assert_eq!(
            effective_state_filter(None, LanguageViewByState, None).unwrap(),
            Some(ResourceState::Approved)
        );
        // privileged, no filter: all states
        let viewer = principal(&[LanguageViewByState]);
        assert_eq!(
            effective_state_filter(Some(&viewer), LanguageViewByState, None).unwrap(),
            None
        );
        // privileged, explicit filter honored
        assert_eq!(
            effective_state_filter(
                Some(&viewer),
                LanguageViewByState,
                Some(ResourceState::Declined)
            )
            .unwrap(),
            Some(ResourceState::Declined)
        );
        // unprivileged explicit WAITING filter: denied
        let member = principal(&[]);
        let err = effective_state_filter(
            Some(&member),
            LanguageViewByState,
            Some(ResourceState::Waiting),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NotEnoughPermission { .. }));
    }
}
