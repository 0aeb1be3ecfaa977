//! Typed access pipeline.
//!
//! Route wiring names exactly which stages guard a group of routes:
//!
//! ```ignore
//! let admin = AccessPipeline::new(state.clone())
//!     .authenticate()
//!     .resolve_role()
//!     .require_active()
//!     .require_role(Role::Admin)
//!     .wrap(admin_routes);
//! ```
//!
//! The marker type only exposes the next legal stage, so a role check without
//! authentication and role resolution before it does not compile.
use std::marker::PhantomData;

use axum::{Router, middleware};

use crate::repos::user_repo::Role;
use crate::state::AppState;

use super::{access, role};

/// No stage yet.
pub struct Open;
/// Credential verified, subject in context.
pub struct Authenticated;
/// Role and enabled flag in context.
pub struct RoleResolved;
/// Role gate attached; nothing may follow.
pub struct RoleGuarded;

mod sealed {
    pub trait Wrappable {}
    impl Wrappable for super::Authenticated {}
    impl Wrappable for super::RoleResolved {}
    impl Wrappable for super::RoleGuarded {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Authenticate,
    RequireSubject,
    ResolveRole,
    RequireActive,
    RequireRole(Role),
}

pub struct AccessPipeline<S> {
    state: AppState,
    stages: Vec<Stage>,
    _marker: PhantomData<S>,
}

impl<S> AccessPipeline<S> {
    fn push<N>(mut self, stage: Stage) -> AccessPipeline<N> {
        self.stages.push(stage);
        AccessPipeline {
            state: self.state,
            stages: self.stages,
            _marker: PhantomData,
        }
    }

    #[cfg(test)]
    pub(crate) fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

impl AccessPipeline<Open> {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            stages: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Verify the bearer credential, then require a subject.
    pub fn authenticate(self) -> AccessPipeline<Authenticated> {
        self.push::<Open>(Stage::Authenticate)
            .push(Stage::RequireSubject)
    }
}

impl AccessPipeline<Authenticated> {
    /// Load the caller's role from the account store (fresh per request).
    pub fn resolve_role(self) -> AccessPipeline<RoleResolved> {
        self.push(Stage::ResolveRole)
    }
}

impl AccessPipeline<RoleResolved> {
    /// Reject disabled accounts with 403.
    pub fn require_active(self) -> AccessPipeline<RoleResolved> {
        if self.stages.contains(&Stage::RequireActive) {
            return self;
        }
        self.push(Stage::RequireActive)
    }

    pub fn require_role(self, required: Role) -> AccessPipeline<RoleGuarded> {
        self.push(Stage::RequireRole(required))
    }
}

impl<S: sealed::Wrappable> AccessPipeline<S> {
    /// Attach the stages to every route in `router`, first stage outermost.
    ///
    /// `route_layer` keeps unmatched paths out of the pipeline so they still 404.
    pub fn wrap(self, router: Router<AppState>) -> Router<AppState> {
        let state = self.state;

        self.stages
            .into_iter()
            .rev()
            .fold(router, |router, stage| match stage {
                Stage::Authenticate => router.route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    access::authenticate,
                )),
                Stage::RequireSubject => {
                    router.route_layer(middleware::from_fn(access::require_subject))
                }
                Stage::ResolveRole => router.route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    role::resolve_role,
                )),
                Stage::RequireActive => {
                    router.route_layer(middleware::from_fn(role::require_active))
                }
                Stage::RequireRole(required) => router.route_layer(
                    middleware::from_fn_with_state(required, role::require_role),
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_state;

    #[tokio::test]
    async fn admin_pipeline_orders_stages() {
        let pipeline = AccessPipeline::new(test_state().state)
            .authenticate()
            .resolve_role()
            .require_active()
            .require_role(Role::Admin);

        assert_eq!(
            pipeline.stages(),
            &[
                Stage::Authenticate,
                Stage::RequireSubject,
                Stage::ResolveRole,
                Stage::RequireActive,
                Stage::RequireRole(Role::Admin),
            ]
        );
    }

    #[tokio::test]
    async fn active_check_is_attached_once() {
        let pipeline = AccessPipeline::new(test_state().state)
            .authenticate()
            .resolve_role()
            .require_active()
            .require_active();

        assert_eq!(
            pipeline
                .stages()
                .iter()
                .filter(|s| **s == Stage::RequireActive)
                .count(),
            1
        );
    }
}
