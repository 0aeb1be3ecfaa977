pub mod access_jwt;
pub mod factory;
pub mod introspection;
pub mod provider;
pub mod resolver;
pub mod verifier;

pub use access_jwt::JwtIdentityProvider;
pub use factory::build_credential_verifier;
pub use introspection::IntrospectionProvider;
pub use provider::{IdentityProvider, SubjectId};
pub use resolver::{ResolveError, ResolvedRole, RoleResolver};
pub use verifier::{CredentialError, CredentialVerifier};
