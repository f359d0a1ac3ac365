use wa_pricing_sdk::models::Identity;

/// Maps a bearer credential to the identity it was issued for.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, token: &str) -> Option<Identity>;
}
