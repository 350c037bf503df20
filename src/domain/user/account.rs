//! User aggregate.

use secrecy::SecretString;

use crate::domain::auth::{LinkedInIdentity, ProviderGrant};
use crate::domain::foundation::{Timestamp, UserId};

use super::SubscriptionStatus;

/// A Postcadence account, created on first LinkedIn login.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub linkedin_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub linkedin_access_token: Option<SecretString>,
    pub linkedin_token_expires_at: Option<Timestamp>,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub subscription_status: SubscriptionStatus,
    pub subscription_period_end: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Creates a new account from a LinkedIn login.
    pub fn from_linkedin(identity: &LinkedInIdentity) -> Self {
        let now = Timestamp::now();
        let mut user = Self {
            id: UserId::new(),
            linkedin_id: identity.profile.subject.clone(),
            email: None,
            name: None,
            image: None,
            linkedin_access_token: None,
            linkedin_token_expires_at: None,
            stripe_customer_id: None,
            stripe_subscription_id: None,
            subscription_status: SubscriptionStatus::None,
            subscription_period_end: None,
            created_at: now,
            updated_at: now,
        };
        user.refresh_from_linkedin(identity);
        user
    }

    /// Refreshes profile fields and the stored grant after a repeat login.
    ///
    /// Profile fields LinkedIn omitted keep their previous value.
    pub fn refresh_from_linkedin(&mut self, identity: &LinkedInIdentity) {
        let profile = &identity.profile;
        if profile.email.is_some() {
            self.email = profile.email.clone();
        }
        if profile.name.is_some() {
            self.name = profile.name.clone();
        }
        if profile.picture.is_some() {
            self.image = profile.picture.clone();
        }
        self.store_grant(&identity.grant);
        self.updated_at = Timestamp::now();
    }

    fn store_grant(&mut self, grant: &ProviderGrant) {
        self.linkedin_access_token = Some(grant.access_token.clone());
        self.linkedin_token_expires_at = grant.expires_at;
    }

    /// Links the billing customer created by checkout and activates the plan.
    pub fn attach_checkout(&mut self, customer_id: Option<String>, subscription_id: Option<String>) {
        if customer_id.is_some() {
            self.stripe_customer_id = customer_id;
        }
        if subscription_id.is_some() {
            self.stripe_subscription_id = subscription_id;
        }
        self.subscription_status = SubscriptionStatus::Active;
        self.updated_at = Timestamp::now();
    }

    /// Applies a subscription state reported by the billing provider.
    pub fn apply_subscription(
        &mut self,
        subscription_id: &str,
        status: SubscriptionStatus,
        period_end: Option<Timestamp>,
    ) {
        self.stripe_subscription_id = Some(subscription_id.to_string());
        self.subscription_status = status;
        if period_end.is_some() {
            self.subscription_period_end = period_end;
        }
        self.updated_at = Timestamp::now();
    }

    pub fn set_subscription_status(&mut self, status: SubscriptionStatus) {
        self.subscription_status = status;
        self.updated_at = Timestamp::now();
    }

    pub fn has_access(&self) -> bool {
        self.subscription_status.has_access()
    }
}
