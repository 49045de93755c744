use crate::domain::attribute_date::AttributeDate;
use crate::domain::membership::Membership;
use crate::domain::subscriber_attributes::SubscriberAttributes;

/// Account lifecycle transitions mirrored onto the subscriber list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Signup { trial_expired_date: AttributeDate },
    Signin,
    Expired,
    Paid { paid_expired_date: AttributeDate },
    Cancel,
}

impl LifecycleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::Signup { .. } => "signup",
            LifecycleEvent::Signin => "signin",
            LifecycleEvent::Expired => "expired",
            LifecycleEvent::Paid { .. } => "paid",
            LifecycleEvent::Cancel => "cancel",
        }
    }

    /// Signup is the only event that creates the remote record.
    pub fn creates_subscriber(&self) -> bool {
        matches!(self, LifecycleEvent::Signup { .. })
    }

    pub fn attributes(&self, today: AttributeDate) -> SubscriberAttributes {
        match *self {
            LifecycleEvent::Signup { trial_expired_date } => SubscriberAttributes {
                membership: Some(Membership::FreeTrial),
                trial_expired_date: Some(trial_expired_date),
                signup_date: Some(today),
                last_activity_date: Some(today),
                ..Default::default()
            },
            LifecycleEvent::Signin => SubscriberAttributes {
                last_activity_date: Some(today),
                ..Default::default()
            },
            LifecycleEvent::Expired => SubscriberAttributes {
                membership: Some(Membership::Expired),
                ..Default::default()
            },
            LifecycleEvent::Paid { paid_expired_date } => SubscriberAttributes {
                membership: Some(Membership::Premium),
                paid_expired_date: Some(paid_expired_date),
                upgrade_date: Some(today),
                ..Default::default()
            },
            LifecycleEvent::Cancel => SubscriberAttributes {
                cancellation_date: Some(today),
                ..Default::default()
            },
        }
    }
}
