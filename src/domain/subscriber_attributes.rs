use crate::domain::attribute_date::AttributeDate;
use crate::domain::membership::Membership;
use crate::domain::new_subscriber::CustomField;

/// Custom fields tracked for every subscriber. Only the fields that are set
/// are sent, so an update never clears what the remote record already holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriberAttributes {
    pub membership: Option<Membership>,
    pub trial_expired_date: Option<AttributeDate>,
    pub signup_date: Option<AttributeDate>,
    pub last_activity_date: Option<AttributeDate>,
    pub paid_expired_date: Option<AttributeDate>,
    pub upgrade_date: Option<AttributeDate>,
    pub cancellation_date: Option<AttributeDate>,
}

impl SubscriberAttributes {
    pub fn custom_fields(&self) -> Vec<CustomField> {
        let dates = [
            ("trialexpireddate", self.trial_expired_date),
            ("signupdate", self.signup_date),
            ("lastactivitydate", self.last_activity_date),
            ("paidexpireddate", self.paid_expired_date),
            ("upgradedate", self.upgrade_date),
            ("cancellationdate", self.cancellation_date),
        ];

        self.membership
            .iter()
            .map(|membership| CustomField::new("membership", membership.as_str()))
            .chain(dates.into_iter().filter_map(|(key, date)| {
                date.map(|date| CustomField::new(key, date.to_string()))
            }))
            .collect()
    }
}
