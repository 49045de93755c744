/// Value of the `membership` custom field on the remote subscriber record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    FreeTrial,
    Expired,
    Premium,
}

impl Membership {
    pub fn as_str(&self) -> &'static str {
        match self {
            Membership::FreeTrial => "freetrial",
            Membership::Expired => "expired",
            Membership::Premium => "premium",
        }
    }
}
