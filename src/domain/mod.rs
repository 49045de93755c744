pub mod attribute_date;
pub mod clock;
pub mod lifecycle_event;
pub mod membership;
pub mod new_subscriber;
pub mod subscriber_attributes;
pub mod subscriber_email;
