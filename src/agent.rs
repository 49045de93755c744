use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;
use std::time;

use crate::config::AgentSettings;
use crate::domain::attribute_date::AttributeDate;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::lifecycle_event::LifecycleEvent;
use crate::domain::new_subscriber::NewSubscriber;
use crate::domain::subscriber_attributes::SubscriberAttributes;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::error::AgentError;
use crate::list_client::{parse_base_url, ListClient, DEFAULT_BASE_URL};

/// Authenticated session against one client account of the subscriber-list API.
///
/// Lifecycle calls only need `&self`, so an `Arc<Agent>` can be shared between
/// tasks and several calls may be in flight at once. The list id and dry-run
/// flag can only be changed through `&mut self`.
pub struct Agent {
    client_id: String,
    list_id: Option<String>,
    dry_run: bool,
    list_client: ListClient,
    clock: Arc<dyn Clock>,
}

impl Agent {
    pub async fn new(
        client_id: impl Into<String>,
        api_token: Secret<String>,
    ) -> Result<Agent, AgentError> {
        Self::connect(String::from(DEFAULT_BASE_URL), client_id, api_token, None).await
    }

    /// Validates the credentials and discovers the default list. When the
    /// client owns exactly one list it becomes the current list id.
    #[tracing::instrument(
        name = "Connecting the subscriber list agent",
        skip(client_id, api_token, timeout)
    )]
    pub async fn connect(
        base_url: String,
        client_id: impl Into<String>,
        api_token: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> Result<Agent, AgentError> {
        let client_id = client_id.into();

        if client_id.trim().is_empty() {
            return Err(AgentError::InvalidInput(String::from(
                "client id cannot be empty",
            )));
        }

        if api_token.expose_secret().trim().is_empty() {
            return Err(AgentError::InvalidInput(String::from(
                "api token cannot be empty",
            )));
        }

        let base_url = parse_base_url(&base_url).map_err(AgentError::InvalidInput)?;
        let list_client = ListClient::new(base_url, api_token, timeout)?;
        let lists = list_client.list_lists(&client_id).await.map_err(|err| {
            tracing::error!("Failed to list the client lists: {:?}", err);
            err
        })?;

        let list_id = match lists.as_slice() {
            [only] => Some(only.list_id.clone()),
            _ => None,
        };

        tracing::info!(
            client_id = %client_id,
            lists = lists.len(),
            default_list_id = ?list_id,
            "Agent connected"
        );

        Ok(Agent {
            client_id,
            list_id,
            dry_run: false,
            list_client,
            clock: Arc::new(SystemClock),
        })
    }

    pub async fn from_settings(settings: &AgentSettings) -> Result<Agent, AgentError> {
        let mut agent = Self::connect(
            settings.base_url.clone(),
            settings.client_id.clone(),
            settings.api_key.clone(),
            Some(settings.timeout()),
        )
        .await?;

        if let Some(list_id) = &settings.list_id {
            agent.set_list_id(list_id)?;
        }
        agent.set_dry_run(settings.dry_run);

        Ok(agent)
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn list_id(&self) -> Option<&str> {
        self.list_id.as_deref()
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
    }

    /// The client may own several lists, so the default one is not always right.
    pub fn set_list_id(&mut self, list_id: &str) -> Result<(), AgentError> {
        if list_id.trim().is_empty() {
            return Err(AgentError::InvalidInput(String::from(
                "list id cannot be empty",
            )));
        }

        self.list_id = Some(list_id.to_string());

        Ok(())
    }

    #[tracing::instrument(
        name = "Adding a subscriber",
        skip(self, attributes),
        fields(dry_run = self.dry_run)
    )]
    pub async fn add_subscriber(
        &self,
        email: &str,
        attributes: &SubscriberAttributes,
    ) -> Result<(), AgentError> {
        let email = parse_email(email)?;
        let subscriber = NewSubscriber::new(&email, attributes);

        tracing::info!(custom_fields = ?subscriber.custom_fields, "AddSubscriber");
        if self.dry_run {
            return Ok(());
        }

        let list_id = self.current_list_id()?;
        self.list_client.add_subscriber(list_id, &subscriber).await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "Updating a subscriber",
        skip(self, attributes),
        fields(dry_run = self.dry_run)
    )]
    pub async fn update_subscriber(
        &self,
        email: &str,
        attributes: &SubscriberAttributes,
    ) -> Result<(), AgentError> {
        let email = parse_email(email)?;
        let subscriber = NewSubscriber::new(&email, attributes);

        tracing::info!(custom_fields = ?subscriber.custom_fields, "UpdateSubscriber");
        if self.dry_run {
            return Ok(());
        }

        let list_id = self.current_list_id()?;
        self.list_client
            .update_subscriber(list_id, email.as_ref(), &subscriber)
            .await?;

        Ok(())
    }

    /// Moves the subscriber from active to unsubscribed.
    #[tracing::instrument(name = "Unsubscribing", skip(self), fields(dry_run = self.dry_run))]
    pub async fn unsubscribe(&self, email: &str) -> Result<(), AgentError> {
        let email = parse_email(email)?;

        tracing::info!("Unsubscribe");
        if self.dry_run {
            return Ok(());
        }

        let list_id = self.current_list_id()?;
        self.list_client.unsubscribe(list_id, email.as_ref()).await?;

        Ok(())
    }

    pub async fn signup(&self, email: &str, trial_expired_date: &str) -> Result<(), AgentError> {
        let trial_expired_date = parse_date(trial_expired_date)?;

        self.record(email, LifecycleEvent::Signup { trial_expired_date })
            .await
    }

    pub async fn signin(&self, email: &str) -> Result<(), AgentError> {
        self.record(email, LifecycleEvent::Signin).await
    }

    pub async fn expired(&self, email: &str) -> Result<(), AgentError> {
        self.record(email, LifecycleEvent::Expired).await
    }

    pub async fn paid(&self, email: &str, paid_expired_date: &str) -> Result<(), AgentError> {
        let paid_expired_date = parse_date(paid_expired_date)?;

        self.record(email, LifecycleEvent::Paid { paid_expired_date })
            .await
    }

    pub async fn cancel(&self, email: &str) -> Result<(), AgentError> {
        self.record(email, LifecycleEvent::Cancel).await
    }

    #[tracing::instrument(
        name = "Recording a lifecycle event",
        skip(self, event),
        fields(event = %event.name())
    )]
    pub async fn record(&self, email: &str, event: LifecycleEvent) -> Result<(), AgentError> {
        let attributes = event.attributes(self.clock.today());

        if event.creates_subscriber() {
            self.add_subscriber(email, &attributes).await
        } else {
            self.update_subscriber(email, &attributes).await
        }
    }

    fn current_list_id(&self) -> Result<&str, AgentError> {
        self.list_id.as_deref().ok_or_else(|| {
            AgentError::InvalidInput(String::from(
                "list id is not set, the client does not own exactly one list",
            ))
        })
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("client_id", &self.client_id)
            .field("list_id", &self.list_id)
            .field("dry_run", &self.dry_run)
            .field("base_url", &self.list_client.base_url())
            .finish()
    }
}

fn parse_email(email: &str) -> Result<SubscriberEmail, AgentError> {
    SubscriberEmail::parse(email.to_string()).map_err(AgentError::InvalidInput)
}

fn parse_date(date: &str) -> Result<AttributeDate, AgentError> {
    AttributeDate::parse(date.to_string()).map_err(AgentError::InvalidInput)
}
