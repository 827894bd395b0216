//! Firebase Realtime Database backend
//!
//! Uses the REST surface: every key path `p` lives at `{database_url}/p.json`.
//! A missing key reads back as JSON `null`.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{
    decode_time, Day, ReminderStore, ReminderTime, Roster, StoreError, REMINDER_KEY, ROSTER_KEY,
};

#[derive(Debug, Clone)]
pub struct FirebaseStore {
    client: Client,
    database_url: String,
    auth: Option<String>,
}

impl FirebaseStore {
    pub fn new(database_url: impl Into<String>, auth: Option<String>) -> Result<Self, StoreError> {
        let database_url = database_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().build()?,
            database_url,
            auth,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}.json", self.database_url, path)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(auth) => request.query(&[("auth", auth)]),
            None => request,
        }
    }

    async fn get_value<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, StoreError> {
        debug!("Firebase GET {path}");
        let response = self
            .with_auth(self.client.get(self.url(path)))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<Option<T>>(&body).map_err(|e| StoreError::malformed(path, e))
    }

    async fn put_value<T: Serialize + ?Sized>(&self, path: &str, value: &T) -> Result<(), StoreError> {
        debug!("Firebase PUT {path}");
        let response = self
            .with_auth(self.client.put(self.url(path)))
            .json(value)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReminderStore for FirebaseStore {
    async fn get_time(&self) -> Result<ReminderTime, StoreError> {
        match self.get_value::<String>(REMINDER_KEY).await? {
            Some(raw) => decode_time(&raw),
            None => Ok(ReminderTime::DEFAULT),
        }
    }

    async fn set_time(&self, time: ReminderTime) -> Result<(), StoreError> {
        self.put_value(REMINDER_KEY, &time.to_string()).await
    }

    async fn get_roster(&self) -> Result<Roster, StoreError> {
        let document = self
            .get_value::<BTreeMap<String, String>>(ROSTER_KEY)
            .await?
            .unwrap_or_default();
        Ok(Roster::from_document(document))
    }

    async fn set_roster(&self, day: Day, name: &str) -> Result<(), StoreError> {
        self.put_value(&format!("{ROSTER_KEY}/{}", day.key()), name)
            .await
    }
}
