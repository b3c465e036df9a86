// Device endpoints and the per-community device inventory
//
// Device listing is community-scoped via the `x-community-id` header, and
// the rows live under `data.row`. The `Devices` handle memoizes one
// community's list: the first access hits the cloud, later accesses reuse
// the cached rows. There is no invalidation; create a fresh handle to
// re-fetch.

use reqwest::Method;
use reqwest::header::HeaderValue;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::client::{CloudClient, RequestOptions};
use crate::error::Error;
use crate::models::{Device, DeviceStatus, DeviceType};

/// Header scoping a device request to one community.
const COMMUNITY_ID_HEADER: &str = "x-community-id";

impl CloudClient {
    /// Fetch a community's device list directly, bypassing any cache.
    ///
    /// `GET /property/selectdevice` with `x-community-id` set. Rows come
    /// back in server order; a missing `data.row` yields an empty list.
    pub async fn fetch_devices(&self, community_id: i64) -> Result<Vec<Device>, Error> {
        debug!(community_id, "listing devices");
        let options =
            RequestOptions::default().header(COMMUNITY_ID_HEADER, HeaderValue::from(community_id));
        let body = self
            .request(Method::GET, "/property/selectdevice", options)
            .await?;

        match body.pointer("/data/row") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(rows) => {
                serde_json::from_value(rows.clone()).map_err(|e| Error::Deserialization {
                    message: e.to_string(),
                    body: rows.to_string(),
                })
            }
        }
    }

    /// A memoizing handle over one community's device list.
    pub fn devices(&self, community_id: i64) -> Devices<'_> {
        Devices {
            client: self,
            community_id,
            cache: OnceCell::new(),
        }
    }
}

/// Memoized device inventory for a single community.
pub struct Devices<'a> {
    client: &'a CloudClient,
    community_id: i64,
    cache: OnceCell<Vec<Device>>,
}

impl Devices<'_> {
    /// The community this handle is scoped to.
    pub fn community_id(&self) -> i64 {
        self.community_id
    }

    /// The device list, fetched on first call and cached thereafter.
    pub async fn get(&self) -> Result<&[Device], Error> {
        let rows = self
            .cache
            .get_or_try_init(|| self.client.fetch_devices(self.community_id))
            .await?;
        Ok(rows.as_slice())
    }

    /// Devices of the given type.
    pub async fn by_type(&self, device_type: DeviceType) -> Result<Vec<&Device>, Error> {
        Ok(self
            .get()
            .await?
            .iter()
            .filter(|d| d.device_type == device_type)
            .collect())
    }

    /// Devices with the given status.
    pub async fn by_status(&self, status: DeviceStatus) -> Result<Vec<&Device>, Error> {
        Ok(self
            .get()
            .await?
            .iter()
            .filter(|d| d.status == status)
            .collect())
    }

    /// Devices currently reachable from the cloud.
    pub async fn online(&self) -> Result<Vec<&Device>, Error> {
        self.by_status(DeviceStatus::Online).await
    }
}
