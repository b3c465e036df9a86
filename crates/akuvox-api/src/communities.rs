// Community endpoints
//
// Community listing is account-scoped; the reply's `data` array holds one
// entry per property the account manages.

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::client::{CloudClient, RequestOptions};
use crate::error::Error;
use crate::models::Community;

impl CloudClient {
    /// List the communities visible to the authenticated account, in
    /// server order.
    ///
    /// `GET /property/comunityinfo` (sic -- the vendor path is
    /// misspelled on the wire). A missing `data` field yields an empty
    /// list.
    pub async fn list_communities(&self) -> Result<Vec<Community>, Error> {
        debug!("listing communities");
        let body = self
            .request(Method::GET, "/property/comunityinfo", RequestOptions::default())
            .await?;

        match body.get("data") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(data) => {
                serde_json::from_value(data.clone()).map_err(|e| Error::Deserialization {
                    message: e.to_string(),
                    body: data.to_string(),
                })
            }
        }
    }
}
