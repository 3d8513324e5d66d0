//! Transformers reshape a [`Response`] for a particular consumer.
//!
//! Only the identity transformer is registered by default. The shapes below are ready to
//! register under whatever name a deployment wants:
//!
//! ```
//! # use skyzen_render::{response::{transformer, NoTimestamp}, Engine};
//! let engine = Engine::new();
//! engine
//!     .transformers()
//!     .register("no_timestamp".to_owned(), transformer(NoTimestamp))
//!     .unwrap();
//! ```

use std::sync::Arc;

use serde_json::Value;
use skyzen_render_core::{BoxResponse, HeaderMap, ResponseLike, StatusCode};

use super::Response;

/// Turns a base response into the shape a consumer expects.
pub type Transformer = Arc<dyn Fn(Response) -> BoxResponse + Send + Sync>;

/// Name [`NoTimestamp`] is usually registered under.
pub const NO_TIMESTAMP: &str = "no_timestamp";

/// Name [`DataOnly`] is usually registered under.
pub const DATA_ONLY: &str = "data_only";

/// Box a wrapper constructor (or any closure) as a [`Transformer`].
#[must_use]
pub fn transformer<T, F>(f: F) -> Transformer
where
    T: ResponseLike + Send + Sync + 'static,
    F: Fn(Response) -> T + Send + Sync + 'static,
{
    Arc::new(move |response| Box::new(f(response)) as BoxResponse)
}

/// Hands the response back untouched.
#[must_use]
pub fn identity() -> Transformer {
    transformer(|response: Response| response)
}

/// The default shape without the `timestamp` body field. Headers are unchanged.
#[derive(Debug, Clone)]
pub struct NoTimestamp(pub Response);

impl ResponseLike for NoTimestamp {
    fn status(&self) -> StatusCode {
        self.0.status()
    }

    fn header(&self) -> HeaderMap {
        self.0.header()
    }

    fn body(&self) -> Value {
        let mut body = self.0.body();
        if let Value::Object(fields) = &mut body {
            fields.remove("timestamp");
        }
        body
    }
}

/// The bare business data as the body. Headers still carry the metadata.
#[derive(Debug, Clone)]
pub struct DataOnly(pub Response);

impl_wrapper!(NoTimestamp => Response, DataOnly => Response);

impl ResponseLike for DataOnly {
    fn status(&self) -> StatusCode {
        self.0.status()
    }

    fn header(&self) -> HeaderMap {
        self.0.header()
    }

    fn body(&self) -> Value {
        self.0.data().clone()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use skyzen_render_core::MetaError;

    use super::*;
    use crate::{AppInfo, ResponseOptions};

    fn response() -> Response {
        Response::new(
            json!({"1": "one"}),
            ResponseOptions::new().with_meta(MetaError::not_found()),
            Arc::new(AppInfo::new("myapp", "0.3.0")),
        )
    }

    #[test]
    fn no_timestamp_drops_only_the_timestamp() {
        let base = response().body();
        let trimmed = NoTimestamp(response()).body();

        let mut expected = base.as_object().unwrap().clone();
        expected.remove("timestamp");
        assert_eq!(trimmed, Value::Object(expected));
    }

    #[test]
    fn data_only_keeps_headers() {
        let shaped = transformer(DataOnly)(response());
        assert_eq!(shaped.body(), json!({"1": "one"}));
        assert_eq!(shaped.status(), StatusCode::NOT_FOUND);
        assert_eq!(shaped.header().len(), 6);
    }

    #[test]
    fn identity_is_transparent() {
        let shaped = identity()(response());
        assert_eq!(shaped.header(), response().header());
    }

    #[test]
    fn wrappers_deref_to_the_response() {
        let wrapped = NoTimestamp::from(response());
        assert_eq!(wrapped.meta().code(), "not_found(5)");
        assert_eq!(wrapped.into_inner().template(), "");
    }
}
