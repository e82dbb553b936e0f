use crate::upload::UploadResult;
use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::{Response, StatusCode};
use serde::{Deserialize, Serialize};

pub(crate) const UPLOADED_STATUS: &str = "uploaded";

/// The JSON body of a successful upload response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedBody {
    pub status: String,
    pub uuid: String,
}

impl UploadedBody {
    pub fn new<I: Into<String>>(uuid: I) -> UploadedBody {
        UploadedBody {
            status: UPLOADED_STATUS.to_owned(),
            uuid: uuid.into(),
        }
    }
}

/// Maps the outcome of an upload to the response handed back to the transport.
///
/// Success is `201 Created` with a JSON [`UploadedBody`]; every error is
/// reported with its [`status_code`](crate::Error::status_code) and an empty body.
pub fn build_response(outcome: &crate::Result<UploadResult>) -> Response<Bytes> {
    match outcome {
        Ok(result) => match serde_json::to_vec(&UploadedBody::new(result.id.as_str())) {
            Ok(body) => {
                let mut res = Response::new(Bytes::from(body));
                *res.status_mut() = StatusCode::CREATED;
                res.headers_mut()
                    .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
                res
            }
            Err(err) => empty_response(crate::Error::Internal(err.into()).status_code()),
        },
        Err(err) => empty_response(err.status_code()),
    }
}

fn empty_response(status: StatusCode) -> Response<Bytes> {
    let mut res = Response::new(Bytes::new());
    *res.status_mut() = status;
    res
}
