use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};

#[path = "../../../tests/support/stub.rs"]
mod stub;

pub(crate) use stub::StubHttpClient;
