use crate::{
    encoder,
    error::ResponseError,
    types::{BoxError, Headers, ResultUnion, StatusCode, Success},
};
use std::fmt;

/// Represents a response to a Thrift call.
///
/// A response is finished by exactly one of [`write_result`](Self::write_result) or
/// [`write_exc_info`](Self::write_exc_info); later writes fail.
pub struct ThriftResponse<R> {
    headers: Headers,
    result: R,
    finished: bool,
    code: StatusCode,
}

impl<R: ResultUnion> ThriftResponse<R> {
    pub fn new() -> Self {
        Self {
            headers: Headers::new(),
            result: R::default(),
            finished: false,
            code: StatusCode::Ok,
        }
    }

    /// Add a header to be written in the response.
    pub fn write_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Send back the result of this call.
    ///
    /// `None` finishes the response without setting a field, which is how void
    /// methods succeed.
    pub fn write_result(&mut self, result: Option<Success<R>>) -> Result<(), ResponseError> {
        if self.finished {
            return Err(ResponseError::AlreadyFinished);
        }
        if let Some(value) = result {
            if encoder::success_field::<R>().is_none() {
                return Err(ResponseError::VoidResult { result: R::NAME });
            }
            self.result.set_success(value);
        }
        self.finished = true;
        Ok(())
    }

    /// Store `error` in the first declared exception field it matches.
    ///
    /// An error matching no declared exception is handed back untouched and the
    /// response is left as it was.
    pub fn write_exc_info(&mut self, error: BoxError) -> Result<(), BoxError> {
        let Some(field) = encoder::select_exception::<R>(&*error) else {
            return Err(error);
        };
        if self.finished {
            return Err(ResponseError::AlreadyFinished.into());
        }
        self.result.set_exception(field.id, error)?;
        self.code = StatusCode::Error;
        self.finished = true;
        Ok(())
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn result(&self) -> &R {
        &self.result
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn into_parts(self) -> (StatusCode, Headers, R) {
        (self.code, self.headers, self.result)
    }
}

impl<R: ResultUnion> Default for ThriftResponse<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: fmt::Debug> fmt::Debug for ThriftResponse<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ThriftResponse")
            .field("headers", &self.headers)
            .field("result", &self.result)
            .field("finished", &self.finished)
            .field("code", &self.code)
            .finish()
    }
}

/// Response wrapper of the return-based calling convention.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<B> {
    pub body: B,
    pub headers: Headers,
    pub status: StatusCode,
}

impl<B> Response<B> {
    pub fn new(body: B) -> Self {
        Self {
            body,
            headers: Headers::new(),
            status: StatusCode::Ok,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub(crate) fn replace_body<T>(self, body: T) -> Response<T> {
        Response {
            body,
            headers: self.headers,
            status: self.status,
        }
    }
}

impl<B: Default> Default for Response<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

/// What a return-based handler hands back.
#[derive(Debug)]
pub enum Reply<S> {
    /// Nothing was returned.
    Empty,
    /// A bare result value.
    Value(S),
    /// A full response; `None` as body means no result.
    Response(Response<Option<S>>),
}

impl<S> Reply<S> {
    pub(crate) fn into_response(self) -> Response<Option<S>> {
        match self {
            Reply::Empty => Response::new(None),
            Reply::Value(value) => Response::new(Some(value)),
            Reply::Response(response) => response,
        }
    }
}

impl<S> From<Response<Option<S>>> for Reply<S> {
    fn from(response: Response<Option<S>>) -> Self {
        Reply::Response(response)
    }
}

/// Dispatcher-owned response of the mutate-in-place calling convention.
#[derive(Debug)]
pub struct OutboundResponse<R> {
    pub code: StatusCode,
    headers: Headers,
    body: Option<R>,
}

impl<R> OutboundResponse<R> {
    pub fn new() -> Self {
        Self {
            code: StatusCode::Ok,
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn write_header(&mut self, headers: Headers) {
        self.headers.extend(headers);
    }

    pub fn write_body(&mut self, body: R) {
        self.body = Some(body);
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&R> {
        self.body.as_ref()
    }

    pub(crate) fn into_parts(self) -> (StatusCode, Headers, Option<R>) {
        (self.code, self.headers, self.body)
    }
}

impl<R> Default for OutboundResponse<R> {
    fn default() -> Self {
        Self::new()
    }
}
